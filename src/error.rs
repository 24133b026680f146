//! Error types for the flight-track-analysis crate.
use std::fmt;

/// Error type for the crate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnalysisError {
    /// A per-sample series that is required for this analysis is missing or empty.
    MissingProfile,
    /// A coordinate array of the forecast grid is empty. The offending axis is named.
    EmptyCoordinate(&'static str),
    /// A coordinate array is not strictly monotonic. The offending axis is named.
    NonMonotonicCoordinate(&'static str),
    /// The flattened field length does not match the product of the coordinate lengths.
    ShapeMismatch,
    /// Parallel per-sample series of a flight track have different lengths.
    ProfileLengthMismatch,
    /// Track timestamps are not strictly increasing.
    NonMonotonicTimestamps,
    /// Not enough data available for analysis.
    NotEnoughData,
    /// Bad or invalid input.
    InvalidInput,
    /// Reading or writing a persisted artifact failed.
    ArtifactIo(std::io::ErrorKind),
    /// A persisted artifact did not parse back into the expected shape.
    ArtifactFormat,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use crate::error::AnalysisError::*;

        match self {
            MissingProfile => write!(f, "missing profile required for the analysis"),
            EmptyCoordinate(axis) => write!(f, "empty {} coordinate array", axis),
            NonMonotonicCoordinate(axis) => {
                write!(f, "{} coordinate array is not strictly monotonic", axis)
            }
            ShapeMismatch => write!(
                f,
                "field length does not match the product of the coordinate lengths"
            ),
            ProfileLengthMismatch => write!(f, "track profiles have mismatched lengths"),
            NonMonotonicTimestamps => write!(f, "track timestamps are not strictly increasing"),
            NotEnoughData => write!(f, "not enough data available for analysis"),
            InvalidInput => write!(f, "invalid input"),
            ArtifactIo(kind) => write!(f, "artifact io error: {:?}", kind),
            ArtifactFormat => write!(f, "artifact file has an unexpected format"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        AnalysisError::ArtifactIo(err.kind())
    }
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, AnalysisError>;

//! Data type and methods to store an aircraft flight track.

use crate::error::{AnalysisError, Result};
use chrono::NaiveDateTime;
use itertools::Itertools;
use metfor::HectoPascal;
use optional::Optioned;

/// An ordered sequence of flight samples stored as parallel vectors.
///
/// Each sample has a timestamp, a position, a pressure, and an observed quantity
/// (e.g. a CO2 mixing ratio). Missing entries in the observation profile are the
/// track's mask: analyses must produce a missing output wherever the observation
/// is missing, and the pressure profile carries the same gaps.
#[derive(Clone, Debug, Default)]
pub struct FlightTrack {
    // Description of the source of the track, e.g. the instrument merge file.
    source: Option<String>,

    times: Vec<NaiveDateTime>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    pressure: Vec<Optioned<HectoPascal>>,
    observation: Vec<Optioned<f64>>,
}

impl FlightTrack {
    /// Create a new track with no samples. This is a proxy for default with a clearer name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flight_track_analysis::FlightTrack;
    ///
    /// let track = FlightTrack::new();
    /// assert_eq!(track.len(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        FlightTrack::default()
    }

    /// Add a source description to this track.
    #[inline]
    pub fn with_source_description<S>(mut self, desc: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.source = Option::from(desc);
        self
    }

    /// Retrieve the source description for this track.
    #[inline]
    pub fn source_description(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Builder method for the sample timestamps.
    #[inline]
    pub fn with_times(self, times: Vec<NaiveDateTime>) -> Self {
        Self { times, ..self }
    }

    /// Builder method for the latitude profile, in degrees.
    #[inline]
    pub fn with_latitudes(self, latitude: Vec<f64>) -> Self {
        Self { latitude, ..self }
    }

    /// Builder method for the longitude profile, in degrees.
    #[inline]
    pub fn with_longitudes(self, longitude: Vec<f64>) -> Self {
        Self { longitude, ..self }
    }

    /// Builder method for the pressure profile.
    ///
    /// # Examples
    /// ```rust
    /// use flight_track_analysis::FlightTrack;
    /// use metfor::HectoPascal;
    /// use optional::{some, Optioned};
    ///
    /// let data = vec![926.0, 925.5, 924.8];
    /// let pressure: Vec<Optioned<HectoPascal>> = data.into_iter()
    ///     .map(HectoPascal)
    ///     .map(some)
    ///     .collect();
    ///
    /// let _track = FlightTrack::new().with_pressures(pressure);
    /// ```
    #[inline]
    pub fn with_pressures(self, pressure: Vec<Optioned<HectoPascal>>) -> Self {
        Self { pressure, ..self }
    }

    /// Builder method for the observed-quantity profile.
    #[inline]
    pub fn with_observations(self, observation: Vec<Optioned<f64>>) -> Self {
        Self {
            observation,
            ..self
        }
    }

    /// Get the sample timestamps.
    #[inline]
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Get the latitude profile.
    #[inline]
    pub fn latitude_profile(&self) -> &[f64] {
        &self.latitude
    }

    /// Get the longitude profile.
    #[inline]
    pub fn longitude_profile(&self) -> &[f64] {
        &self.longitude
    }

    /// Get the pressure profile.
    #[inline]
    pub fn pressure_profile(&self) -> &[Optioned<HectoPascal>] {
        &self.pressure
    }

    /// Get the observed-quantity profile.
    #[inline]
    pub fn observation_profile(&self) -> &[Optioned<f64>] {
        &self.observation
    }

    /// Number of samples, taken from the timestamp profile.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// `true` if the track holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Check the track is usable for analysis.
    ///
    /// Requires at least one sample, all profiles the same length as the timestamps,
    /// and strictly increasing timestamps. Errors here are configuration errors and
    /// are reported before any computation runs.
    pub fn validate(&self) -> Result<()> {
        if self.times.is_empty() {
            return Err(AnalysisError::MissingProfile);
        }

        let n = self.times.len();
        if self.latitude.len() != n
            || self.longitude.len() != n
            || self.pressure.len() != n
            || self.observation.len() != n
        {
            return Err(AnalysisError::ProfileLengthMismatch);
        }

        if !self.times.iter().tuple_windows().all(|(t0, t1)| t0 < t1) {
            return Err(AnalysisError::NonMonotonicTimestamps);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use optional::some;

    fn sample_times(n: usize) -> Vec<NaiveDateTime> {
        (0..n)
            .map(|s| NaiveDate::from_ymd(2016, 8, 4).and_hms(15, 0, s as u32))
            .collect()
    }

    fn small_track() -> FlightTrack {
        FlightTrack::new()
            .with_times(sample_times(3))
            .with_latitudes(vec![40.0, 40.1, 40.2])
            .with_longitudes(vec![-100.0, -100.1, -100.2])
            .with_pressures(vec![
                some(HectoPascal(925.0)),
                some(HectoPascal(924.0)),
                some(HectoPascal(923.0)),
            ])
            .with_observations(vec![some(400.0), some(401.0), some(402.0)])
    }

    #[test]
    fn valid_track_passes() {
        assert!(small_track().validate().is_ok());
    }

    #[test]
    fn empty_track_is_rejected() {
        assert_eq!(
            FlightTrack::new().validate().unwrap_err(),
            AnalysisError::MissingProfile
        );
    }

    #[test]
    fn mismatched_profiles_are_rejected() {
        let track = small_track().with_latitudes(vec![40.0]);
        assert_eq!(
            track.validate().unwrap_err(),
            AnalysisError::ProfileLengthMismatch
        );
    }

    #[test]
    fn out_of_order_timestamps_are_rejected() {
        let mut times = sample_times(3);
        times.swap(1, 2);
        let track = small_track().with_times(times);
        assert_eq!(
            track.validate().unwrap_err(),
            AnalysisError::NonMonotonicTimestamps
        );
    }
}

//! Persisted intermediate artifacts.
//!
//! Interpolated-track values and level-selection masks are written as JSON files
//! keyed by `{date}_{platform}` and consumed by downstream plotting. The two kinds
//! carry distinct file name suffixes so both can live in one directory. Missing
//! values are stored as `null`, so the mask round-trips losslessly.

use crate::{
    config::Platform,
    error::{AnalysisError, Result},
};
use optional::Optioned;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize)]
struct TrackValuesFile {
    date: String,
    platform: String,
    values: Vec<Option<f64>>,
}

#[derive(Serialize, Deserialize)]
struct LevelMasksFile {
    date: String,
    platform: String,
    masks: Vec<Vec<bool>>,
}

/// The path interpolated track values for this date and platform are stored at.
pub fn track_values_path(dir: &Path, date: &str, platform: Platform) -> PathBuf {
    dir.join(format!("{}_{}_values.json", date, platform))
}

/// The path level-selection masks for this date and platform are stored at.
pub fn level_masks_path(dir: &Path, date: &str, platform: Platform) -> PathBuf {
    dir.join(format!("{}_{}_levels.json", date, platform))
}

/// Write interpolated track values, one entry per track sample, `null` for missing.
pub fn save_track_values(
    dir: &Path,
    date: &str,
    platform: Platform,
    values: &[Optioned<f64>],
) -> Result<PathBuf> {
    let payload = TrackValuesFile {
        date: date.to_owned(),
        platform: platform.to_string(),
        values: values.iter().map(|v| v.into_option()).collect(),
    };

    let path = track_values_path(dir, date, platform);
    write_json(&path, &payload)?;
    Ok(path)
}

/// Read back interpolated track values saved by [`save_track_values`].
pub fn load_track_values(dir: &Path, date: &str, platform: Platform) -> Result<Vec<Optioned<f64>>> {
    let payload: TrackValuesFile = read_json(&track_values_path(dir, date, platform))?;

    if payload.date != date || payload.platform != platform.to_string() {
        return Err(AnalysisError::ArtifactFormat);
    }

    Ok(payload.values.into_iter().map(Optioned::from).collect())
}

/// Write level-selection masks, one inner mask per target level.
pub fn save_level_masks(
    dir: &Path,
    date: &str,
    platform: Platform,
    masks: &[Vec<bool>],
) -> Result<PathBuf> {
    let payload = LevelMasksFile {
        date: date.to_owned(),
        platform: platform.to_string(),
        masks: masks.to_vec(),
    };

    let path = level_masks_path(dir, date, platform);
    write_json(&path, &payload)?;
    Ok(path)
}

/// Read back level-selection masks saved by [`save_level_masks`].
pub fn load_level_masks(dir: &Path, date: &str, platform: Platform) -> Result<Vec<Vec<bool>>> {
    let payload: LevelMasksFile = read_json(&level_masks_path(dir, date, platform))?;

    if payload.date != date || payload.platform != platform.to_string() {
        return Err(AnalysisError::ArtifactFormat);
    }

    Ok(payload.masks)
}

fn write_json<T: Serialize>(path: &Path, payload: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), payload).map_err(from_serde)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(from_serde)
}

fn from_serde(err: serde_json::Error) -> AnalysisError {
    match err.io_error_kind() {
        Some(kind) => AnalysisError::ArtifactIo(kind),
        None => AnalysisError::ArtifactFormat,
    }
}

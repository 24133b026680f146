#![warn(missing_docs)]
//! Functions and data types for comparing aircraft flight-track observations with
//! gridded weather-model forecast fields.
//!
//! Two analyses form the core of the crate:
//!
//! * [`interpolate_track`] maps a 4-D (time, level, latitude, longitude) forecast
//!   field onto a 1-D flight track, producing one interpolated value per sample.
//! * [`extract_levels`] finds the constant-altitude segments of a flight from its
//!   pressure time series, one boolean mask per requested target level.
//!
//! Both are pure functions over in-memory arrays; reading instrument merge files and
//! forecast grids, and plotting the results, are left to the caller. Intermediate
//! results can be persisted with the [`output`] module.

//
// API
//
pub use crate::{
    config::{co2_mass_to_mole_fraction, LevelSelection, Platform, STANDARD_LEVELS},
    error::{AnalysisError, Result},
    grid::GridField,
    interpolation::{interpolate_track, level_above_below},
    levels::{extract_levels, threshold_for_level, thresholds_for_levels},
    track::FlightTrack,
};

pub mod config;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod levels;
pub mod output;
pub mod track;

mod utility;

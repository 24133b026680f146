//! Configuration objects for a comparison run.
//!
//! Everything the original campaign scripts kept as module globals lives here as
//! explicit values passed into the analysis functions, so the interpolator and the
//! level extractor stay independently testable with synthetic inputs.

use crate::levels::thresholds_for_levels;
use metfor::HectoPascal;
use strum_macros::{Display, EnumIter, EnumString};

/// The standard forecast pressure levels used for the campaign comparisons, in hPa.
pub const STANDARD_LEVELS: [HectoPascal; 5] = [
    HectoPascal(300.0),
    HectoPascal(500.0),
    HectoPascal(850.0),
    HectoPascal(925.0),
    HectoPascal(1000.0),
];

/// Settings for [`crate::extract_levels`].
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSelection {
    /// Target pressure levels to extract.
    pub targets: Vec<HectoPascal>,
    /// Tolerance band half-width per target, parallel to `targets`.
    pub thresholds: Vec<HectoPascal>,
    /// Maximum allowed smoothed pressure change per sample.
    pub change_threshold: HectoPascal,
    /// Width of the centered moving average applied to the pressure-change series,
    /// in samples.
    pub smoothing_window: usize,
}

impl LevelSelection {
    /// Build a selection for the given targets, deriving the tolerance bands from a
    /// base threshold via [`crate::threshold_for_level`].
    pub fn new(
        targets: Vec<HectoPascal>,
        base_threshold: HectoPascal,
        change_threshold: HectoPascal,
        smoothing_window: usize,
    ) -> Self {
        let thresholds = thresholds_for_levels(base_threshold, &targets);

        LevelSelection {
            targets,
            thresholds,
            change_threshold,
            smoothing_window,
        }
    }
}

impl Default for LevelSelection {
    /// The settings used for the 2016 campaign: the 925 hPa level, a 20 hPa base
    /// threshold, a 1 hPa-per-sample change threshold, and a 60 sample (5 minute at
    /// 5 s sampling) smoothing window.
    fn default() -> Self {
        LevelSelection::new(
            vec![HectoPascal(925.0)],
            HectoPascal(20.0),
            HectoPascal(1.0),
            60,
        )
    }
}

/// The aircraft platforms flown in the campaign.
///
/// The string form matches the platform tag used in the instrument merge file names
/// and in the artifact keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum Platform {
    /// The NASA C-130 Hercules.
    #[strum(serialize = "c130")]
    C130,
    /// The NASA B-200 King Air.
    #[strum(serialize = "b200")]
    B200,
}

impl Platform {
    /// Name of the CO2 mixing-ratio variable in this platform's instrument merge.
    pub fn co2_variable(self) -> &'static str {
        match self {
            Platform::C130 => "CO2_MixingRatio_PICARRO",
            Platform::B200 => "CO2_PICARRO",
        }
    }
}

/// Convert a CO2 mass mixing ratio in kg/kg to a mole fraction in ppm.
pub fn co2_mass_to_mole_fraction(mass_mixing_ratio: f64) -> f64 {
    const M_AIR: f64 = 28.9645;
    const M_CO2: f64 = 44.0095;

    mass_mixing_ratio * M_AIR / M_CO2 * 1.0e6
}

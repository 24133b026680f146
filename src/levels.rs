//! This module extracts constant-altitude flight segments from a pressure time series.
//!
//! The algorithm is deliberately crude: a sample counts as "flying at" a target level
//! when its pressure sits inside a tolerance band around the level and the smoothed
//! sample-to-sample pressure change is small, which filters out fast ascents and
//! descents passing through the band. Newer instrument merges carry a
//! straight-and-level flag that would do this better; until then downstream
//! comparisons depend on this exact band-plus-rate policy, so keep it as is.

use crate::{
    config::LevelSelection,
    error::{AnalysisError, Result},
    utility::centered_rolling_mean,
};
use itertools::{izip, Itertools};
use metfor::{HectoPascal, Quantity};
use optional::{none, some, Optioned};

/// Extract one boolean mask per target level from a pressure time series.
///
/// `mask[k][i]` is `true` iff `pressure[i]` lies strictly inside the tolerance band
/// around `config.targets[k]` and the smoothed pressure rate-of-change at `i` is
/// strictly below `config.change_threshold`. Missing pressure samples and positions
/// where the smoothed rate is undefined are never selected.
pub fn extract_levels(
    pressure: &[Optioned<HectoPascal>],
    config: &LevelSelection,
) -> Result<Vec<Vec<bool>>> {
    if config.targets.is_empty() || config.smoothing_window == 0 {
        return Err(AnalysisError::InvalidInput);
    }
    if config.targets.len() != config.thresholds.len() {
        return Err(AnalysisError::ProfileLengthMismatch);
    }
    if pressure.is_empty() {
        return Err(AnalysisError::MissingProfile);
    }
    if pressure.len() < 2 {
        return Err(AnalysisError::NotEnoughData);
    }

    // Absolute sample-to-sample pressure change, length N-1. A gap on either side of
    // a difference leaves it missing.
    let change: Vec<Optioned<f64>> = pressure
        .iter()
        .tuple_windows()
        .map(|(p0, p1)| match (p0.into_option(), p1.into_option()) {
            (Some(a), Some(b)) => some((b - a).unpack().abs()),
            _ => none(),
        })
        .collect();

    let mut change = centered_rolling_mean(
        &change,
        config.smoothing_window,
        config.smoothing_window / 2,
    );

    // Pad back to N samples by repeating the last smoothed entry. Only the tail is
    // padded even though the centered mean is undefined at both ends; downstream
    // masks were built against this one-sided padding and it is kept exactly.
    let last = change[change.len() - 1];
    change.push(last);

    let change_threshold = config.change_threshold.unpack();

    let masks = izip!(&config.targets, &config.thresholds)
        .map(|(&target, &threshold)| {
            izip!(pressure, &change)
                .map(|(p_opt, c_opt)| match (p_opt.into_option(), c_opt.into_option()) {
                    (Some(p), Some(c)) => {
                        p > target - threshold && p < target + threshold && c < change_threshold
                    }
                    _ => false,
                })
                .collect()
        })
        .collect();

    Ok(masks)
}

/// The tolerance band half-width for a target level.
///
/// Bands widen exponentially toward higher pressures (lower altitude) because
/// absolute pressure fluctuations at constant turbulence grow near the surface:
/// `base * exp(level / 1000)` with the level in hPa.
#[inline]
pub fn threshold_for_level(base: HectoPascal, level: HectoPascal) -> HectoPascal {
    HectoPascal(base.unpack() * (level.unpack() / 1000.0).exp())
}

/// Map [`threshold_for_level`] over a list of target levels.
pub fn thresholds_for_levels(base: HectoPascal, levels: &[HectoPascal]) -> Vec<HectoPascal> {
    levels
        .iter()
        .map(|&level| threshold_for_level(base, level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use optional::{none, some};

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn config_for(targets: Vec<HectoPascal>) -> LevelSelection {
        LevelSelection::new(targets, HectoPascal(20.0), HectoPascal(1.0), 4)
    }

    #[test]
    fn constant_series_at_the_target_is_all_selected() {
        let pressure: Vec<_> = vec![some(HectoPascal(925.0)); 10];
        let masks = extract_levels(&pressure, &config_for(vec![HectoPascal(925.0)])).unwrap();

        assert_eq!(masks.len(), 1);
        assert_eq!(masks[0], vec![true; 10]);
    }

    #[test]
    fn a_fast_ramp_through_the_band_is_never_selected() {
        // 5 hPa per sample, well over the 1 hPa change threshold, passing straight
        // through the 925 hPa band.
        let pressure: Vec<_> = (0..40)
            .map(|i| some(HectoPascal(1000.0 - 5.0 * i as f64)))
            .collect();
        let masks = extract_levels(&pressure, &config_for(vec![HectoPascal(925.0)])).unwrap();

        assert_eq!(masks[0], vec![false; 40]);
    }

    #[test]
    fn the_tail_sample_inherits_the_repeated_smoothed_change() {
        // Descend at 5 hPa per sample and stop exactly on the target. The final
        // sample has no difference entry of its own; it gets the repeated last
        // smoothed value, still 5 hPa per sample, so it is rejected even though its
        // pressure sits dead on the level.
        let pressure: Vec<_> = (0..30)
            .map(|i| some(HectoPascal(1070.0 - 5.0 * i as f64)))
            .collect();
        assert_eq!(pressure[29], some(HectoPascal(925.0)));

        let masks = extract_levels(&pressure, &config_for(vec![HectoPascal(925.0)])).unwrap();
        assert!(!masks[0][29]);
        assert_eq!(masks[0], vec![false; 30]);
    }

    #[test]
    fn missing_pressure_samples_are_never_selected() {
        let mut pressure: Vec<_> = vec![some(HectoPascal(925.0)); 10];
        pressure[4] = none();

        let masks = extract_levels(&pressure, &config_for(vec![HectoPascal(925.0)])).unwrap();

        assert!(!masks[0][4]);
        assert!(masks[0][0]);
        assert!(masks[0][9]);
    }

    #[test]
    fn a_window_wider_than_the_series_selects_nothing() {
        // Too few samples for the min-periods rule anywhere, so the smoothed change
        // is undefined everywhere.
        let pressure: Vec<_> = vec![some(HectoPascal(925.0)); 5];
        let mut config = config_for(vec![HectoPascal(925.0)]);
        config.smoothing_window = 50;

        let masks = extract_levels(&pressure, &config).unwrap();
        assert_eq!(masks[0], vec![false; 5]);
    }

    #[test]
    fn one_mask_per_target_level() {
        let pressure: Vec<_> = vec![some(HectoPascal(500.0)); 10];
        let masks = extract_levels(
            &pressure,
            &config_for(vec![HectoPascal(500.0), HectoPascal(925.0)]),
        )
        .unwrap();

        assert_eq!(masks.len(), 2);
        assert_eq!(masks[0], vec![true; 10]);
        assert_eq!(masks[1], vec![false; 10]);
    }

    #[test]
    fn rejects_bad_configuration() {
        let pressure: Vec<_> = vec![some(HectoPascal(925.0)); 10];

        let empty = config_for(vec![]);
        assert_eq!(
            extract_levels(&pressure, &empty).unwrap_err(),
            AnalysisError::InvalidInput
        );

        let mut mismatched = config_for(vec![HectoPascal(925.0)]);
        mismatched.thresholds.clear();
        assert_eq!(
            extract_levels(&pressure, &mismatched).unwrap_err(),
            AnalysisError::ProfileLengthMismatch
        );

        let config = config_for(vec![HectoPascal(925.0)]);
        assert_eq!(
            extract_levels(&[some(HectoPascal(925.0))], &config).unwrap_err(),
            AnalysisError::NotEnoughData
        );
    }

    #[test]
    fn thresholds_widen_exponentially_with_pressure() {
        let base = HectoPascal(20.0);

        let t925 = threshold_for_level(base, HectoPascal(925.0));
        assert!(approx_eq(t925.unpack(), 20.0 * (0.925f64).exp(), 1.0e-9));
        assert!(approx_eq(t925.unpack(), 50.3, 0.05));

        // Strictly increasing in the target level.
        let thresholds = thresholds_for_levels(base, &crate::config::STANDARD_LEVELS);
        for pair in thresholds.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}

//! Numeric helpers shared across the analysis modules.

use optional::{none, some, Optioned};

/// Centered moving average with a minimum-periods rule.
///
/// The window at position `i` spans `[i - w/2, i + (w-1)/2]` clipped to the series,
/// matching the placement of a pandas-style centered rolling mean. Missing entries do
/// not contribute; a position with fewer than `min_periods` contributing samples is
/// left missing.
pub(crate) fn centered_rolling_mean(
    xs: &[Optioned<f64>],
    window: usize,
    min_periods: usize,
) -> Vec<Optioned<f64>> {
    debug_assert!(window >= 1);

    let ahead = (window - 1) / 2;
    let behind = window - 1 - ahead;

    (0..xs.len())
        .map(|i| {
            let lo = i.saturating_sub(behind);
            let hi = (i + ahead).min(xs.len() - 1);

            let (sum, count) = xs[lo..=hi]
                .iter()
                .filter_map(|v| v.into_option())
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

            if count >= min_periods && count > 0 {
                some(sum / count as f64)
            } else {
                none()
            }
        })
        .collect()
}

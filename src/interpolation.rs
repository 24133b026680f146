//! Interpolation of a gridded forecast field onto a flight track.
//!
//! Forecast fields change slowly relative to a flight's duration, so one forecast
//! snapshot suffices: the track's temporal midpoint picks the forecast time, then each
//! sample gets a bilinear horizontal interpolation at the two pressure levels
//! bracketing it and a linear interpolation between those two values in pressure.

use crate::{
    error::Result,
    grid::GridField,
    track::FlightTrack,
};
use chrono::NaiveDateTime;
use itertools::{izip, Itertools};
use metfor::{HectoPascal, Quantity};
use optional::{none, some, Optioned};
use std::ops::Sub;

/// Interpolate a forecast field to a flight track, one value per sample.
///
/// Output is in track order. A sample whose observation or pressure is missing
/// produces a missing value regardless of whether the interpolation itself would
/// have succeeded. Pressures outside the grid's level range clamp to the nearest
/// level, they do not error.
pub fn interpolate_track(field: &GridField, track: &FlightTrack) -> Result<Vec<Optioned<f64>>> {
    track.validate()?;

    // Forecast snapshot closest to the middle of the flight.
    let mid_time = track.times()[track.len() / 2];
    let time_idx = closest_time_index(field.times(), mid_time);

    let levels = field.levels();

    let values = izip!(
        track.latitude_profile(),
        track.longitude_profile(),
        track.pressure_profile(),
        track.observation_profile()
    )
    .map(|(&lat, &lon, p_opt, obs_opt)| {
        // Masked input sample, masked output. Do not interpolate over gaps.
        let p = match (p_opt.into_option(), obs_opt.is_some()) {
            (Some(p), true) => p,
            _ => return none(),
        };

        let (below, above) = level_above_below(p, levels);

        let val_below = bilinear(field.lats(), field.lons(), field.plane(time_idx, below), lat, lon);
        if below == above {
            // Clamped at the edge of the level range.
            return some(val_below);
        }
        let val_above = bilinear(field.lats(), field.lons(), field.plane(time_idx, above), lat, lon);

        some(linear_interp(p, levels[below], levels[above], val_below, val_above))
    })
    .collect();

    Ok(values)
}

/// Find the indices of the pressure levels above and below the given `pressure`.
///
/// Assumes `levels` is non-empty and sorted by increasing pressure, as guaranteed by
/// [`GridField`]. Returns `(j, j + 1)` where `j` is the last index with
/// `levels[j] < pressure`. Pressures at or beyond either end of the range clamp to
/// that end, returning the same index twice; no out-of-bounds index is ever produced.
pub fn level_above_below(pressure: HectoPascal, levels: &[HectoPascal]) -> (usize, usize) {
    bracket(levels, pressure)
}

// Same clamped bracket, shared by the vertical and horizontal axes.
fn bracket<T>(coords: &[T], target: T) -> (usize, usize)
where
    T: PartialOrd + Copy,
{
    debug_assert!(!coords.is_empty());

    let last = coords.len() - 1;
    if target >= coords[last] {
        (last, last)
    } else if target <= coords[0] {
        (0, 0)
    } else {
        let j = coords
            .iter()
            .rposition(|&c| c < target)
            .unwrap_or(0);
        (j, j + 1)
    }
}

// Bilinear interpolation on one lat-major horizontal plane. Points outside the grid
// clamp to the nearest edge.
fn bilinear(lats: &[f64], lons: &[f64], plane: &[f64], lat: f64, lon: f64) -> f64 {
    debug_assert_eq!(plane.len(), lats.len() * lons.len());

    let (i0, i1) = bracket(lats, lat);
    let (j0, j1) = bracket(lons, lon);

    let nlon = lons.len();
    let at = |i: usize, j: usize| plane[i * nlon + j];

    let ty = if i0 == i1 {
        0.0
    } else {
        (lat - lats[i0]) / (lats[i1] - lats[i0])
    };
    let tx = if j0 == j1 {
        0.0
    } else {
        (lon - lons[j0]) / (lons[j1] - lons[j0])
    };

    let south = at(i0, j0) + (at(i0, j1) - at(i0, j0)) * tx;
    let north = at(i1, j0) + (at(i1, j1) - at(i1, j0)) * tx;

    south + (north - south) * ty
}

fn closest_time_index(times: &[NaiveDateTime], target: NaiveDateTime) -> usize {
    debug_assert!(!times.is_empty());

    times
        .iter()
        .position_min_by_key(|&&t| (t - target).num_seconds().abs())
        .unwrap_or(0)
}

#[inline]
pub(crate) fn linear_interp<X, Y>(x_val: X, x1: X, x2: X, y1: Y, y2: Y) -> Y
where
    X: Sub<X> + Copy + std::fmt::Debug + std::cmp::PartialEq,
    <X as Sub<X>>::Output: Quantity,
    Y: Quantity + Sub<Y>,
    <Y as Sub<Y>>::Output: Quantity,
{
    debug_assert_ne!(x1, x2);

    let run = (x2 - x1).unpack();
    let rise = (y2 - y1).unpack();
    let dx = (x_val - x1).unpack();

    Y::pack(y1.unpack() + dx * (rise / run))
}

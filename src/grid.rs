//! Data type and methods to store a gridded forecast field.

use crate::error::{AnalysisError, Result};
use chrono::NaiveDateTime;
use itertools::Itertools;
use metfor::{HectoPascal, Quantity};

/// A forecast field on a regular (time, level, latitude, longitude) grid.
///
/// The field is read-only once constructed. Coordinate arrays are strictly monotonic;
/// latitude and level axes supplied in descending order are flipped to ascending at
/// construction, along with the corresponding axes of the field, so downstream
/// interpolation can always assume ascending coordinates.
#[derive(Clone, Debug)]
pub struct GridField {
    lats: Vec<f64>,
    lons: Vec<f64>,
    levels: Vec<HectoPascal>,
    times: Vec<NaiveDateTime>,
    // Flattened in (time, level, lat, lon) C order.
    values: Vec<f64>,
}

impl GridField {
    /// Build a field from its coordinate arrays and flattened values.
    ///
    /// `values` must be in (time, level, lat, lon) C order with length equal to the
    /// product of the coordinate lengths. Longitudes and times must be strictly
    /// ascending; latitudes and levels may be strictly descending and are normalized.
    pub fn new(
        lats: Vec<f64>,
        lons: Vec<f64>,
        levels: Vec<HectoPascal>,
        times: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if lats.is_empty() {
            return Err(AnalysisError::EmptyCoordinate("latitude"));
        }
        if lons.is_empty() {
            return Err(AnalysisError::EmptyCoordinate("longitude"));
        }
        if levels.is_empty() {
            return Err(AnalysisError::EmptyCoordinate("level"));
        }
        if times.is_empty() {
            return Err(AnalysisError::EmptyCoordinate("time"));
        }

        if values.len() != times.len() * levels.len() * lats.len() * lons.len() {
            return Err(AnalysisError::ShapeMismatch);
        }

        if !is_strictly_ascending(&lons) {
            return Err(AnalysisError::NonMonotonicCoordinate("longitude"));
        }
        if !times.iter().tuple_windows().all(|(t0, t1)| t0 < t1) {
            return Err(AnalysisError::NonMonotonicCoordinate("time"));
        }

        let mut field = GridField {
            lats,
            lons,
            levels,
            times,
            values,
        };

        match direction(&field.lats) {
            Some(Direction::Ascending) => {}
            Some(Direction::Descending) => field.flip_latitude_axis(),
            None => return Err(AnalysisError::NonMonotonicCoordinate("latitude")),
        }

        let level_values: Vec<f64> = field.levels.iter().map(|lvl| lvl.unpack()).collect();
        match direction(&level_values) {
            Some(Direction::Ascending) => {}
            Some(Direction::Descending) => field.flip_level_axis(),
            None => return Err(AnalysisError::NonMonotonicCoordinate("level")),
        }

        Ok(field)
    }

    /// Latitude coordinates in degrees, strictly ascending.
    #[inline]
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates in degrees, strictly ascending.
    #[inline]
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Pressure levels, strictly ascending.
    #[inline]
    pub fn levels(&self) -> &[HectoPascal] {
        &self.levels
    }

    /// Forecast valid times, strictly ascending.
    #[inline]
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// The horizontal (lat, lon) slab for one forecast time and one level.
    ///
    /// The slab is contiguous, `lats().len() * lons().len()` long, lat-major.
    #[inline]
    pub fn plane(&self, time_idx: usize, level_idx: usize) -> &[f64] {
        debug_assert!(time_idx < self.times.len() && level_idx < self.levels.len());

        let plane_len = self.lats.len() * self.lons.len();
        let start = (time_idx * self.levels.len() + level_idx) * plane_len;
        &self.values[start..start + plane_len]
    }

    fn flip_latitude_axis(&mut self) {
        let nlon = self.lons.len();
        let nlat = self.lats.len();
        let plane_len = nlat * nlon;

        self.lats.reverse();
        for plane in self.values.chunks_exact_mut(plane_len) {
            reverse_rows(plane, nlat, nlon);
        }
    }

    fn flip_level_axis(&mut self) {
        let nl = self.levels.len();
        let plane_len = self.lats.len() * self.lons.len();

        self.levels.reverse();
        for block in self.values.chunks_exact_mut(nl * plane_len) {
            reverse_rows(block, nl, plane_len);
        }
    }
}

enum Direction {
    Ascending,
    Descending,
}

// None means not strictly monotonic.
fn direction(xs: &[f64]) -> Option<Direction> {
    if is_strictly_ascending(xs) {
        Some(Direction::Ascending)
    } else if xs.len() < 2 || xs.windows(2).all(|w| w[0] > w[1]) {
        Some(Direction::Descending)
    } else {
        None
    }
}

fn is_strictly_ascending(xs: &[f64]) -> bool {
    xs.windows(2).all(|w| w[0] < w[1])
}

// Reverse the row order of a flattened (nrows, ncols) slab in place.
fn reverse_rows(slab: &mut [f64], nrows: usize, ncols: usize) {
    debug_assert_eq!(slab.len(), nrows * ncols);

    for i in 0..nrows / 2 {
        let (head, tail) = slab.split_at_mut((nrows - 1 - i) * ncols);
        head[i * ncols..(i + 1) * ncols].swap_with_slice(&mut tail[..ncols]);
    }
}

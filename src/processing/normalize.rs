// src/processing/normalize.rs
use itertools::{Itertools, MinMaxResult};

use crate::error::CalcError;
use crate::Raster;

/// Min-max rescale of a band to [0, 1]: `(x - min) / (max - min)`.
///
/// Pure; always allocates a new array. A constant band has no spectral
/// information and would divide by zero, so it is rejected with
/// [`CalcError::DegenerateBand`] instead of producing NaN.
pub fn normalize_band(band: &Raster) -> Result<Raster, CalcError> {
    if band.is_empty() {
        return Err(CalcError::InvalidInput("band is empty".to_string()));
    }
    if band.iter().any(|v| !v.is_finite()) {
        return Err(CalcError::InvalidInput(
            "band contains non-finite samples".to_string(),
        ));
    }

    let (min, max) = match band.iter().copied().minmax() {
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::NoElements => unreachable!("empty band rejected above"),
    };

    let span = max - min;
    if span == 0.0 {
        return Err(CalcError::DegenerateBand);
    }

    Ok(band.mapv(|v| (v - min) / span))
}

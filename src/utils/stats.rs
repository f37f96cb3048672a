// src/utils/stats.rs
use crate::Raster;

/// Finite (min, max) over a band, skipping NaN/inf samples.
/// Returns None when the band holds no finite value at all.
pub fn value_range(band: &Raster) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for &v in band.iter().filter(|v| v.is_finite()) {
        range = match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        };
    }
    range
}

/// Fixed-bin histogram of the finite samples in a band.
/// Bin width spans the finite value range; the max value lands in the last bin.
pub fn histogram(band: &Raster, bins: usize) -> Vec<u32> {
    let mut counts = vec![0u32; bins];
    let Some((lo, hi)) = value_range(band) else {
        return counts;
    };
    let span = hi - lo;
    if span == 0.0 {
        counts[0] = band.iter().filter(|v| v.is_finite()).count() as u32;
        return counts;
    }
    for &v in band.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / span) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

// src/processing/calculator.rs
use std::path::Path;

use log::debug;

use crate::display::{self, Colormap};
use crate::error::CalcError;
use crate::io::{reader, writer};
use crate::processing::normalize::normalize_band;
use crate::Raster;

/// Trait for spectral index calculators
pub trait IndexCalculator {
    /// Calculate the index from the provided normalized input bands
    fn calculate(&self, bands: &[Raster]) -> Raster;

    /// Return the number of required input bands
    fn required_bands(&self) -> usize;

    /// Return the name of the index
    fn name(&self) -> &str;
}

/// Shared load/normalize/cache/validate pipeline around one index.
///
/// Construction reads and normalizes every source band; the computed result
/// is cached on the instance and only replaced by another `calculate_band`
/// call. `show` and `export` refuse to run before the first computation.
#[derive(Debug)]
pub struct BandCalculator<I: IndexCalculator> {
    index: I,
    bands: Vec<Raster>,
    result: Option<Raster>,
}

impl<I: IndexCalculator> BandCalculator<I> {
    /// Read every band from disk, then validate and normalize.
    pub fn from_paths<P: AsRef<Path>>(index: I, paths: &[P]) -> Result<Self, CalcError> {
        let mut raw = Vec::with_capacity(paths.len());
        for path in paths {
            raw.push(reader::read_band(path.as_ref())?);
        }
        Self::from_bands(index, raw)
    }

    /// Validate raw bands and normalize each one into an owned copy.
    pub fn from_bands(index: I, raw: Vec<Raster>) -> Result<Self, CalcError> {
        if raw.len() != index.required_bands() {
            return Err(CalcError::InvalidInput(format!(
                "{} requires {} bands, got {}",
                index.name(),
                index.required_bands(),
                raw.len()
            )));
        }

        let expected = raw[0].dim();
        for band in &raw[1..] {
            if band.dim() != expected {
                return Err(CalcError::ShapeMismatch {
                    expected,
                    found: band.dim(),
                });
            }
        }

        let bands = raw
            .iter()
            .map(normalize_band)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "{}: {} bands of {}x{} normalized",
            index.name(),
            bands.len(),
            expected.0,
            expected.1
        );

        Ok(Self {
            index,
            bands,
            result: None,
        })
    }

    /// Compute the index and cache the result on this instance.
    ///
    /// Recomputes on every call; with unchanged bands the result is
    /// bit-identical each time. Zero denominators inside the formula
    /// propagate as IEEE NaN/inf and are never clamped.
    pub fn calculate_band(&mut self) -> Result<&Raster, CalcError> {
        let result = self.index.calculate(&self.bands);
        self.result = Some(result);
        Ok(self.result.as_ref().unwrap())
    }

    /// The cached result, or `NotComputed` before the first calculation.
    pub fn result(&self) -> Result<&Raster, CalcError> {
        self.result
            .as_ref()
            .ok_or_else(|| CalcError::NotComputed(self.index.name().to_string()))
    }

    pub fn name(&self) -> &str {
        self.index.name()
    }

    /// Render the cached result as a titled quick-look PNG.
    pub fn show(&self, title: &str, colormap: Colormap, out: &Path) -> Result<(), CalcError> {
        let band = self.result()?;
        display::display_band(title, band, colormap, out)
    }

    /// Persist the cached result as a float-preserving TIFF.
    pub fn export(&self, path: &Path) -> Result<(), CalcError> {
        let band = self.result()?;
        writer::write_band(path, band)
    }
}

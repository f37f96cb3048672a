// src/processing/composite.rs
use std::path::Path;

use ndarray::{stack, Array3, Axis};

use crate::display;
use crate::error::CalcError;
use crate::processing::normalize::normalize_band;
use crate::Raster;

/// Three-band quick-look compositor.
///
/// Holds the raw bands in (red, green, blue) order; `stack` normalizes each
/// one and stacks them along a new trailing channel axis. The stack is
/// cached on the instance; a new composition requires a new instance.
#[derive(Debug)]
pub struct Composite {
    bands: [Raster; 3],
    stack: Option<Array3<f64>>,
}

impl Composite {
    pub fn new(red: Raster, green: Raster, blue: Raster) -> Result<Self, CalcError> {
        let expected = red.dim();
        for band in [&green, &blue] {
            if band.dim() != expected {
                return Err(CalcError::ShapeMismatch {
                    expected,
                    found: band.dim(),
                });
            }
        }
        Ok(Self {
            bands: [red, green, blue],
            stack: None,
        })
    }

    /// Normalize every band and stack along a new channel axis, caching the
    /// result. Output shape is (height, width, 3).
    pub fn stack(&mut self) -> Result<&Array3<f64>, CalcError> {
        let normalized = self
            .bands
            .iter()
            .map(normalize_band)
            .collect::<Result<Vec<_>, _>>()?;
        let views: Vec<_> = normalized.iter().map(|b| b.view()).collect();
        self.stack = Some(stack(Axis(2), &views)?);
        Ok(self.stack.as_ref().unwrap())
    }

    /// Render the composite as a titled RGB PNG, stacking lazily if no
    /// stack is cached yet.
    pub fn show(&mut self, title: &str, out: &Path) -> Result<(), CalcError> {
        if self.stack.is_none() {
            self.stack()?;
        }
        display::display_rgb(title, self.stack.as_ref().unwrap(), out)
    }
}

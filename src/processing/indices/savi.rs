// src/processing/indices/savi.rs
use crate::processing::calculator::IndexCalculator;
use crate::Raster;

/// Soil Adjusted Vegetation Index (SAVI) calculator
///
/// Band order: RED, NIR. The soil adjustment factor L defaults to 0.5.
pub struct SAVI {
    soil_factor: f64,
    name: String,
}

impl SAVI {
    pub fn new(soil_factor: f64, name: Option<String>) -> Self {
        Self {
            soil_factor,
            name: name.unwrap_or_else(|| "SAVI".to_string()),
        }
    }
}

impl Default for SAVI {
    fn default() -> Self {
        Self::new(0.5, None)
    }
}

impl IndexCalculator for SAVI {
    fn calculate(&self, bands: &[Raster]) -> Raster {
        let red = &bands[0];
        let nir = &bands[1];
        let l = self.soil_factor;

        // SAVI = ((NIR - RED) / (NIR + RED + L)) * (1 + L)
        ((nir - red) / (nir + red + l)) * (1.0 + l)
    }

    fn required_bands(&self) -> usize {
        2 // SAVI requires exactly 2 bands (RED, NIR)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

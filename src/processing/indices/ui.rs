// src/processing/indices/ui.rs
use crate::processing::calculator::IndexCalculator;
use crate::Raster;

/// Urban Index (UI) calculator
///
/// Band order: SWIR2, NIR. Built-up areas come out positive.
pub struct UI {
    name: String,
}

impl UI {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| "UI".to_string()),
        }
    }
}

impl IndexCalculator for UI {
    fn calculate(&self, bands: &[Raster]) -> Raster {
        let swir2 = &bands[0];
        let nir = &bands[1];

        // UI = (SWIR2 - NIR) / (SWIR2 + NIR)
        (swir2 - nir) / (swir2 + nir)
    }

    fn required_bands(&self) -> usize {
        2 // UI requires exactly 2 bands
    }

    fn name(&self) -> &str {
        &self.name
    }
}

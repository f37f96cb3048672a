// src/io/writer.rs
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::debug;
use tiff::encoder::{colortype, TiffEncoder};

use crate::error::CalcError;
use crate::Raster;

/// Write a band as a single-strip Gray32Float TIFF.
///
/// Samples are narrowed to f32, which keeps index values (typically in
/// [-1, 1]) and component loadings lossless enough for round-tripping.
pub fn write_band(path: &Path, band: &Raster) -> Result<(), CalcError> {
    let (height, width) = band.dim();
    let data: Vec<f32> = band.iter().map(|&v| v as f32).collect();

    let file = File::create(path)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<colortype::Gray32Float>(width as u32, height as u32, &data)?;

    debug!("wrote {}x{} band to {}", height, width, path.display());
    Ok(())
}

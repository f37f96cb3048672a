// src/io/reader.rs
use std::fs::File;
use std::path::Path;

use log::debug;
use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};

use crate::error::CalcError;
use crate::Raster;

/// Read a single-band raster from a TIFF file, widening samples to f64.
pub fn read_band(path: &Path) -> Result<Raster, CalcError> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let shape = (height as usize, width as usize);

    let band = match decoder.read_image()? {
        DecodingResult::U8(buf) => {
            Array2::from_shape_vec(shape, buf.into_iter().map(|v| v as f64).collect())?
        }
        DecodingResult::U16(buf) => {
            Array2::from_shape_vec(shape, buf.into_iter().map(|v| v as f64).collect())?
        }
        DecodingResult::U32(buf) => {
            Array2::from_shape_vec(shape, buf.into_iter().map(|v| v as f64).collect())?
        }
        DecodingResult::F32(buf) => {
            Array2::from_shape_vec(shape, buf.into_iter().map(|v| v as f64).collect())?
        }
        DecodingResult::F64(buf) => Array2::from_shape_vec(shape, buf)?,
        _ => return Err(CalcError::UnsupportedPixelFormat),
    };

    debug!("read {}x{} band from {}", shape.0, shape.1, path.display());
    Ok(band)
}

/// Read every raster matched by a glob pattern, in alphabetical order.
///
/// The yield order defines the row order of any decomposition fitted on
/// the collection, so fits are reproducible without a manifest.
pub fn read_collection(pattern: &str) -> Result<Vec<Raster>, CalcError> {
    let paths = glob::glob(pattern)
        .map_err(|e| CalcError::InvalidInput(format!("bad collection pattern: {e}")))?;

    let mut images = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| CalcError::Io(e.into_error()))?;
        images.push(read_band(&path)?);
    }
    Ok(images)
}

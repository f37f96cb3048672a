// src/processing/pca.rs
use std::fs;
use std::path::Path;

use log::{debug, info};
use nalgebra::DMatrix;
use ndarray::Array2;

use crate::display;
use crate::error::CalcError;
use crate::io::{reader, writer};
use crate::Raster;

/// Principal-component decomposition over a collection of co-registered
/// rasters.
///
/// Every image is flattened to one row of an observation matrix; the
/// right-singular vectors of the column-centered matrix are the principal
/// axes, reshaped back to the collection's image shape. Components are held
/// in descending singular-value order exactly as the SVD yields them.
pub struct Pca {
    components: Vec<Raster>,
    explained_variance_ratio: Vec<f64>,
    default_shape: Option<(usize, usize)>,
}

impl Pca {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            explained_variance_ratio: Vec::new(),
            default_shape: None,
        }
    }

    /// Load every raster matched by `pattern` and fit the decomposition.
    pub fn fit(&mut self, pattern: &str) -> Result<(), CalcError> {
        let images = reader::read_collection(pattern)?;
        if images.is_empty() {
            return Err(CalcError::EmptyCollection(pattern.to_string()));
        }
        self.fit_images(images)
    }

    /// Fit the decomposition on an in-memory collection.
    ///
    /// Requires every image to match the first image's shape. The number of
    /// fitted components is `min(n_images, n_pixels)`.
    pub fn fit_images(&mut self, images: Vec<Raster>) -> Result<(), CalcError> {
        if images.is_empty() {
            return Err(CalcError::EmptyCollection("in-memory collection".to_string()));
        }

        let shape = images[0].dim();
        for img in &images[1..] {
            if img.dim() != shape {
                return Err(CalcError::ShapeMismatch {
                    expected: shape,
                    found: img.dim(),
                });
            }
        }
        if images.iter().any(|img| img.iter().any(|v| !v.is_finite())) {
            return Err(CalcError::InvalidInput(
                "collection contains non-finite samples".to_string(),
            ));
        }

        let n = images.len();
        let p = shape.0 * shape.1;

        // Row per image, flattened row-major.
        let mut matrix = DMatrix::from_row_iterator(
            n,
            p,
            images.iter().flat_map(|img| img.iter().copied()),
        );

        // Center each pixel column across the collection.
        let mean = matrix.row_mean();
        for mut row in matrix.row_iter_mut() {
            row -= &mean;
        }

        let svd = matrix.svd(false, true);
        let v_t = svd
            .v_t
            .expect("right-singular vectors requested from svd");

        let total: f64 = svd.singular_values.iter().map(|s| s * s).sum();
        self.explained_variance_ratio = svd
            .singular_values
            .iter()
            .map(|s| if total > 0.0 { s * s / total } else { 0.0 })
            .collect();

        self.components = v_t
            .row_iter()
            .map(|row| Array2::from_shape_vec(shape, row.iter().copied().collect()))
            .collect::<Result<Vec<_>, _>>()?;
        self.default_shape = Some(shape);

        debug!(
            "fitted {} components from {} images of {}x{}",
            self.components.len(),
            n,
            shape.0,
            shape.1
        );
        Ok(())
    }

    /// Fitted components ranked by descending explained variance.
    /// Empty before `fit`.
    pub fn components(&self) -> &[Raster] {
        &self.components
    }

    /// Fraction of total variance captured by each component, in rank order.
    pub fn explained_variance_ratio(&self) -> &[f64] {
        &self.explained_variance_ratio
    }

    pub fn default_shape(&self) -> Option<(usize, usize)> {
        self.default_shape
    }

    /// Render one grayscale quick-look and one histogram per component
    /// into `dir` as `PCA<rank>.png` / `PCA<rank>_hist.png`.
    pub fn show(&self, dir: &Path) -> Result<(), CalcError> {
        if self.components.is_empty() {
            return Err(CalcError::NotFitted);
        }
        for (i, component) in self.components.iter().enumerate() {
            let rank = i + 1;
            display::display_band(
                &format!("PCA Band {rank}"),
                component,
                display::Colormap::Gray,
                &dir.join(format!("PCA{rank}.png")),
            )?;
            display::display_histogram(
                &format!("Histogram of PCA Band {rank}"),
                component,
                &dir.join(format!("PCA{rank}_hist.png")),
            )?;
        }
        Ok(())
    }

    /// Write each component as `PCA<rank>.tif` into `dir`, rank order,
    /// starting at 1.
    ///
    /// The target directory is pre-checked before any file is written;
    /// components already exported when a later write fails stay on disk.
    pub fn export(&self, dir: &Path) -> Result<(), CalcError> {
        if self.components.is_empty() {
            return Err(CalcError::NotFitted);
        }
        if !dir.is_dir() {
            return Err(CalcError::DirectoryNotFound(dir.to_path_buf()));
        }
        if fs::metadata(dir)?.permissions().readonly() {
            return Err(CalcError::PermissionDenied(dir.to_path_buf()));
        }

        for (i, component) in self.components.iter().enumerate() {
            let rank = i + 1;
            let path = dir.join(format!("PCA{rank}.tif"));
            writer::write_band(&path, component)?;
            info!("PCA component {} saved at {}", rank, path.display());
        }
        Ok(())
    }
}

impl Default for Pca {
    fn default() -> Self {
        Self::new()
    }
}

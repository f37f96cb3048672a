// tests/unit_tests.rs
use ndarray::Array2;

use spectral_calc::error::CalcError;
use spectral_calc::io::{read_band, read_collection, write_band};
use spectral_calc::processing::indices::{AFVI, BI, NDVI, NDWI, SAVI, UI};
use spectral_calc::processing::{
    normalize_band, BandCalculator, Composite, IndexCalculator, Pca,
};
use spectral_calc::Raster;

/// Helper to build a band with a repeating value pattern
fn band(height: usize, width: usize, values: &[f64]) -> Raster {
    Array2::from_shape_fn((height, width), |(y, x)| {
        values[(y * width + x) % values.len()]
    })
}

/// Helper for an ascending gradient band covering [0, limit)
fn gradient(height: usize, width: usize) -> Raster {
    Array2::from_shape_fn((height, width), |(y, x)| (y * width + x) as f64)
}

#[test]
fn test_normalize_range() {
    let normalized = normalize_band(&band(3, 4, &[2.0, 4.0, 6.0, 10.0])).unwrap();

    let min = normalized.iter().copied().fold(f64::INFINITY, f64::min);
    let max = normalized.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(min, 0.0);
    assert_eq!(max, 1.0);

    // (4 - 2) / (10 - 2) = 0.25
    assert!((normalized[[0, 1]] - 0.25).abs() < 1e-12);
}

#[test]
fn test_normalize_constant_band_rejected() {
    let err = normalize_band(&band(2, 2, &[7.5])).unwrap_err();
    assert!(matches!(err, CalcError::DegenerateBand));
}

#[test]
fn test_normalize_invalid_input() {
    let empty = Array2::<f64>::zeros((0, 0));
    assert!(matches!(
        normalize_band(&empty).unwrap_err(),
        CalcError::InvalidInput(_)
    ));

    let with_nan = band(2, 2, &[1.0, f64::NAN, 3.0, 4.0]);
    assert!(matches!(
        normalize_band(&with_nan).unwrap_err(),
        CalcError::InvalidInput(_)
    ));
}

/// Test NDVI formula with known normalized values
#[test]
fn test_ndvi_calculation() {
    // red = 0.2, nir = 0.8 everywhere: (0.8 - 0.2) / (0.8 + 0.2) = 0.6
    let red = band(2, 2, &[0.2]);
    let nir = band(2, 2, &[0.8]);

    let ndvi = NDVI::new(None);
    let result = ndvi.calculate(&[red, nir]);

    for &value in result.iter() {
        assert!((value - 0.6).abs() < 1e-12, "Expected 0.6, got {}", value);
    }
}

/// Test SAVI formula with known normalized values
#[test]
fn test_savi_calculation() {
    // red = 0.3, nir = 0.7, L = 0.5: ((0.7-0.3)/(0.7+0.3+0.5)) * 1.5 = 0.4
    let red = band(2, 3, &[0.3]);
    let nir = band(2, 3, &[0.7]);

    let savi = SAVI::new(0.5, None);
    let result = savi.calculate(&[red, nir]);

    for &value in result.iter() {
        assert!((value - 0.4).abs() < 1e-12, "Expected 0.4, got {}", value);
    }
}

#[test]
fn test_remaining_index_formulas() {
    // NDWI: (0.6 - 0.2) / (0.6 + 0.2) = 0.5, water positive
    let result = NDWI::new(None).calculate(&[band(2, 2, &[0.6]), band(2, 2, &[0.2])]);
    assert!((result[[0, 0]] - 0.5).abs() < 1e-12);

    // AFVI: (0.8 - 0.66) * (0.5 / (0.8 + 0.66 * 0.5))
    let result = AFVI::new(None).calculate(&[band(2, 2, &[0.5]), band(2, 2, &[0.8])]);
    let expected = (0.8 - 0.66) * (0.5 / (0.8 + 0.66 * 0.5));
    assert!((result[[1, 1]] - expected).abs() < 1e-12);

    // UI: (0.9 - 0.3) / (0.9 + 0.3) = 0.5, built-up positive
    let result = UI::new(None).calculate(&[band(2, 2, &[0.9]), band(2, 2, &[0.3])]);
    assert!((result[[0, 1]] - 0.5).abs() < 1e-12);

    // BI: ((0.9 - 0.2) - 0.3) / ((0.9 + 0.2) + 0.3) = 0.4 / 1.4
    let result = BI::new(None).calculate(&[
        band(2, 2, &[0.2]),
        band(2, 2, &[0.3]),
        band(2, 2, &[0.9]),
    ]);
    assert!((result[[0, 0]] - 0.4 / 1.4).abs() < 1e-12);
}

#[test]
fn test_zero_denominator_propagates() {
    // nir + red == 0 must surface as a detectable non-finite value,
    // never a clamped or sentinel number.
    let result = NDVI::new(None).calculate(&[band(1, 2, &[0.0]), band(1, 2, &[0.0])]);
    assert!(result.iter().all(|v| v.is_nan()));
}

#[test]
fn test_calculator_requires_compute_before_use() {
    let red = gradient(4, 4);
    let nir = gradient(4, 4).mapv(|v| 15.0 - v);
    let calc = BandCalculator::from_bands(NDVI::new(None), vec![red, nir]).unwrap();

    assert!(matches!(calc.result(), Err(CalcError::NotComputed(_))));

    let dir = tempfile::tempdir().unwrap();
    let err = calc.export(&dir.path().join("ndvi.tif")).unwrap_err();
    assert!(matches!(err, CalcError::NotComputed(_)));

    let err = calc
        .show(
            "NDVI",
            spectral_calc::display::Colormap::Gray,
            &dir.path().join("ndvi.png"),
        )
        .unwrap_err();
    assert!(matches!(err, CalcError::NotComputed(_)));
}

#[test]
fn test_calculate_band_is_idempotent() {
    let red = gradient(4, 4);
    let nir = gradient(4, 4).mapv(|v| 15.0 - v);
    let mut calc = BandCalculator::from_bands(NDVI::new(None), vec![red, nir]).unwrap();

    let first = calc.calculate_band().unwrap().clone();
    let second = calc.calculate_band().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(calc.result().unwrap(), &second);
}

#[test]
fn test_calculator_construction_checks() {
    // Band count must match the index
    let err = BandCalculator::from_bands(NDVI::new(None), vec![gradient(2, 2)]).unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput(_)));

    // All bands must share one shape
    let err =
        BandCalculator::from_bands(NDVI::new(None), vec![gradient(2, 2), gradient(3, 2)])
            .unwrap_err();
    assert!(matches!(err, CalcError::ShapeMismatch { .. }));

    // Degenerate source bands are rejected at construction
    let err =
        BandCalculator::from_bands(NDVI::new(None), vec![band(2, 2, &[1.0]), gradient(2, 2)])
            .unwrap_err();
    assert!(matches!(err, CalcError::DegenerateBand));
}

fn sample_collection() -> Vec<Raster> {
    (0..4)
        .map(|k| gradient(6, 5).mapv(|v| v * (k + 1) as f64 + (k * k) as f64))
        .collect()
}

#[test]
fn test_pca_component_shapes_and_rank() {
    let mut pca = Pca::new();
    pca.fit_images(sample_collection()).unwrap();

    let components = pca.components();
    assert!(!components.is_empty());
    assert!(components.len() <= 4);
    for component in components {
        assert_eq!(component.dim(), (6, 5));
    }
    assert_eq!(pca.default_shape(), Some((6, 5)));

    // Ranked by descending explained variance, ratios summing to one
    let ratios = pca.explained_variance_ratio();
    assert_eq!(ratios.len(), components.len());
    for pair in ratios.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
    let total: f64 = ratios.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_pca_input_validation() {
    let mut pca = Pca::new();
    assert!(matches!(
        pca.fit_images(Vec::new()).unwrap_err(),
        CalcError::EmptyCollection(_)
    ));

    assert!(matches!(
        pca.fit("no_such_directory_xyz/*.tif").unwrap_err(),
        CalcError::EmptyCollection(_)
    ));

    let images = vec![gradient(3, 3), gradient(4, 3)];
    assert!(matches!(
        pca.fit_images(images).unwrap_err(),
        CalcError::ShapeMismatch { .. }
    ));
}

#[test]
fn test_pca_show_and_export_require_fit() {
    let pca = Pca::new();
    assert!(pca.components().is_empty());

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        pca.export(dir.path()).unwrap_err(),
        CalcError::NotFitted
    ));
    assert!(matches!(
        pca.show(dir.path()).unwrap_err(),
        CalcError::NotFitted
    ));
}

#[test]
fn test_pca_export_checks_directory_first() {
    let mut pca = Pca::new();
    pca.fit_images(sample_collection()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let err = pca.export(&missing).unwrap_err();
    assert!(matches!(err, CalcError::DirectoryNotFound(_)));
    // Pre-check fires before any file is written
    assert!(!missing.exists());
}

#[test]
fn test_pca_export_roundtrip() {
    let mut pca = Pca::new();
    pca.fit_images(sample_collection()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    pca.export(dir.path()).unwrap();

    for rank in 1..=pca.components().len() {
        let path = dir.path().join(format!("PCA{rank}.tif"));
        assert!(path.exists(), "missing component file {}", path.display());
        let reread = read_band(&path).unwrap();
        assert_eq!(reread.dim(), (6, 5));
    }
}

#[test]
fn test_writer_reader_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("band.tif");

    let original = gradient(7, 3).mapv(|v| v / 20.0 - 0.5);
    write_band(&path, &original).unwrap();
    let reread = read_band(&path).unwrap();

    assert_eq!(reread.dim(), original.dim());
    for (&a, &b) in original.iter().zip(reread.iter()) {
        assert!((a - b).abs() < 1e-6, "Expected {}, got {}", a, b);
    }
}

#[test]
fn test_collection_reads_in_alphabetical_order() {
    let dir = tempfile::tempdir().unwrap();
    write_band(&dir.path().join("b.tif"), &band(2, 2, &[5.0, 1.0, 2.0, 3.0])).unwrap();
    write_band(&dir.path().join("a.tif"), &band(2, 2, &[9.0, 1.0, 2.0, 3.0])).unwrap();

    let pattern = format!("{}/*.tif", dir.path().display());
    let images = read_collection(&pattern).unwrap();
    assert_eq!(images.len(), 2);
    assert!((images[0][[0, 0]] - 9.0).abs() < 1e-6);
    assert!((images[1][[0, 0]] - 5.0).abs() < 1e-6);
}

#[test]
fn test_composite_stack_shape_and_order() {
    let red = gradient(4, 4);
    let green = gradient(4, 4).mapv(|v| 15.0 - v);
    let blue = band(4, 4, &[0.0, 2.0, 4.0, 8.0]);

    let mut composite = Composite::new(red.clone(), green, blue).unwrap();
    let stack = composite.stack().unwrap();
    assert_eq!(stack.dim(), (4, 4, 3));

    // Channel 0 carries the normalized red band in the order given
    let normalized_red = normalize_band(&red).unwrap();
    for ((y, x), &v) in normalized_red.indexed_iter() {
        assert_eq!(stack[[y, x, 0]], v);
    }
}

#[test]
fn test_composite_shape_mismatch() {
    let err = Composite::new(gradient(2, 2), gradient(2, 2), gradient(2, 3)).unwrap_err();
    assert!(matches!(err, CalcError::ShapeMismatch { .. }));
}

#[test]
fn test_batch_config_parsing() {
    let json = r#"{
        "operations": [
            {"type": "ndvi", "params": {"a": "red.tif", "b": "nir.tif"}, "output": "ndvi.tif"},
            {"type": "savi", "params": {"a": "red.tif", "b": "nir.tif", "l": 0.25}, "output": "savi.tif"},
            {"type": "pca", "params": {"collection": "scene/*.tif"}, "output": "components"}
        ]
    }"#;

    let config: spectral_calc::batch::BatchConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.global.colormap, "gray");
    assert_eq!(config.operations.len(), 3);

    use spectral_calc::batch::OperationParams;
    assert!(matches!(
        config.operations[0].params,
        OperationParams::TwoBandParams { .. }
    ));
    assert!(matches!(
        config.operations[1].params,
        OperationParams::SaviParams { l, .. } if (l - 0.25).abs() < 1e-12
    ));
    assert!(matches!(
        config.operations[2].params,
        OperationParams::PcaParams { .. }
    ));
}

// src/batch.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::display::Colormap;
use crate::io;
use crate::processing::indices::{AFVI, BI, NDVI, NDWI, SAVI, UI};
use crate::processing::{BandCalculator, Composite, IndexCalculator, Pca};

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GlobalParams {
    #[serde(default = "default_colormap")]
    pub colormap: String,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            colormap: default_colormap(),
        }
    }
}

fn default_colormap() -> String {
    "gray".to_string()
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    #[serde(rename = "type")]
    pub op_type: String,
    pub params: OperationParams,
    pub output: String,
    pub png: Option<String>,
    pub title: Option<String>,
    pub colormap: Option<String>,
}

/// Band parameters, keyed `a`/`b`/`c` in the index's documented band order.
/// SAVI takes its soil factor as `l`; PCA takes a glob pattern.
#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum OperationParams {
    SaviParams { a: String, b: String, l: f64 },
    PcaParams { collection: String },
    ThreeBandParams { a: String, b: String, c: String },
    TwoBandParams { a: String, b: String },
}

pub fn process_batch(config_path: &Path) -> Result<()> {
    // Read and parse configuration file
    let config_content = fs::read_to_string(config_path)?;
    let config: BatchConfig = serde_json::from_str(&config_content)?;

    println!(
        "Starting batch processing with {} operations...",
        config.operations.len()
    );

    // Process each operation
    for (i, op) in config.operations.iter().enumerate() {
        println!(
            "[{}/{}] Processing {} -> {}",
            i + 1,
            config.operations.len(),
            op.op_type,
            op.output
        );
        run_operation(op, &config.global)?;
    }

    Ok(())
}

fn run_operation(op: &Operation, global: &GlobalParams) -> Result<()> {
    match op.op_type.to_lowercase().as_str() {
        "ndvi" => match &op.params {
            OperationParams::TwoBandParams { a, b } => {
                run_index(NDVI::new(None), &[a, b], op, global)
            }
            _ => Err(invalid_params("NDVI")),
        },
        "ndwi" => match &op.params {
            OperationParams::TwoBandParams { a, b } => {
                run_index(NDWI::new(None), &[a, b], op, global)
            }
            _ => Err(invalid_params("NDWI")),
        },
        "savi" => match &op.params {
            OperationParams::SaviParams { a, b, l } => {
                run_index(SAVI::new(*l, None), &[a, b], op, global)
            }
            OperationParams::TwoBandParams { a, b } => {
                run_index(SAVI::default(), &[a, b], op, global)
            }
            _ => Err(invalid_params("SAVI")),
        },
        "afvi" => match &op.params {
            OperationParams::TwoBandParams { a, b } => {
                run_index(AFVI::new(None), &[a, b], op, global)
            }
            _ => Err(invalid_params("AFVI")),
        },
        "ui" => match &op.params {
            OperationParams::TwoBandParams { a, b } => run_index(UI::new(None), &[a, b], op, global),
            _ => Err(invalid_params("UI")),
        },
        "bi" => match &op.params {
            OperationParams::ThreeBandParams { a, b, c } => {
                run_index(BI::new(None), &[a, b, c], op, global)
            }
            _ => Err(invalid_params("BI")),
        },
        "composite" => match &op.params {
            OperationParams::ThreeBandParams { a, b, c } => {
                let red = io::read_band(Path::new(a))?;
                let green = io::read_band(Path::new(b))?;
                let blue = io::read_band(Path::new(c))?;
                let mut composite = Composite::new(red, green, blue)?;
                let title = op.title.as_deref().unwrap_or("Composite");
                composite.show(title, Path::new(&op.output))?;
                Ok(())
            }
            _ => Err(invalid_params("composite")),
        },
        "pca" => match &op.params {
            OperationParams::PcaParams { collection } => {
                let mut pca = Pca::new();
                pca.fit(collection)?;
                pca.export(Path::new(&op.output))?;
                if op.png.is_some() {
                    pca.show(Path::new(&op.output))?;
                }
                Ok(())
            }
            _ => Err(invalid_params("PCA")),
        },
        other => Err(anyhow::anyhow!("Unknown operation type: {}", other)),
    }
}

fn run_index<I: IndexCalculator>(
    index: I,
    paths: &[&String],
    op: &Operation,
    global: &GlobalParams,
) -> Result<()> {
    let paths: Vec<PathBuf> = paths.iter().map(|p| PathBuf::from(p.as_str())).collect();
    let mut calc = BandCalculator::from_paths(index, &paths)?;
    calc.calculate_band()?;
    calc.export(Path::new(&op.output))?;

    if let Some(png) = &op.png {
        let name = op.colormap.as_ref().unwrap_or(&global.colormap);
        let colormap = Colormap::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Unknown colormap: {}", name))?;
        let title = op.title.as_deref().unwrap_or_else(|| calc.name());
        calc.show(title, colormap, Path::new(png))?;
    }

    Ok(())
}

fn invalid_params(op: &str) -> anyhow::Error {
    anyhow::anyhow!("Invalid parameters for {} operation", op)
}

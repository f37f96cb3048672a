// src/main.rs
use anyhow::Result;
use clap::Parser;

mod batch;
mod cli;
mod display;
mod error;
mod io;
mod processing;
mod utils;

use std::path::{Path, PathBuf};

pub type Raster = ndarray::Array2<f64>;

use crate::cli::{Cli, Commands};
use crate::processing::indices::{AFVI, BI, NDVI, NDWI, SAVI, UI};
use crate::processing::{BandCalculator, Composite, IndexCalculator, Pca};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Ndvi { red, nir } => run_index(NDVI::new(None), &[red, nir], &cli)?,
        Commands::Ndwi { green, nir } => run_index(NDWI::new(None), &[green, nir], &cli)?,
        Commands::Savi {
            red,
            nir,
            soil_factor,
        } => run_index(SAVI::new(*soil_factor, None), &[red, nir], &cli)?,
        Commands::Afvi { swir1, nir } => run_index(AFVI::new(None), &[swir1, nir], &cli)?,
        Commands::Ui { swir2, nir } => run_index(UI::new(None), &[swir2, nir], &cli)?,
        Commands::Bi { green, red, nir } => run_index(BI::new(None), &[green, red, nir], &cli)?,
        Commands::Composite { red, green, blue } => {
            let red = io::read_band(red)?;
            let green = io::read_band(green)?;
            let blue = io::read_band(blue)?;
            let mut composite = Composite::new(red, green, blue)?;
            let out = cli
                .png
                .clone()
                .unwrap_or_else(|| PathBuf::from("composite.png"));
            let title = cli.title.as_deref().unwrap_or("Composite");
            composite.show(title, &out)?;
            println!("Composite written: {}", out.display());
        }
        Commands::Pca {
            collection,
            out_dir,
            show,
        } => {
            let mut pca = Pca::new();
            pca.fit(collection)?;
            println!("Fitted {} components", pca.components().len());
            pca.export(out_dir)?;
            if *show {
                pca.show(out_dir)?;
            }
            println!("Processing complete: {}", out_dir.display());
        }
        Commands::Batch { config } => batch::process_batch(config)?,
    }

    Ok(())
}

fn run_index<I: IndexCalculator, P: AsRef<Path>>(index: I, paths: &[P], cli: &Cli) -> Result<()> {
    let mut calc = BandCalculator::from_paths(index, paths)?;
    calc.calculate_band()?;
    calc.export(&cli.output)?;

    if let Some(png) = &cli.png {
        let title = cli.title.as_deref().unwrap_or_else(|| calc.name());
        calc.show(title, cli.colormap, png)?;
    }

    println!("Processing complete: {}", cli.output.display());
    Ok(())
}

// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::display::Colormap;

#[derive(Parser)]
#[command(name = "spectral-calc")]
#[command(about = "Spectral index and principal-component calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output file path
    #[arg(short, long, default_value = "output.tif", global = true)]
    pub output: PathBuf,

    /// Render a quick-look PNG to this path
    #[arg(long, global = true)]
    pub png: Option<PathBuf>,

    /// Colormap for quick-look rendering
    #[arg(long, value_enum, default_value = "gray", global = true)]
    pub colormap: Colormap,

    /// Figure title (defaults to the index name)
    #[arg(long, global = true)]
    pub title: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalized Difference Vegetation Index: (NIR-RED)/(NIR+RED)
    Ndvi {
        /// Red band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// NIR band
        #[arg(short = 'n', long)]
        nir: PathBuf,
    },

    /// Normalized Difference Water Index: (GREEN-NIR)/(GREEN+NIR)
    Ndwi {
        /// Green band
        #[arg(short = 'g', long)]
        green: PathBuf,

        /// NIR band
        #[arg(short = 'n', long)]
        nir: PathBuf,
    },

    /// Soil Adjusted Vegetation Index
    Savi {
        /// Red band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// NIR band
        #[arg(short = 'n', long)]
        nir: PathBuf,

        /// Soil adjustment factor (default: 0.5)
        #[arg(short = 'l', long, default_value = "0.5")]
        soil_factor: f64,
    },

    /// Aerosol Free Vegetation Index
    Afvi {
        /// SWIR1 band - typically Landsat band 6
        #[arg(short = 's', long)]
        swir1: PathBuf,

        /// NIR band
        #[arg(short = 'n', long)]
        nir: PathBuf,
    },

    /// Urban Index: (SWIR2-NIR)/(SWIR2+NIR)
    Ui {
        /// SWIR2 band - typically Landsat band 7
        #[arg(short = 's', long)]
        swir2: PathBuf,

        /// NIR band
        #[arg(short = 'n', long)]
        nir: PathBuf,
    },

    /// Bare Soil Index: ((NIR-GREEN)-RED)/((NIR+GREEN)+RED)
    Bi {
        /// Green band
        #[arg(short = 'g', long)]
        green: PathBuf,

        /// Red band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// NIR band
        #[arg(short = 'n', long)]
        nir: PathBuf,
    },

    /// Three-band RGB quick-look composite
    Composite {
        /// Red channel band
        #[arg(short = 'r', long)]
        red: PathBuf,

        /// Green channel band
        #[arg(short = 'g', long)]
        green: PathBuf,

        /// Blue channel band
        #[arg(short = 'b', long)]
        blue: PathBuf,
    },

    /// Principal-component decomposition of an image collection
    Pca {
        /// Glob pattern matching the image collection, e.g. "scene/*.tif"
        #[arg(short = 'c', long)]
        collection: String,

        /// Directory receiving PCA<rank>.tif components
        #[arg(short = 'd', long, default_value = ".")]
        out_dir: PathBuf,

        /// Also render quick-look and histogram PNGs per component
        #[arg(long)]
        show: bool,
    },

    /// Run a JSON batch configuration
    Batch {
        /// Batch configuration file
        #[arg(short = 'c', long)]
        config: PathBuf,
    },
}

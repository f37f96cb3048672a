// src/lib.rs
pub mod batch;
pub mod cli;
pub mod display;
pub mod error;
pub mod io;
pub mod processing;
pub mod utils;

/// Raster band held fully in memory, row-major, one sample per pixel.
pub type Raster = ndarray::Array2<f64>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

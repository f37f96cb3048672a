// src/processing/indices/mod.rs
pub mod afvi;
pub mod bi;
pub mod ndvi;
pub mod ndwi;
pub mod savi;
pub mod ui;

// Re-export indices
pub use afvi::AFVI;
pub use bi::BI;
pub use ndvi::NDVI;
pub use ndwi::NDWI;
pub use savi::SAVI;
pub use ui::UI;

//! Export one band of a raster file as an 8-bit GeoTIFF figure.
//!
//! The band is stretched between its minimum and maximum, colored with a
//! registered colormap and written with the georeferencing of the source.

pub mod dataset;
pub mod geotiff;
pub mod startup;

pub use dataset::{RasterDataset, TiffDataset};
pub use geotiff::GeoReference;
pub use startup::{InitReport, Toolkit};

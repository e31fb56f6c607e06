//! Colormaps and 8-bit rendering of single-band raster data.
//!
//! - Segmented colormap definitions and their lookup tables
//! - A registry of named colormaps with the built-in set
//! - Min/max stretch of band values into palette indices

pub mod builtin;
pub mod colormap;
pub mod registry;
pub mod stretch;

pub use colormap::{Colormap, ControlPoint, SegmentData, DEFAULT_LUT_SIZE};
pub use registry::{ColormapRegistry, RegistrationFailure, RegistrationStatus};
pub use stretch::{render_rgb, stretch_minmax, ValueRange};

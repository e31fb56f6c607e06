//! Process start-up: loggers and colormaps.

use std::path::Path;
use std::sync::Arc;

use geodesy::{haversine, initial_bearing};
use nansat_common::{ensure_openable, Logger, LoggerRegistry, NansatResult};
use renderer::{ColormapRegistry, RegistrationStatus};

use crate::dataset::{RasterDataset, TiffDataset};

/// Name of the logger used by the exporter.
pub const LOGGER_NAME: &str = "nansat_geotiffimage";

/// Shared state built once at start-up.
#[derive(Debug)]
pub struct Toolkit {
    pub colormaps: ColormapRegistry,
    pub loggers: LoggerRegistry,
    logger: Arc<Logger>,
}

/// What start-up managed to set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub colormaps: RegistrationStatus,
}

impl InitReport {
    pub fn is_degraded(&self) -> bool {
        !self.colormaps.is_complete()
    }
}

impl Toolkit {
    /// Register the built-in colormaps and create the exporter logger.
    ///
    /// Colormap failures do not abort start-up; they are reported in the
    /// returned [`InitReport`].
    pub fn initialize(loggers: LoggerRegistry) -> (Self, InitReport) {
        let logger = loggers.add_logger(LOGGER_NAME, None);
        let (colormaps, status) = ColormapRegistry::with_builtin();

        if let RegistrationStatus::Degraded(failures) = &status {
            logger.warning(format!(
                "Running without {} colormap(s): {}",
                failures.len(),
                failures
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        let toolkit = Self {
            colormaps,
            loggers,
            logger,
        };
        (toolkit, InitReport { colormaps: status })
    }

    /// Load extra colormap definitions from a JSON file.
    pub fn load_colormaps(&mut self, path: &Path) -> NansatResult<RegistrationStatus> {
        let status = self.colormaps.register_file(path)?;
        if let RegistrationStatus::Degraded(failures) = &status {
            for failure in failures {
                self.logger
                    .warning(format!("Skipping colormap {}: {}", failure.name, failure.reason));
            }
        }
        Ok(status)
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Export `band` of `input` to `output` as an 8-bit GeoTIFF figure.
    pub fn export_band(
        &self,
        band: usize,
        input: &Path,
        output: &Path,
        colormap: &str,
    ) -> NansatResult<()> {
        ensure_openable(input)?;
        let colormap = self.colormaps.require(colormap)?;
        let dataset = TiffDataset::open(input)?;

        self.logger.info(format!(
            "Exporting band {} of {} ({} band(s)) with colormap {}",
            band,
            input.display(),
            dataset.band_count(),
            colormap.name()
        ));

        let (width, height) = dataset.dimensions();
        if let Some((upper_left, lower_right)) =
            dataset.georeference().geographic_corners(width, height)
        {
            let diagonal = haversine(upper_left.lon, upper_left.lat, lower_right.lon, lower_right.lat);
            let bearing =
                initial_bearing(upper_left.lon, upper_left.lat, lower_right.lon, lower_right.lat);
            self.logger.debug(format!(
                "Scene diagonal {:.0} m at bearing {:.1} deg from ({:.4}, {:.4})",
                diagonal, bearing, upper_left.lon, upper_left.lat
            ));
        }

        dataset.write_geotiffimage(output, band, colormap)
    }
}

//! Raster datasets that can be exported as 8-bit GeoTIFF figures.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use nansat_common::{NansatError, NansatResult};
use renderer::{render_rgb, Colormap, ValueRange};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::{debug, info};

use crate::geotiff::{read_ascii_tag, tiff_error, write_rgb_geotiff, GeoReference, GDAL_NODATA};

/// A georeferenced raster with numbered bands (1-based).
pub trait RasterDataset {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn band_count(&self) -> usize;

    /// Values of one band in row-major order. No-data pixels are NaN.
    fn read_band(&self, band: usize) -> NansatResult<Vec<f64>>;

    fn georeference(&self) -> &GeoReference;

    /// Write one band as an 8-bit RGB GeoTIFF using a min/max stretch and
    /// `colormap`, keeping the georeferencing of the dataset.
    fn write_geotiffimage(
        &self,
        output: &Path,
        band: usize,
        colormap: &Colormap,
    ) -> NansatResult<()> {
        let values = self.read_band(band)?;
        let range = ValueRange::of(&values);
        let (width, height) = self.dimensions();

        debug!(
            band,
            colormap = colormap.name(),
            min = range.map(|r| r.min),
            max = range.map(|r| r.max),
            "Rendering band"
        );

        let pixels = render_rgb(&values, range, colormap);
        write_rgb_geotiff(output, width, height, &pixels, self.georeference())?;

        info!(output = %output.display(), band, width, height, "Wrote GeoTIFF image");
        Ok(())
    }
}

/// Check a 1-based band number against the number of bands.
pub fn check_band(band: usize, band_count: usize) -> NansatResult<usize> {
    if band == 0 || band > band_count {
        return Err(NansatError::Option(format!(
            "band {} does not exist, dataset has {} band(s)",
            band, band_count
        )));
    }
    Ok(band - 1)
}

/// A single-image TIFF or GeoTIFF file held in memory.
///
/// Each sample of a pixel is one band; pixels must be interleaved.
#[derive(Debug, Clone)]
pub struct TiffDataset {
    path: PathBuf,
    width: u32,
    height: u32,
    samples_per_pixel: usize,
    values: Vec<f64>,
    nodata: Option<f64>,
    georef: GeoReference,
}

impl TiffDataset {
    pub fn open(path: impl AsRef<Path>) -> NansatResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| NansatError::Read(format!("{}: {}", path.display(), e)))?;

        let (width, height) = decoder.dimensions().map_err(tiff_error)?;
        let samples_per_pixel = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(1) as usize;
        let planar = decoder.get_tag_u32(Tag::PlanarConfiguration).unwrap_or(1);
        if planar != 1 {
            return Err(NansatError::Read(format!(
                "{}: only interleaved pixels are supported (planar configuration {})",
                path.display(),
                planar
            )));
        }

        let georef = GeoReference::read(&mut decoder)?;
        let nodata = read_ascii_tag(&mut decoder, GDAL_NODATA)?
            .and_then(|text| text.trim().parse::<f64>().ok());

        let image = decoder
            .read_image()
            .map_err(|e| NansatError::Read(format!("{}: {}", path.display(), e)))?;
        let values = decoded_to_f64(image)?;

        let expected = width as usize * height as usize * samples_per_pixel;
        if values.len() < expected {
            return Err(NansatError::Read(format!(
                "{}: expected {} samples, decoded {}",
                path.display(),
                expected,
                values.len()
            )));
        }

        debug!(
            path = %path.display(),
            width,
            height,
            bands = samples_per_pixel,
            georeferenced = !georef.is_empty(),
            "Opened TIFF dataset"
        );

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            samples_per_pixel,
            values,
            nodata,
            georef,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }
}

impl RasterDataset for TiffDataset {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn band_count(&self) -> usize {
        self.samples_per_pixel
    }

    fn read_band(&self, band: usize) -> NansatResult<Vec<f64>> {
        let offset = check_band(band, self.band_count())?;
        let pixels = self.width as usize * self.height as usize;

        Ok(self
            .values
            .iter()
            .skip(offset)
            .step_by(self.samples_per_pixel)
            .take(pixels)
            .map(|&v| match self.nodata {
                Some(nodata) if v == nodata => f64::NAN,
                _ => v,
            })
            .collect())
    }

    fn georeference(&self) -> &GeoReference {
        &self.georef
    }
}

fn decoded_to_f64(image: DecodingResult) -> NansatResult<Vec<f64>> {
    #[allow(unreachable_patterns)]
    let values = match image {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        _ => {
            return Err(NansatError::Read(
                "unsupported sample format".to_string(),
            ))
        }
    };
    Ok(values)
}

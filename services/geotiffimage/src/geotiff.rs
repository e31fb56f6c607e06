//! GeoTIFF georeferencing tags and the 8-bit RGB writer.
//!
//! Uses the pure Rust `tiff` codec. Georeferencing is carried over from the
//! source file tag by tag; nothing is reprojected.

use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use geodesy::GeoPoint;
use nansat_common::{NansatError, NansatResult};
use tiff::decoder::Decoder;
use tiff::encoder::colortype::RGB8;
use tiff::encoder::{DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;
use tiff::TiffError;

// GeoTIFF tag IDs (not in the standard tiff crate)
pub const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
pub const GEOTIFF_MODELTIEPOINT: u16 = 33922;
pub const GEOTIFF_MODELTRANSFORMATION: u16 = 34264;
pub const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
pub const GEOTIFF_GEODOUBLEPARAMS: u16 = 34736;
pub const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;
/// GDAL's no-data value tag (ASCII)
pub const GDAL_NODATA: u16 = 42113;

// GeoKey IDs and values
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;

/// Map a codec error onto the toolkit error kinds.
pub(crate) fn tiff_error(e: TiffError) -> NansatError {
    match e {
        TiffError::IoError(io) => NansatError::Io(io),
        other => NansatError::Gdal(other.to_string()),
    }
}

/// Georeferencing tags of a GeoTIFF image. Every tag is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoReference {
    pub pixel_scale: Option<Vec<f64>>,
    pub tiepoint: Option<Vec<f64>>,
    pub transformation: Option<Vec<f64>>,
    pub geo_keys: Option<Vec<u16>>,
    pub geo_doubles: Option<Vec<f64>>,
    pub geo_ascii: Option<String>,
}

impl GeoReference {
    /// Read the georeferencing tags of the current image.
    pub fn read<R: Read + Seek>(decoder: &mut Decoder<R>) -> NansatResult<Self> {
        Ok(Self {
            pixel_scale: read_f64_tag(decoder, GEOTIFF_MODELPIXELSCALE)?,
            tiepoint: read_f64_tag(decoder, GEOTIFF_MODELTIEPOINT)?,
            transformation: read_f64_tag(decoder, GEOTIFF_MODELTRANSFORMATION)?,
            geo_keys: read_u16_tag(decoder, GEOTIFF_GEOKEYDIRECTORY)?,
            geo_doubles: read_f64_tag(decoder, GEOTIFF_GEODOUBLEPARAMS)?,
            geo_ascii: read_ascii_tag(decoder, GEOTIFF_GEOASCIIPARAMS)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &GeoReference::default()
    }

    /// Value of a GeoKey stored directly in the key directory.
    pub fn geo_key(&self, key_id: u16) -> Option<u16> {
        let keys = self.geo_keys.as_ref()?;
        // Header: version, revision, minor revision, number of keys
        let count = *keys.get(3)? as usize;
        keys.get(4..)?
            .chunks_exact(4)
            .take(count)
            .find(|entry| entry[0] == key_id && entry[1] == 0)
            .map(|entry| entry[3])
    }

    pub fn is_geographic(&self) -> bool {
        self.geo_key(GT_MODEL_TYPE_GEO_KEY) == Some(MODEL_TYPE_GEOGRAPHIC)
    }

    /// Upper-left and lower-right corners for a geographic image of the
    /// given size, from the tiepoint and pixel scale.
    pub fn geographic_corners(&self, width: u32, height: u32) -> Option<(GeoPoint, GeoPoint)> {
        if !self.is_geographic() {
            return None;
        }
        let scale = self.pixel_scale.as_ref()?;
        let tie = self.tiepoint.as_ref()?;
        if scale.len() < 2 || tie.len() < 6 {
            return None;
        }

        // Tiepoint: [I, J, K, X, Y, Z] ties raster (I, J) to model (X, Y)
        let (i, j, x, y) = (tie[0], tie[1], tie[3], tie[4]);
        let west = x - i * scale[0];
        let north = y + j * scale[1];
        let upper_left = GeoPoint::new(west, north);
        let lower_right = GeoPoint::new(
            west + width as f64 * scale[0],
            north - height as f64 * scale[1],
        );
        Some((upper_left, lower_right))
    }

    /// Write every present tag onto an image directory.
    pub fn write_tags<W: Write + Seek, K: TiffKind>(
        &self,
        dir: &mut DirectoryEncoder<W, K>,
    ) -> NansatResult<()> {
        if let Some(scale) = &self.pixel_scale {
            dir.write_tag(Tag::Unknown(GEOTIFF_MODELPIXELSCALE), scale.as_slice())
                .map_err(tiff_error)?;
        }
        if let Some(tie) = &self.tiepoint {
            dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), tie.as_slice())
                .map_err(tiff_error)?;
        }
        if let Some(matrix) = &self.transformation {
            dir.write_tag(Tag::Unknown(GEOTIFF_MODELTRANSFORMATION), matrix.as_slice())
                .map_err(tiff_error)?;
        }
        if let Some(keys) = &self.geo_keys {
            dir.write_tag(Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY), keys.as_slice())
                .map_err(tiff_error)?;
        }
        if let Some(doubles) = &self.geo_doubles {
            dir.write_tag(Tag::Unknown(GEOTIFF_GEODOUBLEPARAMS), doubles.as_slice())
                .map_err(tiff_error)?;
        }
        if let Some(ascii) = &self.geo_ascii {
            dir.write_tag(Tag::Unknown(GEOTIFF_GEOASCIIPARAMS), ascii.as_str())
                .map_err(tiff_error)?;
        }
        Ok(())
    }
}

pub(crate) fn read_f64_tag<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: u16,
) -> NansatResult<Option<Vec<f64>>> {
    match decoder.find_tag(Tag::from_u16_exhaustive(tag)).map_err(tiff_error)? {
        Some(value) => Ok(Some(value.into_f64_vec().map_err(tiff_error)?)),
        None => Ok(None),
    }
}

fn read_u16_tag<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: u16,
) -> NansatResult<Option<Vec<u16>>> {
    match decoder.find_tag(Tag::from_u16_exhaustive(tag)).map_err(tiff_error)? {
        Some(value) => Ok(Some(value.into_u16_vec().map_err(tiff_error)?)),
        None => Ok(None),
    }
}

pub(crate) fn read_ascii_tag<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: u16,
) -> NansatResult<Option<String>> {
    match decoder.find_tag(Tag::from_u16_exhaustive(tag)).map_err(tiff_error)? {
        Some(value) => {
            let text = value.into_string().map_err(tiff_error)?;
            Ok(Some(text.trim_end_matches('\0').to_string()))
        }
        None => Ok(None),
    }
}

/// Write interleaved 8-bit RGB pixels as a GeoTIFF file.
///
/// The buffer is checked before `path` is created, so a rejected write
/// leaves any existing file untouched.
pub fn write_rgb_geotiff(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[u8],
    georef: &GeoReference,
) -> NansatResult<()> {
    check_rgb_buffer(width, height, pixels)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_rgb_geotiff_to(&mut writer, width, height, pixels, georef)?;
    writer.flush()?;
    Ok(())
}

/// Write interleaved 8-bit RGB pixels to any seekable writer.
pub fn write_rgb_geotiff_to<W: Write + Seek>(
    writer: W,
    width: u32,
    height: u32,
    pixels: &[u8],
    georef: &GeoReference,
) -> NansatResult<()> {
    check_rgb_buffer(width, height, pixels)?;

    let mut encoder = TiffEncoder::new(writer).map_err(tiff_error)?;
    let mut image = encoder
        .new_image::<RGB8>(width, height)
        .map_err(tiff_error)?;
    georef.write_tags(image.encoder())?;
    image.write_data(pixels).map_err(tiff_error)?;
    Ok(())
}

fn check_rgb_buffer(width: u32, height: u32, pixels: &[u8]) -> NansatResult<()> {
    if width == 0 || height == 0 {
        return Err(NansatError::Option("image has zero dimensions".to_string()));
    }
    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(NansatError::Option(format!(
            "expected {} RGB bytes for {}x{}, got {}",
            expected,
            width,
            height,
            pixels.len()
        )));
    }
    Ok(())
}

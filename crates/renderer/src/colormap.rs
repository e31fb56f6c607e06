//! Segmented colormaps.
//!
//! A colormap is defined per channel by control points `(position, left,
//! right)`. `left` is the channel value approached from below the position,
//! `right` the value leaving it upwards, so equal values give a continuous
//! ramp and different values a hard step. The definition is sampled once into
//! a lookup table of `lut` colors.

use nansat_common::{NansatError, NansatResult, Rgb};
use serde::{Deserialize, Serialize};

/// Number of lookup-table entries used when none is given.
pub const DEFAULT_LUT_SIZE: usize = 256;

/// A single control point of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct ControlPoint {
    /// Position in `[0, 1]`
    pub position: f64,
    /// Value just below `position`
    pub left: f64,
    /// Value just above `position`
    pub right: f64,
}

impl ControlPoint {
    pub const fn new(position: f64, left: f64, right: f64) -> Self {
        Self {
            position,
            left,
            right,
        }
    }

    /// A point where the ramp is continuous.
    pub const fn flat(position: f64, value: f64) -> Self {
        Self::new(position, value, value)
    }
}

impl From<[f64; 3]> for ControlPoint {
    fn from([position, left, right]: [f64; 3]) -> Self {
        Self::new(position, left, right)
    }
}

impl From<ControlPoint> for [f64; 3] {
    fn from(p: ControlPoint) -> Self {
        [p.position, p.left, p.right]
    }
}

/// Control points for the red, green and blue channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentData {
    pub red: Vec<ControlPoint>,
    pub green: Vec<ControlPoint>,
    pub blue: Vec<ControlPoint>,
}

impl SegmentData {
    pub fn channels(&self) -> [(&'static str, &[ControlPoint]); 3] {
        [
            ("red", self.red.as_slice()),
            ("green", self.green.as_slice()),
            ("blue", self.blue.as_slice()),
        ]
    }

    /// Check that every channel spans `[0, 1]` with ordered positions and
    /// values inside `[0, 1]`.
    pub fn validate(&self) -> NansatResult<()> {
        for (channel, points) in self.channels() {
            validate_channel(points)
                .map_err(|msg| NansatError::Registration(format!("{} channel: {}", channel, msg)))?;
        }
        Ok(())
    }
}

fn validate_channel(points: &[ControlPoint]) -> Result<(), String> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => (first, last),
        _ => return Err("needs at least 2 control points".to_string()),
    };

    if first.position != 0.0 || last.position != 1.0 {
        return Err(format!(
            "positions must start at 0 and end at 1, got {} and {}",
            first.position, last.position
        ));
    }

    for pair in points.windows(2) {
        if pair[1].position < pair[0].position {
            return Err(format!(
                "positions must be in ascending order ({} after {})",
                pair[1].position, pair[0].position
            ));
        }
    }

    for p in points {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(p.left) || !in_unit(p.right) {
            return Err(format!("values at {} must lie in [0, 1]", p.position));
        }
    }

    Ok(())
}

/// Sample one channel into `n` evenly spaced values.
///
/// The first entry takes the first point's `right` value, the last entry the
/// last point's `left` value; interior entries interpolate linearly from the
/// `right` value of the point below to the `left` value of the point above.
fn channel_lut(points: &[ControlPoint], n: usize) -> Vec<f64> {
    let (first, last) = (points[0], points[points.len() - 1]);
    if n == 1 {
        return vec![last.left];
    }

    let scale = (n - 1) as f64;
    let xs: Vec<f64> = points.iter().map(|p| p.position * scale).collect();

    let mut lut = Vec::with_capacity(n);
    lut.push(first.right);

    for i in 1..n - 1 {
        let x = i as f64;
        // First point at or past x; xs[0] = 0 < x < xs[last] bounds it.
        let upper = xs.partition_point(|&p| p < x);
        let lower = upper - 1;
        let t = (x - xs[lower]) / (xs[upper] - xs[lower]);
        let value = points[lower].right + t * (points[upper].left - points[lower].right);
        lut.push(value.clamp(0.0, 1.0));
    }

    lut.push(last.left);
    lut
}

fn unit_to_u8(v: f64) -> u8 {
    // Truncation, matching the byte conversion of common plotting tools.
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// A named colormap with its sampled lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    segments: SegmentData,
    lut: Vec<Rgb>,
}

impl Colormap {
    /// Build a colormap from segment data, sampling `lut` entries.
    pub fn from_segments(name: &str, segments: SegmentData, lut: usize) -> NansatResult<Self> {
        if lut == 0 {
            return Err(NansatError::Registration(format!(
                "colormap '{}' needs a non-empty lookup table",
                name
            )));
        }
        segments.validate().map_err(|e| match e {
            NansatError::Registration(msg) => {
                NansatError::Registration(format!("colormap '{}': {}", name, msg))
            }
            other => other,
        })?;

        let red = channel_lut(&segments.red, lut);
        let green = channel_lut(&segments.green, lut);
        let blue = channel_lut(&segments.blue, lut);

        let table = (0..lut)
            .map(|i| Rgb::new(unit_to_u8(red[i]), unit_to_u8(green[i]), unit_to_u8(blue[i])))
            .collect();

        Ok(Self {
            name: name.to_string(),
            segments,
            lut: table,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &SegmentData {
        &self.segments
    }

    pub fn lut(&self) -> &[Rgb] {
        &self.lut
    }

    pub fn len(&self) -> usize {
        self.lut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    /// Color for a normalized value. Values outside `[0, 1]` clamp to the
    /// ends; NaN maps to black.
    pub fn color_at(&self, t: f64) -> Rgb {
        if t.is_nan() {
            return Rgb::default();
        }
        let n = self.lut.len();
        let idx = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
        self.lut[idx]
    }

    /// Color for an 8-bit palette index, spread over the whole table.
    pub fn color_for_index(&self, index: u8) -> Rgb {
        if self.lut.len() == 256 {
            return self.lut[index as usize];
        }
        self.color_at(index as f64 / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> SegmentData {
        let ramp = vec![ControlPoint::flat(0.0, 0.0), ControlPoint::flat(1.0, 1.0)];
        SegmentData {
            red: ramp.clone(),
            green: ramp.clone(),
            blue: ramp,
        }
    }

    #[test]
    fn test_gray_ramp_lut() {
        let cmap = Colormap::from_segments("gray", gray(), 256).unwrap();
        assert_eq!(cmap.len(), 256);
        assert_eq!(cmap.lut()[0], Rgb::new(0, 0, 0));
        assert_eq!(cmap.lut()[255], Rgb::new(255, 255, 255));
        // A linear ramp over 256 entries truncates back to the index itself.
        assert_eq!(cmap.lut()[127], Rgb::new(127, 127, 127));
        assert_eq!(cmap.lut()[128], Rgb::new(128, 128, 128));
        for (i, color) in cmap.lut().iter().enumerate() {
            assert_eq!(color.r as usize, i);
        }
    }

    #[test]
    fn test_channel_lut_step() {
        // Hard step from 0 to 1 at the midpoint; the entry sitting exactly on
        // the step still takes the value from below.
        let points = [
            ControlPoint::flat(0.0, 0.0),
            ControlPoint::new(0.5, 0.0, 1.0),
            ControlPoint::flat(1.0, 1.0),
        ];
        let lut = channel_lut(&points, 5);
        assert_eq!(lut, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_channel_lut_endpoints_use_outer_values() {
        let points = [ControlPoint::new(0.0, 0.9, 0.2), ControlPoint::new(1.0, 0.7, 0.1)];
        let lut = channel_lut(&points, 3);
        assert_eq!(lut[0], 0.2);
        assert!((lut[1] - 0.45).abs() < 1e-12);
        assert_eq!(lut[2], 0.7);
    }

    #[test]
    fn test_single_entry_lut() {
        let cmap = Colormap::from_segments("one", gray(), 1).unwrap();
        assert_eq!(cmap.lut(), &[Rgb::new(255, 255, 255)]);
    }

    #[test]
    fn test_color_at_clamps() {
        let cmap = Colormap::from_segments("gray", gray(), 256).unwrap();
        assert_eq!(cmap.color_at(-3.0), cmap.lut()[0]);
        assert_eq!(cmap.color_at(1.0), cmap.lut()[255]);
        assert_eq!(cmap.color_at(7.0), cmap.lut()[255]);
        assert_eq!(cmap.color_at(f64::NAN), Rgb::default());
    }

    #[test]
    fn test_validation_rejects_bad_segments() {
        let mut bad = gray();
        bad.red = vec![ControlPoint::flat(0.0, 0.0)];
        assert!(bad.validate().is_err());

        let mut bad = gray();
        bad.green = vec![ControlPoint::flat(0.1, 0.0), ControlPoint::flat(1.0, 1.0)];
        assert!(bad.validate().is_err());

        let mut bad = gray();
        bad.blue = vec![
            ControlPoint::flat(0.0, 0.0),
            ControlPoint::flat(0.7, 0.5),
            ControlPoint::flat(0.3, 0.5),
            ControlPoint::flat(1.0, 1.0),
        ];
        assert!(bad.validate().is_err());

        let mut bad = gray();
        bad.red = vec![ControlPoint::flat(0.0, 0.0), ControlPoint::flat(1.0, 1.5)];
        assert!(matches!(
            Colormap::from_segments("bad", bad, 256),
            Err(NansatError::Registration(_))
        ));
    }

    #[test]
    fn test_control_point_serde_as_triple() {
        let p: ControlPoint = serde_json::from_str("[0.5, 0.1, 0.9]").unwrap();
        assert_eq!(p, ControlPoint::new(0.5, 0.1, 0.9));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[0.5,0.1,0.9]");
    }
}

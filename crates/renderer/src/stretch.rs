//! Min/max stretch of band values into 8-bit palette indices.

use crate::colormap::Colormap;

/// Value range used for the stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range of the finite values in `data`, or `None` if there are none.
    pub fn of<T: Copy + Into<f64>>(data: &[T]) -> Option<Self> {
        data.iter()
            .map(|&v| -> f64 { v.into() })
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<ValueRange>, v| match acc {
                None => Some(ValueRange::new(v, v)),
                Some(r) => Some(ValueRange::new(r.min.min(v), r.max.max(v))),
            })
    }

    /// Position of `value` inside the range, clamped to `[0, 1]`.
    /// A degenerate range maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Stretch `data` linearly so `range.min` maps to 0 and `range.max` to 255.
///
/// Without an explicit range the finite min/max of `data` is used.
/// Non-finite values map to index 0.
pub fn stretch_minmax<T: Copy + Into<f64>>(data: &[T], range: Option<ValueRange>) -> Vec<u8> {
    let range = match range.or_else(|| ValueRange::of(data)) {
        Some(range) => range,
        None => return vec![0; data.len()],
    };

    data.iter()
        .map(|&v| {
            let v: f64 = v.into();
            if v.is_finite() {
                (range.normalize(v) * 255.0).round() as u8
            } else {
                0
            }
        })
        .collect()
}

/// Stretch `data` and look every index up in `colormap`.
///
/// Returns interleaved RGB bytes, three per input value.
pub fn render_rgb<T: Copy + Into<f64>>(
    data: &[T],
    range: Option<ValueRange>,
    colormap: &Colormap,
) -> Vec<u8> {
    let indices = stretch_minmax(data, range);
    let mut pixels = Vec::with_capacity(indices.len() * 3);
    for index in indices {
        let color = colormap.color_for_index(index);
        pixels.extend_from_slice(&[color.r, color.g, color.b]);
    }
    pixels
}

//! RGB colors and the random distant color generator.
//!
//! Colors travel as `#rrggbb` strings (lowercase, zero padded). The generator
//! picks random colors that stay visually apart from a reference color, which
//! is what plotting code uses to give neighbouring lines distinct colors.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{NansatError, NansatResult};

/// Default reference color for [`get_random_color`].
pub const DEFAULT_REFERENCE: &str = "#000000";

/// Default minimal Euclidean RGB distance for [`get_random_color`].
pub const DEFAULT_MIN_DISTANCE: f64 = 100.0;

/// An opaque RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string. Hex digits may be upper or lower case.
    pub fn from_hex(s: &str) -> NansatResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| NansatError::Format(format!("color '{}' must start with '#'", s)))?;

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(NansatError::Format(format!(
                "color '{}' is not a 6-digit hex color",
                s
            )));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| NansatError::Format(format!("color '{}': {}", s, e)))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Largest distance from `self` to any color with every channel in `[low, high]`.
    pub fn max_distance_within(&self, low: u8, high: u8) -> f64 {
        let reach = |c: u8| {
            let c = c as f64;
            (c - low as f64).abs().max((high as f64 - c).abs())
        };
        let (r, g, b) = (reach(self.r), reach(self.g), reach(self.b));
        (r * r + g * g + b * b).sqrt()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = NansatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

/// Create a random color at least `min_distance` away from `reference`.
///
/// Uses the thread-local generator. See [`random_distant_color`].
pub fn get_random_color(
    reference: Option<&str>,
    min_distance: f64,
    low: u8,
    high: u8,
) -> NansatResult<String> {
    let mut rng = rand::thread_rng();
    random_distant_color(
        &mut rng,
        reference.unwrap_or(DEFAULT_REFERENCE),
        min_distance,
        low,
        high,
    )
}

/// Rejection-sample a color from `[low, high]` (inclusive, per channel) until
/// its RGB distance to `reference` is at least `min_distance`.
///
/// # Errors
/// - [`NansatError::Format`] if `reference` is not a `#rrggbb` color
/// - [`NansatError::Option`] if `low > high` or `min_distance` is not finite
/// - [`NansatError::Exhausted`] if no color in the cube can reach `min_distance`
pub fn random_distant_color<R: Rng + ?Sized>(
    rng: &mut R,
    reference: &str,
    min_distance: f64,
    low: u8,
    high: u8,
) -> NansatResult<String> {
    let reference = Rgb::from_hex(reference)?;

    if low > high {
        return Err(NansatError::Option(format!(
            "channel range is empty: low={} > high={}",
            low, high
        )));
    }

    if !min_distance.is_finite() {
        return Err(NansatError::Option(format!(
            "min_distance must be finite, got {}",
            min_distance
        )));
    }

    let reachable = reference.max_distance_within(low, high);
    if min_distance > reachable {
        return Err(NansatError::Exhausted(format!(
            "min_distance {} exceeds the largest reachable distance {:.1} from {}",
            min_distance, reachable, reference
        )));
    }

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let candidate = Rgb::new(
            rng.gen_range(low..=high),
            rng.gen_range(low..=high),
            rng.gen_range(low..=high),
        );

        if candidate.distance(&reference) >= min_distance {
            tracing::trace!(
                reference = %reference,
                color = %candidate,
                attempts,
                "Picked random color"
            );
            return Ok(candidate.to_hex());
        }
    }
}

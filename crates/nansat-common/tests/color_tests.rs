//! Tests for the random distant color generator.

use nansat_common::color::{get_random_color, random_distant_color, Rgb};
use nansat_common::NansatError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

// ============================================================================
// Default parameters
// ============================================================================

#[test]
fn test_default_reference_is_black() {
    for _ in 0..200 {
        let hex = get_random_color(None, 100.0, 0, 255).unwrap();
        assert!(is_hex_color(&hex), "{} is not a lowercase hex color", hex);
        let color: Rgb = hex.parse().unwrap();
        assert!(color.distance(&Rgb::new(0, 0, 0)) >= 100.0);
    }
}

#[test]
fn test_zero_distance_accepts_anything() {
    let hex = get_random_color(Some("#808080"), 0.0, 0, 255).unwrap();
    assert!(is_hex_color(&hex));
}

// ============================================================================
// Distance constraint
// ============================================================================

#[test]
fn test_many_draws_never_violate_distance() {
    let mut rng = StdRng::seed_from_u64(2011);
    let references = ["#ff0000", "#00FF00", "#0000ff", "#ffffff", "#7f7f7f"];

    for reference in references {
        let reference_rgb: Rgb = reference.parse().unwrap();
        for _ in 0..300 {
            let hex = random_distant_color(&mut rng, reference, 200.0, 0, 255).unwrap();
            assert!(is_hex_color(&hex));
            let color: Rgb = hex.parse().unwrap();
            assert!(
                color.distance(&reference_rgb) >= 200.0,
                "{} too close to {}",
                hex,
                reference
            );
        }
    }
}

#[test]
fn test_channels_stay_within_bounds() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..300 {
        let hex = random_distant_color(&mut rng, "#000000", 50.0, 40, 60).unwrap();
        let color: Rgb = hex.parse().unwrap();
        for channel in [color.r, color.g, color.b] {
            assert!((40..=60).contains(&channel));
        }
    }
}

#[test]
fn test_high_bound_is_inclusive() {
    // With low == high the only candidate is the bound itself.
    let mut rng = StdRng::seed_from_u64(5);
    let hex = random_distant_color(&mut rng, "#000000", 1.0, 255, 255).unwrap();
    assert_eq!(hex, "#ffffff");
}

// ============================================================================
// Error cases
// ============================================================================

#[test]
fn test_malformed_reference() {
    let mut rng = StdRng::seed_from_u64(0);
    for bad in ["000000", "#00000g", "#0000000", "black"] {
        let err = random_distant_color(&mut rng, bad, 10.0, 0, 255).unwrap_err();
        assert!(matches!(err, NansatError::Format(_)), "{}", bad);
    }
}

#[test]
fn test_min_distance_beyond_rgb_cube() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = random_distant_color(&mut rng, "#000000", 442.0, 0, 255).unwrap_err();
    assert!(matches!(err, NansatError::Exhausted(_)));
}

#[test]
fn test_min_distance_beyond_narrow_range() {
    let mut rng = StdRng::seed_from_u64(0);
    let err = random_distant_color(&mut rng, "#000000", 100.0, 0, 10).unwrap_err();
    assert!(matches!(err, NansatError::Exhausted(_)));
}

#[test]
fn test_nan_min_distance_is_rejected() {
    let err = get_random_color(None, f64::NAN, 0, 255).unwrap_err();
    assert!(matches!(err, NansatError::Option(_)));
}

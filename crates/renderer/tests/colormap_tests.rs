//! Tests for colormap registration and 8-bit rendering.

use nansat_common::{NansatError, Rgb};
use renderer::{
    render_rgb, stretch_minmax, ColormapRegistry, ControlPoint, RegistrationStatus, SegmentData,
    ValueRange,
};

const SEA_JSON: &str = r#"{
    "sea": {
        "red":   [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        "green": [[0.0, 0.0, 0.0], [0.5, 0.5, 0.5], [1.0, 1.0, 1.0]],
        "blue":  [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0]]
    }
}"#;

// ============================================================================
// Built-in colormaps
// ============================================================================

#[test]
fn test_jet_endpoints() {
    let (registry, status) = ColormapRegistry::with_builtin();
    assert_eq!(status, RegistrationStatus::Complete);

    let jet = registry.get("jet").unwrap();
    assert_eq!(jet.lut()[0], Rgb::new(0, 0, 127));
    assert_eq!(jet.lut()[255], Rgb::new(127, 0, 0));
}

#[test]
fn test_obpg_endpoints() {
    let (registry, _) = ColormapRegistry::with_builtin();
    let obpg = registry.get("obpg").unwrap();
    assert_eq!(obpg.lut()[0], Rgb::new(142, 0, 109));
    assert_eq!(obpg.lut()[255], Rgb::new(102, 0, 0));
}

#[test]
fn test_ak01_midpoint_is_green() {
    let (registry, _) = ColormapRegistry::with_builtin();
    let ak01 = registry.get("ak01").unwrap();
    // Between 0.52 and 0.64 green is saturated and blue is off.
    let c = ak01.color_at(0.58);
    assert_eq!(c.g, 255);
    assert_eq!(c.b, 0);
}

// ============================================================================
// Custom definitions
// ============================================================================

#[test]
fn test_register_json() {
    let mut registry = ColormapRegistry::new();
    let status = registry.register_json(SEA_JSON).unwrap();
    assert!(status.is_complete());

    let sea = registry.require("sea").unwrap();
    assert_eq!(sea.lut()[0], Rgb::new(0, 0, 255));
    assert_eq!(sea.lut()[255], Rgb::new(0, 255, 255));
}

#[test]
fn test_register_json_degrades_on_bad_entry() {
    let json = r#"{
        "broken": {
            "red":   [[0.2, 0.0, 0.0], [1.0, 1.0, 1.0]],
            "green": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            "blue":  [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
        },
        "fine": {
            "red":   [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            "green": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            "blue":  [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
        }
    }"#;

    let mut registry = ColormapRegistry::new();
    match registry.register_json(json).unwrap() {
        RegistrationStatus::Degraded(failures) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].name, "broken");
        }
        RegistrationStatus::Complete => panic!("Expected degraded registration"),
    }
    assert!(registry.contains("fine"));
    assert!(!registry.contains("broken"));
}

#[test]
fn test_register_json_malformed() {
    let mut registry = ColormapRegistry::new();
    let err = registry.register_json("{not json").unwrap_err();
    assert!(matches!(err, NansatError::Format(_)));
}

#[test]
fn test_register_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colormaps.json");
    std::fs::write(&path, SEA_JSON).unwrap();

    let (mut registry, _) = ColormapRegistry::with_builtin();
    assert!(registry.register_file(&path).unwrap().is_complete());
    assert_eq!(registry.len(), 5);

    let err = registry.register_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, NansatError::Io(_)));
}

#[test]
fn test_lut_size_is_respected() {
    let ramp = vec![ControlPoint::flat(0.0, 0.0), ControlPoint::flat(1.0, 1.0)];
    let segments = SegmentData {
        red: ramp.clone(),
        green: ramp.clone(),
        blue: ramp,
    };
    let mut registry = ColormapRegistry::new();
    let cmap = registry.register("coarse", segments, 8).unwrap();
    assert_eq!(cmap.len(), 8);
    assert_eq!(cmap.color_for_index(0), Rgb::new(0, 0, 0));
    assert_eq!(cmap.color_for_index(255), Rgb::new(255, 255, 255));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_rgb_gray() {
    let (registry, _) = ColormapRegistry::with_builtin();
    let gray = registry.get("gray").unwrap();

    let data = [0.0f32, 10.0, f32::NAN];
    let pixels = render_rgb(&data, None, gray);
    assert_eq!(pixels.len(), 9);
    assert_eq!(&pixels[0..3], &[0, 0, 0]);
    assert_eq!(&pixels[3..6], &[255, 255, 255]);
    assert_eq!(&pixels[6..9], &[0, 0, 0]);
}

#[test]
fn test_stretch_with_fixed_range() {
    let data = [0u8, 64, 255];
    let out = stretch_minmax(&data, Some(ValueRange::new(0.0, 64.0)));
    assert_eq!(out, vec![0, 255, 255]);
}

//! Built-in colormap definitions.

use crate::colormap::{ControlPoint, SegmentData};

const fn p(position: f64, value: f64) -> ControlPoint {
    ControlPoint::flat(position, value)
}

/// Names registered by [`crate::ColormapRegistry::with_builtin`], in order.
pub const BUILTIN_NAMES: &[&str] = &["gray", "jet", "obpg", "ak01"];

/// Definition of a built-in colormap by name.
pub fn builtin_segments(name: &str) -> Option<SegmentData> {
    match name {
        "gray" => Some(gray()),
        "jet" => Some(jet()),
        "obpg" => Some(obpg()),
        "ak01" => Some(ak01()),
        _ => None,
    }
}

/// Linear black-to-white ramp.
pub fn gray() -> SegmentData {
    let ramp = vec![p(0.0, 0.0), p(1.0, 1.0)];
    SegmentData {
        red: ramp.clone(),
        green: ramp.clone(),
        blue: ramp,
    }
}

/// Blue-cyan-yellow-red rainbow; the default for exported images.
pub fn jet() -> SegmentData {
    SegmentData {
        red: vec![p(0.0, 0.0), p(0.35, 0.0), p(0.66, 1.0), p(0.89, 1.0), p(1.0, 0.5)],
        green: vec![
            p(0.0, 0.0),
            p(0.125, 0.0),
            p(0.375, 1.0),
            p(0.64, 1.0),
            p(0.91, 0.0),
            p(1.0, 0.0),
        ],
        blue: vec![p(0.0, 0.5), p(0.11, 1.0), p(0.34, 1.0), p(0.65, 0.0), p(1.0, 0.0)],
    }
}

/// Ocean color palette of the NASA Ocean Biology Processing Group.
pub fn obpg() -> SegmentData {
    SegmentData {
        red: vec![
            p(0.00, 0.56),
            p(0.19, 0.00),
            p(0.38, 0.00),
            p(0.50, 0.00),
            p(0.63, 1.00),
            p(0.88, 1.00),
            p(1.00, 0.40),
        ],
        green: vec![
            p(0.00, 0.00),
            p(0.19, 0.00),
            p(0.38, 1.00),
            p(0.50, 1.00),
            p(0.63, 1.00),
            p(0.88, 0.00),
            p(1.00, 0.00),
        ],
        blue: vec![
            p(0.00, 0.43),
            p(0.19, 1.00),
            p(0.38, 1.00),
            p(0.50, 0.00),
            p(0.63, 0.00),
            p(0.88, 0.00),
            p(1.00, 0.00),
        ],
    }
}

/// Extended ocean palette with a dark low end and a pale high end.
pub fn ak01() -> SegmentData {
    SegmentData {
        red: vec![
            p(0.0, 0.1),
            p(0.1, 0.56),
            p(0.22, 0.0),
            p(0.27, 0.0),
            p(0.37, 0.3),
            p(0.47, 0.0),
            p(0.52, 0.0),
            p(0.64, 1.0),
            p(0.76, 1.0),
            p(0.88, 0.4),
            p(1.0, 1.0),
        ],
        green: vec![
            p(0.0, 0.0),
            p(0.1, 0.0),
            p(0.22, 0.0),
            p(0.27, 0.0),
            p(0.37, 0.6),
            p(0.47, 0.6),
            p(0.52, 1.0),
            p(0.64, 1.0),
            p(0.76, 0.0),
            p(0.88, 0.0),
            p(1.0, 0.5),
        ],
        blue: vec![
            p(0.0, 0.1),
            p(0.1, 0.5),
            p(0.22, 0.5),
            p(0.27, 1.0),
            p(0.37, 1.0),
            p(0.47, 0.0),
            p(0.52, 0.0),
            p(0.64, 0.0),
            p(0.76, 0.0),
            p(0.88, 0.0),
            p(1.0, 0.5),
        ],
    }
}

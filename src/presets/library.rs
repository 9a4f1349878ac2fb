use crate::{
    foundation::{core::Point, math::lerp},
    scene::{
        model::{EasingCurve, Motion, MotionProperty, Scene},
        path::PropertyPath,
    },
};

/// Control-point offsets as fractions of the anchor span: `(cx1, cy1)` and `(cx2, cy2)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PresetFactors {
    /// First handle, time fraction.
    pub cx1: f64,
    /// First handle, value fraction.
    pub cy1: f64,
    /// Second handle, time fraction.
    pub cx2: f64,
    /// Second handle, value fraction.
    pub cy2: f64,
}

/// A named control-point template.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CurvePreset {
    /// Stable identifier (`ease-in-out`, ...).
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Offsets applied between the motion's anchors.
    pub factors: PresetFactors,
}

const fn preset(id: &'static str, label: &'static str, f: [f64; 4]) -> CurvePreset {
    CurvePreset {
        id,
        label,
        factors: PresetFactors {
            cx1: f[0],
            cy1: f[1],
            cx2: f[2],
            cy2: f[3],
        },
    }
}

/// Built-in presets; `linear` places the handles on the 1/3 and 2/3 marks.
pub static PRESETS: [CurvePreset; 7] = [
    preset("linear", "Linear", [1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0]),
    preset("ease-in-out", "Ease In-Out", [0.42, 0.0, 0.58, 1.0]),
    preset("ease-in", "Ease In", [0.42, 0.0, 1.0, 1.0]),
    preset("ease-out", "Ease Out", [0.0, 0.0, 0.58, 1.0]),
    preset("overshoot", "Overshoot", [0.34, 1.56, 0.64, 1.0]),
    preset("anticipation", "Anticipation", [0.6, -0.28, 0.74, 0.05]),
    preset("bouncy", "Bouncy", [0.68, -0.55, 0.27, 1.55]),
];

/// Look up a preset by id or label (case-insensitive).
pub fn find_preset(key: &str) -> Option<&'static CurvePreset> {
    PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(key) || p.label.eq_ignore_ascii_case(key))
}

/// Curve for `prop` on `motion` shaped by `factors`.
///
/// Anchors are `(startFrame, v0)` and `(endFrame, v1)`; each axis is interpolated
/// independently, so the result scales with the motion's span and value range.
pub fn curve_from_factors(
    motion: &Motion,
    prop: &MotionProperty,
    factors: PresetFactors,
) -> EasingCurve {
    let a = Point::new(motion.start_frame.as_f64(), prop.start().value);
    let b = Point::new(motion.end_frame.as_f64(), prop.end().value);
    let at = |fx: f64, fy: f64| Point::new(lerp(a.x, b.x, fx), lerp(a.y, b.y, fy));
    EasingCurve {
        p1: at(factors.cx1, factors.cy1),
        p2: at(factors.cx2, factors.cy2),
    }
}

/// Curve that applying `preset_id` to the property at `path` would produce.
///
/// `None` when the preset is unknown or the path does not resolve.
pub fn preset_curve(scene: &Scene, path: &PropertyPath, preset_id: &str) -> Option<EasingCurve> {
    let preset = find_preset(preset_id)?;
    let resolved = scene.resolve(path)?;
    Some(curve_from_factors(
        resolved.motion,
        resolved.property,
        preset.factors,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/presets/library.rs"]
mod tests;

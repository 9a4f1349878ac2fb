use crate::{
    foundation::core::FrameIndex,
    scene::model::{Motion, MotionProperty, PropertyName, SceneObject},
};

/// One-dimensional cubic Bezier `B(t)` over four scalar control values.
pub fn cubic_bezier_1d(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    uu * u * p0 + 3.0 * uu * t * p1 + 3.0 * u * tt * p2 + tt * t * p3
}

/// Linear fraction of elapsed frames within `motion`, clamped to `[0, 1]`.
///
/// A zero-length or reversed motion reports `1.0`.
pub fn motion_progress(motion: &Motion, frame: FrameIndex) -> f64 {
    let len = match motion.end_frame.0.checked_sub(motion.start_frame.0) {
        Some(len) if len > 0 => len,
        _ => return 1.0,
    };
    let elapsed = frame.0.saturating_sub(motion.start_frame.0);
    ((elapsed as f64) / (len as f64)).clamp(0.0, 1.0)
}

/// `start_frame <= frame <= end_frame` on the authored bounds; a reversed motion
/// contains no frame.
fn contains(motion: &Motion, frame: FrameIndex) -> bool {
    motion.start_frame <= frame && frame <= motion.end_frame
}

/// Value of `prop` at uniform parameter `t`.
///
/// The curve shapes the value, not the timing: `t` is used as-is and only the `y`
/// components of the control points take part.
pub fn sample_property(prop: &MotionProperty, t: f64) -> f64 {
    cubic_bezier_1d(
        t,
        prop.start().value,
        prop.curve.p1.y,
        prop.curve.p2.y,
        prop.end().value,
    )
}

/// Evaluate `name` on `object` at `frame`, falling back to `default` when nothing animates it.
///
/// 1. The first motion (authored order) containing `frame` that defines the property
///    is sampled.
/// 2. Otherwise the last motion that ended before `frame` and defines the property holds
///    its end value.
/// 3. Otherwise `default`.
pub fn evaluate(frame: FrameIndex, object: &SceneObject, name: PropertyName, default: f64) -> f64 {
    let active = object.motions.iter().find_map(|m| {
        if !contains(m, frame) {
            return None;
        }
        m.properties.get(name).map(|p| (m, p))
    });
    if let Some((motion, prop)) = active {
        return sample_property(prop, motion_progress(motion, frame));
    }

    object
        .motions
        .iter()
        .filter(|m| m.end_frame < frame)
        .filter_map(|m| m.properties.get(name))
        .last()
        .map_or(default, |p| p.end().value)
}

/// Evaluate `name` on `object` at `frame` with the object's own default.
pub fn property_value_at(object: &SceneObject, name: PropertyName, frame: FrameIndex) -> f64 {
    evaluate(frame, object, name, object.default_value(name))
}

/// `count + 1` evenly spaced `(frame, value)` samples across the property's motion.
pub fn sample_curve(motion: &Motion, prop: &MotionProperty, count: usize) -> Vec<(f64, f64)> {
    let count = count.max(1);
    let span = motion.span();
    (0..=count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let frame = span.start.as_f64() + span.len_frames() as f64 * t;
            (frame, sample_property(prop, t))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;

use std::sync::Arc;

use crate::{
    foundation::core::Point,
    scene::{
        model::{EasingCurve, Motion, MotionProperty, Scene, SceneObject},
        path::PropertyPath,
    },
};

/// Which control point of an [`EasingCurve`] a drag gesture moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// First control point.
    P1,
    /// Second control point.
    P2,
}

/// Replace the curve at `path`, sharing every untouched object and motion.
///
/// `None` when the path does not resolve; the input scene is never modified.
pub fn try_apply_curve_edit(
    scene: &Scene,
    path: &PropertyPath,
    curve: EasingCurve,
) -> Option<Scene> {
    let resolved = scene.resolve(path)?;

    let mut motion = Motion::clone(resolved.motion);
    *motion.properties.get_mut(path.property_name)? = MotionProperty {
        curve,
        ..*resolved.property
    };

    let object = resolved.object;
    let mut motions = object.motions.clone();
    motions[resolved.motion_index] = Arc::new(motion);
    let object = SceneObject {
        id: object.id.clone(),
        kind: object.kind,
        color: object.color.clone(),
        start_position: object.start_position,
        motions,
        frame_data: object.frame_data.clone(),
    };

    let mut objects = scene.objects.clone();
    objects[resolved.object_index] = Arc::new(object);
    Some(Scene {
        id: scene.id.clone(),
        duration: scene.duration,
        objects,
    })
}

/// Replace the curve at `path`; an unresolved path returns an unchanged copy.
#[tracing::instrument(skip(scene, curve), fields(path = %path))]
pub fn apply_curve_edit(scene: &Scene, path: &PropertyPath, curve: EasingCurve) -> Scene {
    try_apply_curve_edit(scene, path, curve).unwrap_or_else(|| {
        tracing::warn!("curve edit target does not resolve; ignoring");
        scene.clone()
    })
}

/// Clamp a dragged handle into its motion's frame span. The value axis is left alone.
pub fn clamp_handle(motion: &Motion, to: Point) -> Point {
    Point::new(motion.span().clamp_f64(to.x), to.y)
}

/// Curve after moving `handle` to `to`, or `None` when `path` does not resolve.
pub fn dragged_curve(
    scene: &Scene,
    path: &PropertyPath,
    handle: Handle,
    to: Point,
) -> Option<EasingCurve> {
    let resolved = scene.resolve(path)?;
    let to = clamp_handle(resolved.motion, to);
    let mut curve = resolved.property.curve;
    match handle {
        Handle::P1 => curve.p1 = to,
        Handle::P2 => curve.p2 = to,
    }
    Some(curve)
}

/// Apply a drag of `handle` to `to` as a structural curve edit.
#[tracing::instrument(skip(scene), fields(path = %path))]
pub fn drag_handle(scene: &Scene, path: &PropertyPath, handle: Handle, to: Point) -> Scene {
    match dragged_curve(scene, path, handle, to) {
        Some(curve) => apply_curve_edit(scene, path, curve),
        None => {
            tracing::warn!("drag target does not resolve; ignoring");
            scene.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/ops.rs"]
mod tests;

use std::sync::Arc;

use crate::{
    config::EditorOpts,
    edit::ops::{Handle, dragged_curve, try_apply_curve_edit},
    foundation::core::{FrameIndex, FrameSpan, Point},
    presets::library::preset_curve,
    scene::{
        model::{
            EasingCurve, Keyframe, Motion, MotionProperties, MotionProperty, ObjectKind,
            PropertyName, Scene, SceneObject,
        },
        path::{PropertyPath, Resolved},
    },
};

const NEW_MOTION_NAME: &str = "Default Motion";
const NEW_MOTION_END: u64 = 100;

/// The current scene plus the selected property path.
///
/// Every mutation swaps in a new `Arc<Scene>`, so consumers can detect changes with
/// [`Arc::ptr_eq`]. No-op edits keep the existing pointer.
#[derive(Clone, Debug)]
pub struct EditorState {
    scene: Arc<Scene>,
    selection: Option<PropertyPath>,
    object_counter: usize,
    opts: EditorOpts,
}

impl EditorState {
    /// Start editing `scene` with nothing selected.
    pub fn new(scene: Scene) -> Self {
        Self::with_opts(scene, EditorOpts::default())
    }

    /// Start editing `scene` with custom options.
    pub fn with_opts(scene: Scene, opts: EditorOpts) -> Self {
        let object_counter = scene.objects.len() + 1;
        Self {
            scene: Arc::new(scene),
            selection: None,
            object_counter,
            opts,
        }
    }

    /// Current scene snapshot.
    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// Replace the scene wholesale (e.g. with a fresh ingestion snapshot).
    ///
    /// The selection is kept; if it no longer resolves it reads as "nothing selected".
    pub fn replace_scene(&mut self, scene: Arc<Scene>) {
        self.scene = scene;
    }

    /// Raw selected path, whether or not it still resolves.
    pub fn selection(&self) -> Option<&PropertyPath> {
        self.selection.as_ref()
    }

    /// The selected property, if the selection resolves.
    pub fn selected(&self) -> Option<Resolved<'_>> {
        self.scene.resolve(self.selection.as_ref()?)
    }

    /// Select a property path.
    pub fn select(&mut self, path: PropertyPath) {
        self.selection = Some(path);
    }

    /// Select a motion, keeping the previously selected property name (`positionY` if none).
    pub fn select_motion(&mut self, object_id: &str, motion_name: &str) {
        let property_name = self
            .selection
            .as_ref()
            .map_or(PropertyName::PositionY, |p| p.property_name);
        self.selection = Some(PropertyPath::new(object_id, motion_name, property_name));
    }

    /// Switch the selected property within the selected motion.
    pub fn select_property(&mut self, name: PropertyName) {
        if let Some(path) = &mut self.selection {
            path.property_name = name;
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn commit(&mut self, next: Option<Scene>) -> bool {
        match next {
            Some(scene) => {
                self.scene = Arc::new(scene);
                true
            }
            None => false,
        }
    }

    /// Replace the curve at `path`. Returns whether the scene changed.
    #[tracing::instrument(skip(self, curve), fields(path = %path))]
    pub fn edit_curve(&mut self, path: &PropertyPath, curve: EasingCurve) -> bool {
        let next = try_apply_curve_edit(&self.scene, path, curve);
        if next.is_none() {
            tracing::warn!("curve edit target does not resolve; ignoring");
        }
        self.commit(next)
    }

    /// Move a handle of the selected curve, clamped to its motion's span.
    pub fn drag_selected(&mut self, handle: Handle, to: Point) -> bool {
        let Some(path) = self.selection.clone() else {
            return false;
        };
        match dragged_curve(&self.scene, &path, handle, to) {
            Some(curve) => self.edit_curve(&path, curve),
            None => false,
        }
    }

    /// Apply a preset to the selected property.
    #[tracing::instrument(skip(self))]
    pub fn apply_preset(&mut self, preset_id: &str) -> bool {
        let Some(path) = self.selection.clone() else {
            return false;
        };
        match preset_curve(&self.scene, &path, preset_id) {
            Some(curve) => self.edit_curve(&path, curve),
            None => {
                tracing::debug!(%path, "preset not applicable");
                false
            }
        }
    }

    fn next_object_id(&mut self) -> String {
        loop {
            let id = format!("NewObj-{:03}", self.object_counter);
            self.object_counter += 1;
            if self.scene.object(&id).is_none() {
                return id;
            }
        }
    }

    /// Add a default authored prop and select its `positionY`. Returns the new id.
    #[tracing::instrument(skip(self))]
    pub fn create_object(&mut self) -> String {
        let id = self.next_object_id();
        let n = self.scene.objects.len();
        let start = Point::new(150.0 + ((n % 5) * 100) as f64, 250.0);
        let color = if self.opts.palette.is_empty() {
            crate::config::DEFAULT_PALETTE[n % crate::config::DEFAULT_PALETTE.len()].to_owned()
        } else {
            self.opts.palette[n % self.opts.palette.len()].clone()
        };

        let span = FrameSpan::new(FrameIndex(0), FrameIndex(NEW_MOTION_END));
        let handles = |from: f64, to: f64| EasingCurve {
            p1: Point::new(33.0, from),
            p2: Point::new(67.0, to),
        };
        let keyed = |from: f64, to: f64| MotionProperty {
            keyframes: [
                Keyframe {
                    frame: span.start,
                    value: from,
                },
                Keyframe {
                    frame: span.end,
                    value: to,
                },
            ],
            curve: handles(from, to),
        };

        let object = SceneObject {
            id: id.clone(),
            kind: ObjectKind::Prop,
            color,
            start_position: start,
            motions: vec![Arc::new(Motion {
                name: NEW_MOTION_NAME.to_owned(),
                start_frame: span.start,
                end_frame: span.end,
                properties: MotionProperties {
                    position_x: Some(keyed(start.x, start.x + 200.0)),
                    position_y: Some(keyed(start.y, start.y)),
                    ..MotionProperties::default()
                },
            })],
            frame_data: None,
        };

        let mut scene = Scene::clone(&self.scene);
        scene.objects.push(Arc::new(object));
        self.scene = Arc::new(scene);
        self.selection = Some(PropertyPath::new(
            id.clone(),
            NEW_MOTION_NAME,
            PropertyName::PositionY,
        ));
        tracing::debug!(%id, "created object");
        id
    }

    /// Remove an object; clears the selection if it pointed at it.
    #[tracing::instrument(skip(self))]
    pub fn delete_object(&mut self, object_id: &str) -> bool {
        if self.scene.object(object_id).is_none() {
            return false;
        }
        let mut scene = Scene::clone(&self.scene);
        scene.objects.retain(|o| o.id != object_id);
        self.scene = Arc::new(scene);
        if self
            .selection
            .as_ref()
            .is_some_and(|p| p.object_id == object_id)
        {
            self.selection = None;
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/state.rs"]
mod tests;

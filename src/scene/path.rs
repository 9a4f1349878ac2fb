use std::sync::Arc;

use crate::scene::model::{Motion, MotionProperty, PropertyName, Scene, SceneObject};

/// Lookup key for one property curve: `(object, motion, property)`.
///
/// It may name something that no longer exists; resolving it then yields `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPath {
    /// Target object id.
    pub object_id: String,
    /// Target motion name within the object.
    pub motion_name: String,
    /// Target property.
    pub property_name: PropertyName,
}

impl PropertyPath {
    /// Build a path from its parts.
    pub fn new(
        object_id: impl Into<String>,
        motion_name: impl Into<String>,
        property_name: PropertyName,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            motion_name: motion_name.into(),
            property_name,
        }
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} > {} > {}]",
            self.object_id, self.motion_name, self.property_name
        )
    }
}

/// Borrowed view of the entities a [`PropertyPath`] points at.
#[derive(Clone, Copy, Debug)]
pub struct Resolved<'a> {
    /// Index of the object in `scene.objects`.
    pub object_index: usize,
    /// The object.
    pub object: &'a Arc<SceneObject>,
    /// Index of the motion in `object.motions`.
    pub motion_index: usize,
    /// The motion.
    pub motion: &'a Arc<Motion>,
    /// The property.
    pub property: &'a MotionProperty,
}

impl Scene {
    /// Resolve a path; `None` when any segment is missing.
    pub fn resolve(&self, path: &PropertyPath) -> Option<Resolved<'_>> {
        let (object_index, object) = self
            .objects
            .iter()
            .enumerate()
            .find(|(_, o)| o.id == path.object_id)?;
        let (motion_index, motion) = object
            .motions
            .iter()
            .enumerate()
            .find(|(_, m)| m.name == path.motion_name)?;
        let property = motion.properties.get(path.property_name)?;
        Some(Resolved {
            object_index,
            object,
            motion_index,
            motion,
            property,
        })
    }
}

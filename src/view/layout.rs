use crate::{
    animation::curve::property_value_at,
    foundation::{
        core::{FrameIndex, LinePoint},
        error::{TimingError, TimingResult},
    },
    scene::model::{PropertyName, Scene},
};

/// Something to draw on the layout canvas for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RenderItem {
    /// An authored object at its evaluated transform.
    Marker {
        /// Object id.
        id: String,
        /// Evaluated `positionX`.
        x: f64,
        /// Evaluated `positionY`.
        y: f64,
        /// Evaluated `rotation` in degrees.
        rotation: f64,
        /// Evaluated `scale`.
        scale: f64,
        /// Fill colour.
        color: String,
    },
    /// A track-derived object's points for this frame.
    Polyline {
        /// Object id.
        id: String,
        /// Points in drawing order.
        points: Vec<LinePoint>,
        /// Stroke colour.
        color: String,
    },
}

impl RenderItem {
    /// Id of the object this item draws.
    pub fn id(&self) -> &str {
        match self {
            Self::Marker { id, .. } | Self::Polyline { id, .. } => id,
        }
    }
}

impl Scene {
    /// Value of `name` on object `object_id` at `frame`; `None` for unknown objects.
    pub fn value_at(&self, object_id: &str, name: PropertyName, frame: FrameIndex) -> Option<f64> {
        self.object(object_id)
            .map(|o| property_value_at(o, name, frame))
    }

    /// Like [`Scene::value_at`] but reports an unknown object as an error.
    pub fn try_value_at(
        &self,
        object_id: &str,
        name: PropertyName,
        frame: FrameIndex,
    ) -> TimingResult<f64> {
        self.value_at(object_id, name, frame)
            .ok_or_else(|| TimingError::evaluation(format!("no object `{object_id}` in scene")))
    }

    /// Point list of `object_id` at `frame`; `None` when the object has no data there.
    pub fn points_at(&self, object_id: &str, frame: FrameIndex) -> Option<&[LinePoint]> {
        self.object(object_id)?.frame_points(frame)
    }
}

/// Everything visible at `frame`, in scene order.
///
/// Track-derived objects appear only on frames where they have at least two points.
pub fn layout_at(scene: &Scene, frame: FrameIndex) -> Vec<RenderItem> {
    scene
        .objects
        .iter()
        .filter_map(|obj| {
            if obj.kind.is_track_derived() {
                let points = obj.frame_points(frame)?;
                if points.len() < 2 {
                    return None;
                }
                return Some(RenderItem::Polyline {
                    id: obj.id.clone(),
                    points: points.to_vec(),
                    color: obj.color.clone(),
                });
            }
            Some(RenderItem::Marker {
                id: obj.id.clone(),
                x: property_value_at(obj, PropertyName::PositionX, frame),
                y: property_value_at(obj, PropertyName::PositionY, frame),
                rotation: property_value_at(obj, PropertyName::Rotation, frame),
                scale: property_value_at(obj, PropertyName::Scale, frame),
                color: obj.color.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/view/layout.rs"]
mod tests;

use std::{collections::BTreeMap, collections::HashSet, path::Path, sync::Arc};

use crate::foundation::{
    core::{FrameIndex, FrameSpan, LinePoint, Point},
    error::{TimingError, TimingResult},
};

/// Per-frame point buffers of a track-derived object, keyed by frame index.
pub type FrameData = BTreeMap<u64, Vec<LinePoint>>;

/// Root of the entity graph: a timeline plus the objects animated on it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene identifier.
    pub id: String,
    /// Timeline length in frames; the playable range is `[0, duration]`.
    pub duration: FrameIndex,
    /// Objects in authored order. Shared pointers let edits keep untouched siblings.
    #[serde(default)]
    pub objects: Vec<Arc<SceneObject>>,
}

/// One animated object in a [`Scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    /// Stable identifier, unique within the scene.
    pub id: String,
    /// What drives this object: authored motions or tracked frame data.
    #[serde(alias = "type")]
    pub kind: ObjectKind,
    /// CSS-style colour string (`#rrggbb`).
    pub color: String,
    /// Rest position; also the default for `positionX`/`positionY`.
    pub start_position: Point,
    /// Motions in authored order.
    #[serde(default)]
    pub motions: Vec<Arc<Motion>>,
    /// Tracked point lists per frame (track-derived kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_data: Option<FrameData>,
}

/// Closed set of object kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    /// Authored character driven by motions.
    Character,
    /// Authored prop driven by motions.
    #[serde(alias = "object")]
    Prop,
    /// Line track ingested from per-frame point data.
    #[serde(alias = "line")]
    TrackLine,
    /// Fitted curve ingested from per-frame point data.
    #[serde(alias = "curve")]
    FittedCurve,
}

impl ObjectKind {
    /// Whether geometry comes from `frameData` instead of curve evaluation.
    pub fn is_track_derived(self) -> bool {
        matches!(self, Self::TrackLine | Self::FittedCurve)
    }
}

/// An authored animation span on one object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    /// Name, unique within the owning object.
    pub name: String,
    /// First frame of the motion.
    pub start_frame: FrameIndex,
    /// Last frame of the motion (inclusive, `>= start_frame`).
    pub end_frame: FrameIndex,
    /// Animated properties.
    #[serde(default)]
    pub properties: MotionProperties,
}

impl Motion {
    /// Inclusive frame span covered by this motion.
    pub fn span(&self) -> FrameSpan {
        FrameSpan::new(self.start_frame, self.end_frame)
    }
}

/// The animatable scalar properties.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PropertyName {
    /// Horizontal position in pixels.
    PositionX,
    /// Vertical position in pixels.
    PositionY,
    /// Rotation in degrees.
    Rotation,
    /// Unitless scale factor.
    Scale,
}

impl PropertyName {
    /// Every property in canonical order.
    pub const ALL: [PropertyName; 4] = [
        PropertyName::PositionX,
        PropertyName::PositionY,
        PropertyName::Rotation,
        PropertyName::Scale,
    ];

    /// Wire name of the property.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PositionX => "positionX",
            Self::PositionY => "positionY",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        }
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropertyName {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TimingError::validation(format!("unknown property '{s}'")))
    }
}

/// One optional slot per [`PropertyName`]; an empty slot means "not animated here".
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionProperties {
    /// `positionX` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<MotionProperty>,
    /// `positionY` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<MotionProperty>,
    /// `rotation` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<MotionProperty>,
    /// `scale` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<MotionProperty>,
}

impl MotionProperties {
    fn slot(&self, name: PropertyName) -> &Option<MotionProperty> {
        match name {
            PropertyName::PositionX => &self.position_x,
            PropertyName::PositionY => &self.position_y,
            PropertyName::Rotation => &self.rotation,
            PropertyName::Scale => &self.scale,
        }
    }

    fn slot_mut(&mut self, name: PropertyName) -> &mut Option<MotionProperty> {
        match name {
            PropertyName::PositionX => &mut self.position_x,
            PropertyName::PositionY => &mut self.position_y,
            PropertyName::Rotation => &mut self.rotation,
            PropertyName::Scale => &mut self.scale,
        }
    }

    /// Property in slot `name`, if present.
    pub fn get(&self, name: PropertyName) -> Option<&MotionProperty> {
        self.slot(name).as_ref()
    }

    /// Mutable property in slot `name`, if present.
    pub fn get_mut(&mut self, name: PropertyName) -> Option<&mut MotionProperty> {
        self.slot_mut(name).as_mut()
    }

    /// Fill slot `name`, returning what was there.
    pub fn insert(&mut self, name: PropertyName, prop: MotionProperty) -> Option<MotionProperty> {
        self.slot_mut(name).replace(prop)
    }

    /// Present properties in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyName, &MotionProperty)> + '_ {
        PropertyName::ALL
            .into_iter()
            .filter_map(move |n| self.get(n).map(|p| (n, p)))
    }

    /// Whether no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Keyframe pair plus value-shaping curve for one property over one motion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionProperty {
    /// Start value at `startFrame` and end value at `endFrame`.
    pub keyframes: [Keyframe; 2],
    /// Control points between the two keyframes.
    pub curve: EasingCurve,
}

impl MotionProperty {
    /// A property whose control points sit on the straight line between the keyframes.
    pub fn linear(span: FrameSpan, from: f64, to: f64) -> Self {
        let keyframes = [
            Keyframe {
                frame: span.start,
                value: from,
            },
            Keyframe {
                frame: span.end,
                value: to,
            },
        ];
        Self {
            keyframes,
            curve: EasingCurve::linear_between(keyframes[0], keyframes[1]),
        }
    }

    /// Start keyframe.
    pub fn start(&self) -> Keyframe {
        self.keyframes[0]
    }

    /// End keyframe.
    pub fn end(&self) -> Keyframe {
        self.keyframes[1]
    }
}

/// One anchor of a [`MotionProperty`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Frame the value is pinned to.
    pub frame: FrameIndex,
    /// Value in the property's unit.
    pub value: f64,
}

impl Keyframe {
    /// The keyframe as a `(frame, value)` point in graph space.
    pub fn to_point(self) -> Point {
        Point::new(self.frame.as_f64(), self.value)
    }
}

/// Two inner control points of a cubic curve, in `(frame, value)` space.
///
/// Only the `y` components shape the evaluated value; `x` places the drag handles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EasingCurve {
    /// First control point.
    pub p1: Point,
    /// Second control point.
    pub p2: Point,
}

impl EasingCurve {
    /// Control points at the 1/3 and 2/3 marks between two anchors.
    pub fn linear_between(a: Keyframe, b: Keyframe) -> Self {
        let (a, b) = (a.to_point(), b.to_point());
        Self {
            p1: a.lerp(b, 1.0 / 3.0),
            p2: a.lerp(b, 2.0 / 3.0),
        }
    }
}

impl SceneObject {
    /// Value a property takes when no motion animates it.
    pub fn default_value(&self, name: PropertyName) -> f64 {
        match name {
            PropertyName::PositionX => self.start_position.x,
            PropertyName::PositionY => self.start_position.y,
            PropertyName::Rotation => 0.0,
            PropertyName::Scale => 1.0,
        }
    }

    /// First motion with the given name.
    pub fn motion(&self, name: &str) -> Option<&Arc<Motion>> {
        self.motions.iter().find(|m| m.name == name)
    }

    /// Tracked points at `frame`; `None` when the object was absent at that frame.
    pub fn frame_points(&self, frame: FrameIndex) -> Option<&[LinePoint]> {
        self.frame_data
            .as_ref()?
            .get(&frame.0)
            .map(Vec::as_slice)
    }

    /// Union of all motion spans, used for timeline extents.
    pub fn nominal_span(&self) -> Option<FrameSpan> {
        self.motions
            .iter()
            .map(|m| m.span())
            .reduce(|a, b| a.include(b.start).include(b.end))
    }
}

impl Scene {
    /// A scene with no objects and zero duration.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration: FrameIndex::ZERO,
            objects: Vec::new(),
        }
    }

    /// Object with the given id.
    pub fn object(&self, id: &str) -> Option<&Arc<SceneObject>> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Report structural problems. Evaluation does not require a valid scene.
    pub fn validate(&self) -> TimingResult<()> {
        let mut ids = HashSet::new();
        for obj in &self.objects {
            if !ids.insert(obj.id.as_str()) {
                return Err(TimingError::validation(format!(
                    "duplicate object id '{}'",
                    obj.id
                )));
            }

            let mut names = HashSet::new();
            for motion in &obj.motions {
                if !names.insert(motion.name.as_str()) {
                    return Err(TimingError::validation(format!(
                        "object '{}' has duplicate motion name '{}'",
                        obj.id, motion.name
                    )));
                }
                if motion.start_frame > motion.end_frame {
                    return Err(TimingError::validation(format!(
                        "motion '{}' on '{}' has startFrame > endFrame",
                        motion.name, obj.id
                    )));
                }
                for (name, prop) in motion.properties.iter() {
                    if prop.start().frame != motion.start_frame
                        || prop.end().frame != motion.end_frame
                    {
                        return Err(TimingError::validation(format!(
                            "property '{name}' of motion '{}' on '{}' has keyframes off the motion bounds",
                            motion.name, obj.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize the whole scene as pretty JSON.
    #[tracing::instrument(skip(self), fields(scene = %self.id))]
    pub fn to_json_pretty(&self) -> TimingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a scene document.
    pub fn from_json_str(s: &str) -> TimingResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a scene document from disk.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> TimingResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            TimingError::Other(anyhow::Error::new(e).context(format!(
                "read scene '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Write the scene as pretty JSON, creating parent directories as needed.
    #[tracing::instrument(skip(self), fields(scene = %self.id))]
    pub fn write_path(&self, path: &Path) -> TimingResult<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TimingError::Other(e.into()))?;
        }
        std::fs::write(path, json).map_err(|e| {
            TimingError::Other(anyhow::Error::new(e).context(format!(
                "write scene '{}'",
                path.display()
            )))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

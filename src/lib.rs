//! Axis timing is the keyframe timing and curve evaluation engine behind the axis
//! timeline editor.
//!
//! The crate is pull-based and never draws anything itself:
//!
//! - Build a [`Scene`] from the authored template ([`Scene::demo`]), from exported JSON,
//!   or by ingesting per-frame point tracks ([`ingest`], [`TrackIngestor`])
//! - Query values and point lists per frame ([`Scene::value_at`], [`layout_at`])
//! - Edit curves structurally ([`apply_curve_edit`], [`EditorState`]) and apply
//!   [`PRESETS`]
//! - Drive the shared current frame with a [`Transport`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod edit;
pub(crate) mod ingest;
pub(crate) mod playback;
pub(crate) mod presets;
pub(crate) mod scene;
pub(crate) mod view;

pub mod config;

pub use crate::foundation::core::{BezPath, FrameIndex, FrameSpan, LinePoint, Point};
pub use crate::foundation::error::{TimingError, TimingResult};

pub use crate::animation::curve::{
    cubic_bezier_1d, evaluate, motion_progress, property_value_at, sample_curve,
    sample_property,
};
pub use crate::config::{ColorPolicy, DEFAULT_PALETTE, EditorOpts, IngestOpts, TransportOpts};
pub use crate::edit::ops::{
    Handle, apply_curve_edit, clamp_handle, drag_handle, dragged_curve, try_apply_curve_edit,
};
pub use crate::edit::state::EditorState;
pub use crate::ingest::builder::{
    IngestStats, SceneHandle, TrackIngestor, TrackKind, ingest, ingest_document, ingest_reader,
    ingest_with,
};
pub use crate::ingest::decoder::FrameStreamDecoder;
pub use crate::ingest::record::{FrameRecord, TrackRecord, decode_document};
pub use crate::playback::scheduler::{CallbackId, FrameScheduler, ManualScheduler};
pub use crate::playback::transport::{
    PlaybackState, SubscriptionId, TickInfo, Transport, TransportEvent,
};
pub use crate::presets::library::{
    CurvePreset, PRESETS, PresetFactors, curve_from_factors, find_preset, preset_curve,
};
pub use crate::scene::model::{
    EasingCurve, FrameData, Keyframe, Motion, MotionProperties, MotionProperty, ObjectKind,
    PropertyName, Scene, SceneObject,
};
pub use crate::scene::path::{PropertyPath, Resolved};
pub use crate::view::dope_sheet::{DopeBar, DopeRow, DopeSheet};
pub use crate::view::graph::{GraphView, VALUE_PADDING, Viewport};
pub use crate::view::layout::{RenderItem, layout_at};

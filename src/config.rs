//! Option structs for ingestion, playback and the editor.

use crate::foundation::{core::FrameIndex, math::stable_hash_str};

/// Colours handed out to new objects.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#fbbf24", "#f87171", "#a78bfa", "#f472b6", "#34d399", "#60a5fa",
];

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect()
}

/// How ingested objects pick a colour from the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorPolicy {
    /// Hash of the object id; stable across partial reloads.
    #[default]
    Hash,
    /// Order of first appearance.
    InsertionOrder,
}

/// Track ingestion options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IngestOpts {
    /// Id given to the reconstructed scene.
    pub scene_id: String,
    /// Records merged per published snapshot.
    pub batch_size: usize,
    /// Colour assignment policy.
    pub color_policy: ColorPolicy,
    /// Palette colours are drawn from.
    pub palette: Vec<String>,
}

impl Default for IngestOpts {
    fn default() -> Self {
        Self {
            scene_id: "S_Backend_Data".to_owned(),
            batch_size: 100,
            color_policy: ColorPolicy::Hash,
            palette: default_palette(),
        }
    }
}

impl IngestOpts {
    /// Colour for an object id under this policy; `ordinal` is its first-appearance index.
    pub fn color_for(&self, object_id: &str, ordinal: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[0].to_owned();
        }
        let idx = match self.color_policy {
            ColorPolicy::Hash => (stable_hash_str(object_id) % self.palette.len() as u64) as usize,
            ColorPolicy::InsertionOrder => ordinal % self.palette.len(),
        };
        self.palette[idx].clone()
    }
}

/// Playback options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransportOpts {
    /// Last playable frame.
    pub duration: FrameIndex,
    /// Loop back to 0 after `duration`; otherwise playback stops there.
    pub wrap: bool,
}

impl Default for TransportOpts {
    fn default() -> Self {
        Self {
            duration: FrameIndex::ZERO,
            wrap: true,
        }
    }
}

/// Interactive editor options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorOpts {
    /// Palette for objects created in the editor.
    pub palette: Vec<String>,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

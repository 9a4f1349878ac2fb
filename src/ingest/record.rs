use serde::Deserialize;

use crate::foundation::{
    core::{FrameIndex, LinePoint},
    error::{TimingError, TimingResult},
};

/// One tracked polyline (or fitted curve) in one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackRecord {
    /// Persistent tracker id.
    pub id: u64,
    /// Ordered points.
    #[serde(default)]
    pub points: Vec<LinePoint>,
}

/// All tracks reported for one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRecord {
    /// Frame the tracks belong to.
    pub frame_index: FrameIndex,
    /// Detected lines.
    #[serde(default)]
    pub lines: Vec<TrackRecord>,
    /// Fitted curves.
    #[serde(default)]
    pub curves: Vec<TrackRecord>,
}

impl FrameRecord {
    /// Record with lines only.
    pub fn new(frame_index: u64, lines: Vec<TrackRecord>) -> Self {
        Self {
            frame_index: FrameIndex(frame_index),
            lines,
            curves: Vec::new(),
        }
    }

    /// Lenient parse of one raw record.
    ///
    /// `frame_index` is required. `lines`/`curves` may be absent or null; entries inside
    /// them that do not parse are dropped individually.
    pub fn from_value(value: &serde_json::Value) -> TimingResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| TimingError::ingest("frame record is not an object"))?;
        let frame_index = obj
            .get("frame_index")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| TimingError::ingest("frame record has no integer frame_index"))?;

        Ok(Self {
            frame_index: FrameIndex(frame_index),
            lines: tracks(obj.get("lines"), frame_index, "lines"),
            curves: tracks(obj.get("curves"), frame_index, "curves"),
        })
    }
}

fn tracks(field: Option<&serde_json::Value>, frame: u64, name: &str) -> Vec<TrackRecord> {
    let Some(items) = field.and_then(serde_json::Value::as_array) else {
        if field.is_some_and(|v| !v.is_null()) {
            tracing::warn!(frame, field = name, "track list is not an array; treating as empty");
        }
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match TrackRecord::deserialize(item) {
            Ok(track) => Some(track),
            Err(err) => {
                tracing::warn!(frame, field = name, %err, "skipping malformed track entry");
                None
            }
        })
        .collect()
}

/// Decode a complete ingestion document.
///
/// Accepts a JSON array of records, an object with a `frames` array, a single record,
/// or a stream of concatenated records. Malformed records are skipped; the second
/// value is how many were.
pub fn decode_document(text: &str) -> TimingResult<(Vec<FrameRecord>, usize)> {
    if text.trim().is_empty() {
        return Ok((Vec::new(), 0));
    }
    let value = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => value,
        Err(_) => {
            let mut decoder = crate::ingest::decoder::FrameStreamDecoder::new();
            let mut records = decoder.push(text);
            records.extend(decoder.finish());
            return Ok((records, decoder.skipped()));
        }
    };

    records_from_value(&value)
}

/// Records held by one parsed JSON value: an array of records, an object with a
/// `frames` array, or a single record. The second value counts skipped items.
pub(crate) fn records_from_value(
    value: &serde_json::Value,
) -> TimingResult<(Vec<FrameRecord>, usize)> {
    let items: Vec<&serde_json::Value> = match value {
        serde_json::Value::Array(items) => items.iter().collect(),
        serde_json::Value::Object(map) => match map.get("frames") {
            Some(serde_json::Value::Array(items)) => items.iter().collect(),
            Some(_) => return Err(TimingError::ingest("`frames` is not an array")),
            None => vec![value],
        },
        _ => return Err(TimingError::ingest("document is neither a record nor a list")),
    };

    let mut skipped = 0;
    let records = items
        .into_iter()
        .filter_map(|item| match FrameRecord::from_value(item) {
            Ok(rec) => Some(rec),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed frame record");
                skipped += 1;
                None
            }
        })
        .collect();
    Ok((records, skipped))
}

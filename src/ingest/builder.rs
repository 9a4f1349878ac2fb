use std::{
    collections::HashMap,
    io::Read,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    config::IngestOpts,
    foundation::{
        core::{FrameIndex, FrameSpan, Point},
        error::{TimingError, TimingResult},
    },
    ingest::{
        decoder::FrameStreamDecoder,
        record::{FrameRecord, TrackRecord},
    },
    scene::model::{Motion, MotionProperties, ObjectKind, Scene, SceneObject},
};

const READ_CHUNK: usize = 8 * 1024;

/// Which list of a frame record a track came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackKind {
    /// `lines[]`
    Line,
    /// `curves[]`
    Curve,
}

impl TrackKind {
    /// Object kind produced for this track kind.
    pub fn object_kind(self) -> ObjectKind {
        match self {
            Self::Line => ObjectKind::TrackLine,
            Self::Curve => ObjectKind::FittedCurve,
        }
    }

    /// Scene object id for tracker id `id`.
    pub fn object_id(self, id: u64) -> String {
        match self {
            Self::Line => format!("line-{id}"),
            Self::Curve => format!("curve-{id}"),
        }
    }

    fn motion_name(self) -> &'static str {
        match self {
            Self::Line => "Tracked Line",
            Self::Curve => "Fitted Curve",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TrackKey {
    kind: TrackKind,
    id: u64,
}

/// Counters for one ingestion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestStats {
    /// Records merged.
    pub records: usize,
    /// Records dropped as malformed.
    pub skipped: usize,
    /// Distinct tracks (objects) seen.
    pub objects: usize,
    /// Snapshots published.
    pub batches: usize,
}

/// Shared, swappable scene reference.
///
/// Readers take a cheap `Arc<Scene>` snapshot and never see a half-merged batch.
#[derive(Clone, Debug)]
pub struct SceneHandle {
    inner: Arc<RwLock<Arc<Scene>>>,
}

impl SceneHandle {
    /// Handle initially pointing at `scene`.
    pub fn new(scene: Arc<Scene>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(scene)),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<Scene> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish a new snapshot.
    pub fn store(&self, scene: Arc<Scene>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = scene;
    }
}

/// Builds a scene from frame records, one batch at a time.
///
/// Identity comes from the tracker id: every occurrence of `(kind, id)` lands in the
/// same object. Merges only add frames (a repeated frame for the same id replaces the
/// earlier point list). Objects shared with a published snapshot are copied on write.
#[derive(Clone, Debug)]
pub struct TrackIngestor {
    opts: IngestOpts,
    scene: Scene,
    index: HashMap<TrackKey, usize>,
    stats: IngestStats,
}

impl TrackIngestor {
    /// Ingestor producing an empty scene named after `opts.scene_id`.
    pub fn new(opts: IngestOpts) -> Self {
        Self {
            scene: Scene::empty(opts.scene_id.clone()),
            opts,
            index: HashMap::new(),
            stats: IngestStats::default(),
        }
    }

    /// Options in use.
    pub fn opts(&self) -> &IngestOpts {
        &self.opts
    }

    /// Counters so far.
    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Scene built so far.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Snapshot of the scene built so far. Objects are shared, not copied.
    pub fn snapshot(&self) -> Arc<Scene> {
        Arc::new(self.scene.clone())
    }

    /// Finish and take the scene.
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    /// Count records the caller dropped before they reached the ingestor.
    pub fn note_skipped(&mut self, n: usize) {
        self.stats.skipped += n;
    }

    /// Merge one frame record.
    pub fn merge_record(&mut self, record: &FrameRecord) {
        let frame = record.frame_index;
        self.scene.duration = self.scene.duration.max(frame);
        for track in &record.lines {
            self.merge_track(TrackKind::Line, track, frame);
        }
        for track in &record.curves {
            self.merge_track(TrackKind::Curve, track, frame);
        }
        self.stats.records += 1;
    }

    /// Merge a batch of records.
    pub fn merge_batch(&mut self, records: &[FrameRecord]) {
        for record in records {
            self.merge_record(record);
        }
        tracing::debug!(
            records = records.len(),
            objects = self.scene.objects.len(),
            duration = self.scene.duration.0,
            "merged batch"
        );
    }

    fn merge_track(&mut self, kind: TrackKind, track: &TrackRecord, frame: FrameIndex) {
        let key = TrackKey { kind, id: track.id };
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let object = self.new_object(kind, track, frame);
                self.scene.objects.push(Arc::new(object));
                let idx = self.scene.objects.len() - 1;
                self.index.insert(key, idx);
                self.stats.objects += 1;
                idx
            }
        };

        let object = Arc::make_mut(&mut self.scene.objects[idx]);
        object
            .frame_data
            .get_or_insert_with(Default::default)
            .insert(frame.0, track.points.clone());
        if let Some(motion) = object.motions.first_mut() {
            let span = motion.span().include(frame);
            if span != motion.span() {
                let motion = Arc::make_mut(motion);
                motion.start_frame = span.start;
                motion.end_frame = span.end;
            }
        }
    }

    fn new_object(&self, kind: TrackKind, track: &TrackRecord, frame: FrameIndex) -> SceneObject {
        let id = kind.object_id(track.id);
        let color = self.opts.color_for(&id, self.index.len());
        let start_position = track
            .points
            .first()
            .map_or(Point::ZERO, |[x, y]| Point::new(*x, *y));
        SceneObject {
            id,
            kind: kind.object_kind(),
            color,
            start_position,
            motions: vec![Arc::new(nominal_motion(kind, FrameSpan::single(frame)))],
            frame_data: Some(Default::default()),
        }
    }

    /// Merge `records` in batches of `batch_size`, publishing a snapshot to `handle`
    /// and calling `on_batch` after each one.
    pub fn ingest_batched(
        &mut self,
        records: &[FrameRecord],
        handle: &SceneHandle,
        mut on_batch: impl FnMut(&IngestStats),
    ) {
        for chunk in records.chunks(self.opts.batch_size.max(1)) {
            self.publish(chunk, handle);
            on_batch(&self.stats);
        }
    }

    fn publish(&mut self, chunk: &[FrameRecord], handle: &SceneHandle) {
        self.merge_batch(chunk);
        handle.store(self.snapshot());
        self.stats.batches += 1;
    }
}

fn nominal_motion(kind: TrackKind, span: FrameSpan) -> Motion {
    Motion {
        name: kind.motion_name().to_owned(),
        start_frame: span.start,
        end_frame: span.end,
        properties: MotionProperties::default(),
    }
}

/// Build a scene from a complete list of frame records with default options.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn ingest(frames: &[FrameRecord]) -> Scene {
    ingest_with(frames, IngestOpts::default())
}

/// Build a scene from a complete list of frame records.
pub fn ingest_with(frames: &[FrameRecord], opts: IngestOpts) -> Scene {
    let mut ingestor = TrackIngestor::new(opts);
    ingestor.merge_batch(frames);
    ingestor.into_scene()
}

/// Decode a whole document and ingest it.
#[tracing::instrument(skip(text, opts), fields(bytes = text.len()))]
pub fn ingest_document(text: &str, opts: IngestOpts) -> TimingResult<(Scene, IngestStats)> {
    let (records, skipped) = crate::ingest::record::decode_document(text)?;
    let mut ingestor = TrackIngestor::new(opts);
    ingestor.note_skipped(skipped);
    ingestor.merge_batch(&records);
    let stats = ingestor.stats();
    Ok((ingestor.into_scene(), stats))
}

/// Stream records from `reader`, merging every `batch_size` records and publishing a
/// snapshot to `handle` between batches.
#[tracing::instrument(skip_all, fields(batch_size = opts.batch_size))]
pub fn ingest_reader<R: Read>(
    mut reader: R,
    opts: IngestOpts,
    handle: &SceneHandle,
    mut on_batch: impl FnMut(&IngestStats),
) -> TimingResult<IngestStats> {
    let batch_size = opts.batch_size.max(1);
    let mut ingestor = TrackIngestor::new(opts);
    let mut decoder = FrameStreamDecoder::new();
    let mut pending: Vec<FrameRecord> = Vec::new();
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        let n = reader
            .read(&mut chunk)
            .map_err(|e| TimingError::ingest(format!("read frame stream: {e}")))?;
        if n == 0 {
            break;
        }
        pending.extend(decoder.push_bytes(&chunk[..n]));
        while pending.len() >= batch_size {
            let batch: Vec<FrameRecord> = pending.drain(..batch_size).collect();
            ingestor.publish(&batch, handle);
            on_batch(&ingestor.stats);
        }
    }

    pending.extend(decoder.finish());
    ingestor.note_skipped(decoder.skipped());
    if !pending.is_empty() || ingestor.stats.batches == 0 {
        ingestor.publish(&pending, handle);
        on_batch(&ingestor.stats);
    }

    let stats = ingestor.stats();
    tracing::info!(
        records = stats.records,
        skipped = stats.skipped,
        objects = stats.objects,
        "stream ingested"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/builder.rs"]
mod tests;

use crate::{
    foundation::error::TimingError,
    ingest::record::{FrameRecord, records_from_value},
};

/// Incremental splitter for a stream of concatenated JSON frame records.
///
/// Object boundaries are found by tracking brace depth; braces inside JSON strings do
/// not count. Anything outside a top-level object (whitespace, commas, an enclosing
/// `[`/`]`) is ignored. A top-level `{"frames": [...]}` object yields its items. Scan
/// state survives between chunks, so each byte is looked at once.
#[derive(Clone, Debug, Default)]
pub struct FrameStreamDecoder {
    buf: String,
    scan_pos: usize,
    object_start: Option<usize>,
    depth: usize,
    in_string: bool,
    escaped: bool,
    utf8_tail: Vec<u8>,
    decoded: usize,
    skipped: usize,
}

impl FrameStreamDecoder {
    /// Empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records decoded so far.
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Objects that were complete but not valid frame records.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Bytes held back waiting for the rest of an object.
    pub fn buffered_len(&self) -> usize {
        self.buf.len() + self.utf8_tail.len()
    }

    /// Feed a text chunk; returns every record completed by it.
    pub fn push(&mut self, chunk: &str) -> Vec<FrameRecord> {
        self.buf.push_str(chunk);
        self.scan()
    }

    /// Feed raw bytes. A multi-byte character split across chunks is held until complete.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<FrameRecord> {
        self.utf8_tail.extend_from_slice(bytes);
        let pending = std::mem::take(&mut self.utf8_tail);
        let mut rest = pending.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    self.buf.push_str(s);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    self.buf.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(bad) => {
                            self.buf.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        None => {
                            self.utf8_tail = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        self.scan()
    }

    /// End of input. Records a trailing partial object as skipped.
    pub fn finish(&mut self) -> Vec<FrameRecord> {
        let records = self.scan();
        if self.object_start.is_some() || !self.utf8_tail.is_empty() {
            tracing::warn!(
                bytes = self.buffered_len(),
                "stream ended inside a record; dropping it"
            );
            self.skipped += 1;
        }
        self.buf.clear();
        self.utf8_tail.clear();
        self.scan_pos = 0;
        self.object_start = None;
        self.depth = 0;
        self.in_string = false;
        self.escaped = false;
        records
    }

    fn scan(&mut self) -> Vec<FrameRecord> {
        let mut out = Vec::new();
        let bytes = self.buf.as_bytes();
        let mut completed = Vec::new();

        for (i, &b) in bytes.iter().enumerate().skip(self.scan_pos) {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if b == b'\\' {
                    self.escaped = true;
                } else if b == b'"' {
                    self.in_string = false;
                }
                continue;
            }
            match b {
                b'"' if self.depth > 0 => self.in_string = true,
                b'{' => {
                    if self.depth == 0 {
                        self.object_start = Some(i);
                    }
                    self.depth += 1;
                }
                b'}' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0
                        && let Some(start) = self.object_start.take()
                    {
                        completed.push(start..i + 1);
                    }
                }
                _ => {}
            }
        }

        for range in completed {
            let (records, skipped) = parse_object(&self.buf[range]);
            out.extend(records);
            self.skipped += skipped;
        }

        // Keep only the unfinished object, if any.
        match self.object_start {
            Some(start) => {
                self.buf.drain(..start);
                self.scan_pos = self.buf.len();
                self.object_start = Some(0);
            }
            None => {
                self.buf.clear();
                self.scan_pos = 0;
            }
        }
        self.decoded += out.len();
        out
    }
}

/// Records in one complete top-level object and how many were skipped. A `frames`
/// wrapper object expands into its items.
fn parse_object(text: &str) -> (Vec<FrameRecord>, usize) {
    let parsed = serde_json::from_str::<serde_json::Value>(text)
        .map_err(TimingError::from)
        .and_then(|v| records_from_value(&v));
    match parsed {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(%err, "skipping malformed streamed record");
            (Vec::new(), 1)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/decoder.rs"]
mod tests;

//! Streaming analysis-result reader.
//!
//! The backend streams newline-delimited records over a chunked HTTP body;
//! a record is either blank or the literal `data:` prefix followed by a JSON
//! object. Progress records are surfaced through a callback as they arrive;
//! the final result is resolved by field shape when the stream ends (see
//! [`ResultCandidate`]).
//!
//! [`StreamingResultReader`] is deliberately free of I/O: it is fed raw
//! chunks and resolved once, so the same logic runs identically whatever the
//! chunk boundaries. [`read_analysis_stream`] drives it from an async byte
//! stream.

use bytes::Bytes;
use futures_util::{pin_mut, Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, TildaError};
use crate::stream::candidate::{progress_of, ResultCandidate};
use crate::stream::decoder::Utf8Decoder;

/// Line prefix marking an event record.
pub const DATA_PREFIX: &str = "data:";

/// Incremental reader over one streaming analysis response.
///
/// Feed it chunks as they arrive, then call [`finish`](Self::finish) exactly
/// once when the stream ends. The progress callback is invoked synchronously,
/// in arrival order, from inside `feed`/`finish`.
pub struct StreamingResultReader<F>
where
    F: FnMut(f64, &str),
{
    decoder: Utf8Decoder,
    /// Decoded text not yet terminated by a newline.
    buffer: String,
    /// Full decoded body, kept for the whole-body JSON fallback.
    transcript: String,
    candidate: ResultCandidate,
    on_progress: F,
}

impl<F> StreamingResultReader<F>
where
    F: FnMut(f64, &str),
{
    /// Create a reader that reports progress records to `on_progress`.
    pub fn new(on_progress: F) -> Self {
        Self {
            decoder: Utf8Decoder::new(),
            buffer: String::new(),
            transcript: String::new(),
            candidate: ResultCandidate::None,
            on_progress,
        }
    }

    /// Consume one chunk of the response body.
    ///
    /// Chunk boundaries carry no meaning: a chunk may contain zero, one, or
    /// many complete lines plus a trailing partial line, and may split a
    /// multi-byte character.
    pub fn feed(&mut self, chunk: &[u8]) {
        let text = self.decoder.decode(chunk);
        self.transcript.push_str(&text);
        self.buffer.push_str(&text);

        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            self.process_line(line.trim_end_matches(&['\r', '\n'][..]));
        }
    }

    /// Flush the trailing partial line and resolve the final result.
    ///
    /// Resolution order: authoritative candidate, then fallback candidate,
    /// then the entire body parsed as one JSON document (the backend may not
    /// have streamed at all), then [`TildaError::NoPayload`].
    pub fn finish(mut self) -> Result<Value> {
        let tail = self.decoder.finish();
        self.transcript.push_str(&tail);
        self.buffer.push_str(&tail);

        // A final line without a terminating newline can still be a complete
        // record.
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.process_line(line.trim_end_matches('\r'));
        }

        match self.candidate.into_value() {
            Some(value) => Ok(value),
            None => {
                debug!("no classified record, attempting whole-body JSON parse");
                serde_json::from_str(self.transcript.trim()).map_err(|_| TildaError::NoPayload)
            }
        }
    }

    fn process_line(&mut self, line: &str) {
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            // Blank lines and non-event lines are part of the framing.
            return;
        };
        let data = data.trim();
        if data.is_empty() {
            return;
        }
        match serde_json::from_str::<Value>(data) {
            Ok(payload) => {
                if let Some((progress, step)) = progress_of(&payload) {
                    (self.on_progress)(progress, step);
                }
                self.candidate = std::mem::take(&mut self.candidate).observe(&payload);
            }
            Err(err) => {
                // Malformed records are skipped; the stream goes on.
                warn!(error = %err, "skipping malformed stream record");
            }
        }
    }
}

/// Drive a [`StreamingResultReader`] over an async byte stream to completion.
///
/// A transport error mid-stream (including a caller-side abort of the
/// underlying request) is treated as an early end of stream: the buffered
/// records are flushed and resolution proceeds normally rather than hanging
/// or discarding what already arrived.
pub async fn read_analysis_stream<S, F>(stream: S, on_progress: F) -> Result<Value>
where
    S: Stream<Item = Result<Bytes>>,
    F: FnMut(f64, &str),
{
    pin_mut!(stream);
    let mut reader = StreamingResultReader::new(on_progress);
    while let Some(next) = stream.next().await {
        match next {
            Ok(chunk) => reader.feed(&chunk),
            Err(err) => {
                warn!(error = %err, "stream ended early, resolving buffered records");
                break;
            }
        }
    }
    reader.finish()
}

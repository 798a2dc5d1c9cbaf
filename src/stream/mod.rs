//! Streaming analysis-result protocol.
//!
//! The analysis backend answers `POST /api/analyze-*` with a chunked body of
//! newline-delimited records. A record is either blank or the literal
//! `data: ` prefix followed by a JSON object:
//! - progress: `{"progress": <0-100>, "step": "<label>"}`
//! - final result: any object with `summary` and `metadata` (authoritative),
//!   or a result-shaped object without `progress`/`step` (fallback)
//!
//! # Module structure
//! - `decoder` - incremental UTF-8 decoding across chunk boundaries
//! - `candidate` - final-result classification and priority rule
//! - `reader` - the streaming reader and its async driver

mod candidate;
mod decoder;
mod reader;

// Re-export public types
pub use candidate::{progress_of, ResultCandidate};
pub use decoder::Utf8Decoder;
pub use reader::{read_analysis_stream, StreamingResultReader, DATA_PREFIX};

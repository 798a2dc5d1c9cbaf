//! Saving analysis results to disk.
//!
//! The backend returns annotated frames and stills as base64-encoded JPEG
//! strings, sometimes wrapped in a `data:image/...;base64,` data URL. This
//! module decodes them and writes the textual parts of the result next to
//! them.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::warn;

use crate::error::Result;
use crate::models::AnalysisResult;

/// What was written by [`save_result`].
#[derive(Debug, Clone, PartialEq)]
pub struct SavedArtifacts {
    pub directory: PathBuf,
    /// Number of frame images written.
    pub frames: usize,
    /// Whether an annotated still was written.
    pub annotated: bool,
}

/// Timestamped default output directory, e.g. `analysis_20260823_141503`.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(format!(
        "analysis_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Write an analysis result into `dir`.
///
/// Produces `result.json` (the full payload), `summary.txt` and
/// `statistics.txt` when present, `frame_NNN.jpg` for each decodable frame,
/// and `annotated.jpg` for an image result. Undecodable image fields are
/// skipped with a warning.
pub fn save_result(result: &AnalysisResult, dir: &Path) -> Result<SavedArtifacts> {
    std::fs::create_dir_all(dir)?;

    std::fs::write(dir.join("result.json"), serde_json::to_vec_pretty(result)?)?;
    if !result.summary.is_empty() {
        std::fs::write(dir.join("summary.txt"), &result.summary)?;
    }
    if let Some(statistics) = &result.statistics {
        std::fs::write(dir.join("statistics.txt"), statistics)?;
    }

    let mut frames = 0;
    for (index, frame) in result.frames.iter().enumerate() {
        match decode_image(frame) {
            Some(bytes) => {
                std::fs::write(dir.join(format!("frame_{:03}.jpg", index)), bytes)?;
                frames += 1;
            }
            None => warn!(index, "skipping frame with undecodable image data"),
        }
    }

    let mut annotated = false;
    if let Some(image) = result.annotated_image.as_deref() {
        match decode_image(image) {
            Some(bytes) => {
                std::fs::write(dir.join("annotated.jpg"), bytes)?;
                annotated = true;
            }
            None => warn!("skipping annotated image with undecodable data"),
        }
    }

    Ok(SavedArtifacts {
        directory: dir.to_path_buf(),
        frames,
        annotated,
    })
}

/// Decode a base64 image field, tolerating a data-URL prefix.
fn decode_image(encoded: &str) -> Option<Vec<u8>> {
    let encoded = encoded
        .rsplit_once("base64,")
        .map(|(_, payload)| payload)
        .unwrap_or(encoded);
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    if decoded.is_empty() {
        return None;
    }
    Some(decoded)
}

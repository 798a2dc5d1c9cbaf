//! Wire payloads exchanged with the analysis backend.
//!
//! All response types tolerate unknown and missing fields: the backend
//! attaches chart payloads, per-frame statistics, and quality metrics that
//! this client treats as opaque.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default object-detection model used when no setting is supplied.
pub const DEFAULT_DETECTION_MODEL: &str = "facebook/detr-resnet-50";

/// Analysis settings submitted alongside the uploaded file.
///
/// Serialized as the JSON-encoded `settings` form field of the multipart
/// request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    /// Hugging Face model id for object detection.
    pub detection_model: String,
    /// Optional dedicated weather-classification model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_model: Option<String>,
    /// Frames per second to extract from video input.
    pub fps: f64,
    /// Minimum detection confidence to keep.
    pub confidence_threshold: f64,
    /// Whether the backend keeps extracted frames.
    pub save_frames: bool,
    /// Whether the backend keeps annotated frames.
    pub save_annotated: bool,
    /// Whether the backend exports training data.
    pub save_for_training: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            detection_model: DEFAULT_DETECTION_MODEL.to_string(),
            weather_model: None,
            fps: 1.0,
            confidence_threshold: 0.3,
            save_frames: true,
            save_annotated: true,
            save_for_training: false,
        }
    }
}

/// Final analysis payload returned for both video and image submissions.
///
/// Video responses carry `frames`/`totalFrames`; image responses carry
/// `annotatedImage`. Everything the client does not interpret lands in
/// `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    /// Human-readable one-line summary.
    pub summary: String,
    /// Opaque metadata object (filename, dimensions, duration, ...).
    pub metadata: Value,
    /// Base64-encoded annotated frames (video).
    pub frames: Vec<String>,
    /// Base64-encoded images (both media types).
    pub images: Vec<String>,
    /// Base64-encoded annotated still (image).
    pub annotated_image: Option<String>,
    /// Preformatted statistics block.
    pub statistics: Option<String>,
    pub processing_time: Option<f64>,
    pub total_frames: Option<u64>,
    pub vehicle_count: Option<u64>,
    pub human_count: Option<u64>,
    /// Error reported inside an otherwise well-formed payload.
    pub error: Option<String>,
    /// Chart payloads, per-frame data, and other fields this client passes
    /// through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// GPU/CPU capability report from `GET /api/system-info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemInfo {
    #[serde(rename = "hasGPU")]
    pub has_gpu: bool,
    pub gpu_name: Option<String>,
    pub cuda_available: bool,
    pub device: String,
    pub torch_version: String,
}

/// Response to `POST /api/upload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    pub path: String,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_serialize_camel_case() {
        let settings = AnalysisSettings::default();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["detectionModel"], DEFAULT_DETECTION_MODEL);
        assert_eq!(value["confidenceThreshold"], 0.3);
        assert_eq!(value["saveFrames"], true);
        // Unset weather model is omitted entirely.
        assert!(value.get("weatherModel").is_none());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: AnalysisSettings = serde_json::from_value(json!({"fps": 2.0})).unwrap();
        assert_eq!(settings.fps, 2.0);
        assert_eq!(settings.detection_model, DEFAULT_DETECTION_MODEL);
    }

    #[test]
    fn test_result_tolerates_unknown_fields() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "summary": "Video analysis complete",
            "metadata": {"filename": "drive.mp4", "fps": 30.0},
            "frames": ["abc"],
            "totalFrames": 42,
            "vehicleCount": 7,
            "chartImages": {"weather": "xyz"},
            "perFrameData": [{"frame": 0, "vehicles": 2}]
        }))
        .unwrap();
        assert_eq!(result.summary, "Video analysis complete");
        assert_eq!(result.total_frames, Some(42));
        assert_eq!(result.vehicle_count, Some(7));
        assert!(result.extra.contains_key("chartImages"));
        assert!(result.extra.contains_key("perFrameData"));
    }

    #[test]
    fn test_system_info_wire_names() {
        let info: SystemInfo = serde_json::from_value(json!({
            "hasGPU": true,
            "gpuName": "NVIDIA GeForce RTX 3080",
            "cudaAvailable": true,
            "device": "cuda",
            "torchVersion": "2.1.0"
        }))
        .unwrap();
        assert!(info.has_gpu);
        assert_eq!(info.device, "cuda");
        assert_eq!(info.gpu_name.as_deref(), Some("NVIDIA GeForce RTX 3080"));
    }

    #[test]
    fn test_image_result_shape() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "summary": "Image analysis complete",
            "metadata": {"dimensions": "1920x1080"},
            "images": ["abc"],
            "annotatedImage": "abc",
            "humanCount": 1
        }))
        .unwrap();
        assert_eq!(result.annotated_image.as_deref(), Some("abc"));
        assert_eq!(result.human_count, Some(1));
        assert!(result.frames.is_empty());
    }
}

//! Final-result candidate classification.
//!
//! The analysis stream has no explicit terminal marker: the final result is
//! identified by field shape. A record carrying both `summary` and `metadata`
//! is the authoritative result (last one wins). A record with neither
//! `progress` nor `step` but at least one result-shaped field is a fallback
//! candidate, used only when no authoritative record ever arrives.
//!
//! The priority rule is a pure reducer over the record sequence so it can be
//! tested without any I/O.

use serde_json::Value;

/// Field names whose presence marks a payload as result-shaped enough to be
/// a fallback candidate.
const RESULT_SHAPED_FIELDS: [&str; 5] = ["frames", "images", "error", "totalFrames", "annotatedImage"];

/// Running best guess at the stream's final result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultCandidate {
    /// No candidate seen yet.
    #[default]
    None,
    /// A result-shaped record with no higher-confidence competitor.
    Fallback(Value),
    /// A `summary` + `metadata` record; never displaced by a fallback.
    Authoritative(Value),
}

impl ResultCandidate {
    /// Fold one classified payload into the running candidate.
    pub fn observe(self, payload: &Value) -> Self {
        if is_authoritative(payload) {
            return ResultCandidate::Authoritative(payload.clone());
        }
        match self {
            ResultCandidate::Authoritative(_) => self,
            _ if is_result_shaped(payload) => ResultCandidate::Fallback(payload.clone()),
            other => other,
        }
    }

    /// Consume the candidate, yielding the chosen payload if any was seen.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ResultCandidate::None => None,
            ResultCandidate::Fallback(value) | ResultCandidate::Authoritative(value) => Some(value),
        }
    }
}

/// Extract a progress notification from a payload, if it carries one.
///
/// Returns the numeric `progress` value and the `step` label (empty string
/// when the record has no `step`).
pub fn progress_of(payload: &Value) -> Option<(f64, &str)> {
    let progress = payload.get("progress")?.as_f64()?;
    let step = payload.get("step").and_then(Value::as_str).unwrap_or("");
    Some((progress, step))
}

fn is_authoritative(payload: &Value) -> bool {
    payload.get("summary").is_some() && payload.get("metadata").is_some()
}

fn is_result_shaped(payload: &Value) -> bool {
    if payload.get("progress").is_some() || payload.get("step").is_some() {
        return false;
    }
    RESULT_SHAPED_FIELDS
        .iter()
        .any(|field| payload.get(field).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_record_extracted() {
        let payload = json!({"progress": 42, "step": "Running detection"});
        assert_eq!(progress_of(&payload), Some((42.0, "Running detection")));
    }

    #[test]
    fn test_progress_without_step_gets_empty_label() {
        let payload = json!({"progress": 10});
        assert_eq!(progress_of(&payload), Some((10.0, "")));
    }

    #[test]
    fn test_non_numeric_progress_is_not_progress() {
        let payload = json!({"progress": "lots"});
        assert_eq!(progress_of(&payload), None);
    }

    #[test]
    fn test_progress_record_is_not_a_candidate() {
        let candidate = ResultCandidate::None.observe(&json!({"progress": 50, "step": "x"}));
        assert_eq!(candidate, ResultCandidate::None);
    }

    #[test]
    fn test_summary_metadata_is_authoritative() {
        let payload = json!({"summary": "done", "metadata": {"filename": "a.mp4"}});
        let candidate = ResultCandidate::None.observe(&payload);
        assert_eq!(candidate, ResultCandidate::Authoritative(payload));
    }

    #[test]
    fn test_result_shaped_record_is_fallback() {
        for payload in [
            json!({"frames": []}),
            json!({"images": ["abc"]}),
            json!({"error": "model missing"}),
            json!({"totalFrames": 12}),
            json!({"annotatedImage": "abc"}),
        ] {
            let candidate = ResultCandidate::None.observe(&payload);
            assert_eq!(candidate, ResultCandidate::Fallback(payload));
        }
    }

    #[test]
    fn test_step_field_disqualifies_fallback() {
        let payload = json!({"step": "Saving extracted frames...", "frames": []});
        assert_eq!(ResultCandidate::None.observe(&payload), ResultCandidate::None);
    }

    #[test]
    fn test_authoritative_overrides_earlier_fallback() {
        let fallback = json!({"frames": ["f1"]});
        let authoritative = json!({"summary": "done", "metadata": {}});
        let candidate = ResultCandidate::None
            .observe(&fallback)
            .observe(&authoritative);
        assert_eq!(candidate, ResultCandidate::Authoritative(authoritative));
    }

    #[test]
    fn test_fallback_never_displaces_authoritative() {
        let authoritative = json!({"summary": "done", "metadata": {}});
        let fallback = json!({"frames": ["f1"]});
        let candidate = ResultCandidate::None
            .observe(&authoritative)
            .observe(&fallback);
        assert_eq!(candidate, ResultCandidate::Authoritative(authoritative));
    }

    #[test]
    fn test_last_authoritative_wins() {
        let first = json!({"summary": "first", "metadata": {}});
        let second = json!({"summary": "second", "metadata": {}});
        let candidate = ResultCandidate::None.observe(&first).observe(&second);
        assert_eq!(candidate, ResultCandidate::Authoritative(second));
    }

    #[test]
    fn test_later_fallback_replaces_earlier_fallback() {
        let first = json!({"frames": ["f1"]});
        let second = json!({"frames": ["f1", "f2"]});
        let candidate = ResultCandidate::None.observe(&first).observe(&second);
        assert_eq!(candidate, ResultCandidate::Fallback(second));
    }

    #[test]
    fn test_authoritative_with_progress_field_still_wins() {
        // A record may carry progress and still be the final result.
        let payload = json!({"progress": 100, "summary": "done", "metadata": {}});
        let candidate = ResultCandidate::None.observe(&payload);
        assert_eq!(candidate, ResultCandidate::Authoritative(payload));
    }

    #[test]
    fn test_into_value() {
        assert_eq!(ResultCandidate::None.into_value(), None);
        let payload = json!({"frames": []});
        assert_eq!(
            ResultCandidate::Fallback(payload.clone()).into_value(),
            Some(payload)
        );
    }
}

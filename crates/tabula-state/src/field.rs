//! Dirty detection and save payloads for in-place field editing.
//!
//! The renderer stamps every editable value with a base64-encoded baseline:
//! the canonical JSON of the value at render time. A field is dirty when
//! the JSON of the candidate read back from its widget differs from that
//! baseline. Dirty fields produce exactly one save payload; clean fields
//! produce none.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;

use crate::error::Error;

/// Candidate value read live from a widget's interactive elements.
///
/// Widgets produce plain JSON values: a string for text inputs, a bool or
/// null for the boolean widget, a string or null for a single-valued
/// relation, an array of strings for a multi-valued one.
pub type Candidate = serde_json::Value;

/// The value a field was rendered with, in canonical JSON text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Baseline(String);

impl Baseline {
    /// Decode the renderer's base64 baseline attribute.
    pub fn decode(attr: &str) -> Result<Self, Error> {
        let bytes = BASE64.decode(attr)?;
        Ok(Self(String::from_utf8(bytes)?))
    }

    /// Build a baseline from an already-canonical JSON string. Test helper
    /// and escape hatch for embeddings that skip the base64 transport.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    pub fn as_json(&self) -> &str {
        &self.0
    }
}

/// Outcome of comparing a candidate against its baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveDecision {
    /// No baseline attribute on the value element: nothing to save.
    Untracked,
    /// Candidate serializes identically to the baseline.
    Clean { serialized: String },
    /// Candidate differs; `body` is the JSON request body to POST.
    Dirty { serialized: String, body: String },
}

impl SaveDecision {
    /// Compare `candidate` to `baseline` and build the save body when they
    /// differ. A missing baseline is not an error: the field is simply
    /// not tracked for saving.
    pub fn compute(
        baseline: Option<&Baseline>,
        candidate: &Candidate,
    ) -> Result<Self, Error> {
        let Some(baseline) = baseline else {
            return Ok(Self::Untracked);
        };
        let serialized = serde_json::to_string(candidate)?;
        if serialized == baseline.as_json() {
            Ok(Self::Clean { serialized })
        } else {
            let body = serde_json::to_string(&json!({ "save": candidate }))?;
            Ok(Self::Dirty { serialized, body })
        }
    }

    /// The POST body, when a save is due.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Dirty { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, Self::Dirty { .. })
    }
}

/// Fold a freshly added entry of an extensible relation into the candidate.
///
/// Multi-valued fields append; single-valued fields replace their whole
/// selection with the new entry.
pub fn merge_new_entry(candidate: Candidate, new_entry: &str, multiple: bool) -> Candidate {
    if !multiple {
        return json!([new_entry]);
    }
    match candidate {
        Candidate::Array(mut values) => {
            values.push(json!(new_entry));
            Candidate::Array(values)
        }
        _ => json!([new_entry]),
    }
}

/// Default multi-read: one candidate per carrier element with empty-string
/// reads dropped. Widgets that need different collapsing (the relation
/// widget) provide their own `read_multiple`.
pub fn collect_multi(values: impl IntoIterator<Item = Candidate>) -> Candidate {
    let values: Vec<Candidate> = values
        .into_iter()
        .filter(|value| value.as_str() != Some(""))
        .collect();
    Candidate::Array(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_of(value: &Candidate) -> Baseline {
        Baseline::from_json(serde_json::to_string(value).unwrap())
    }

    #[test]
    fn test_baseline_decodes_base64() {
        // "Hello" rendered as a JSON string, then base64.
        let attr = BASE64.encode("\"Hello\"");
        let baseline = Baseline::decode(&attr).unwrap();
        assert_eq!(baseline.as_json(), "\"Hello\"");
    }

    #[test]
    fn test_baseline_rejects_bad_encoding() {
        assert!(Baseline::decode("not//valid//base64!!!").is_err());
    }

    #[test]
    fn test_identical_serialization_is_clean() {
        let baseline = baseline_of(&json!("Hello"));
        let decision = SaveDecision::compute(Some(&baseline), &json!("Hello")).unwrap();
        assert!(!decision.is_dirty());
        assert_eq!(decision.body(), None);
    }

    #[test]
    fn test_changed_value_is_dirty_with_one_body() {
        let baseline = baseline_of(&json!("Hello"));
        let decision = SaveDecision::compute(Some(&baseline), &json!("Hello!")).unwrap();
        assert!(decision.is_dirty());
        assert_eq!(decision.body(), Some(r#"{"save":"Hello!"}"#));
    }

    #[test]
    fn test_missing_baseline_is_untracked() {
        let decision = SaveDecision::compute(None, &json!("anything")).unwrap();
        assert_eq!(decision, SaveDecision::Untracked);
    }

    #[test]
    fn test_bool_and_null_candidates() {
        let baseline = baseline_of(&json!(true));
        assert!(!SaveDecision::compute(Some(&baseline), &json!(true))
            .unwrap()
            .is_dirty());
        assert!(SaveDecision::compute(Some(&baseline), &json!(null))
            .unwrap()
            .is_dirty());
    }

    #[test]
    fn test_multi_value_order_matters() {
        let baseline = baseline_of(&json!(["a", "b"]));
        assert!(!SaveDecision::compute(Some(&baseline), &json!(["a", "b"]))
            .unwrap()
            .is_dirty());
        assert!(SaveDecision::compute(Some(&baseline), &json!(["b", "a"]))
            .unwrap()
            .is_dirty());
    }

    #[test]
    fn test_merge_new_entry_appends_when_multiple() {
        let merged = merge_new_entry(json!(["x"]), "zzz", true);
        assert_eq!(merged, json!(["x", "zzz"]));
    }

    #[test]
    fn test_merge_new_entry_replaces_when_single() {
        let merged = merge_new_entry(json!("x"), "zzz", false);
        assert_eq!(merged, json!(["zzz"]));
    }

    #[test]
    fn test_merge_new_entry_starts_list_from_scalar() {
        let merged = merge_new_entry(json!(null), "zzz", true);
        assert_eq!(merged, json!(["zzz"]));
    }

    #[test]
    fn test_collect_multi_drops_empty_reads() {
        let collected = collect_multi([json!("a"), json!(""), json!("b")]);
        assert_eq!(collected, json!(["a", "b"]));
    }
}

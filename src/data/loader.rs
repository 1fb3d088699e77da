use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{synthetic_id, ContactRecord, ContactTable};

/// Why a data set could not be loaded. Fatal for one load attempt only.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a top-level JSON array, found {0}")]
    NotAnArray(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a contact table from a JSON file on disk.
pub fn load_file(path: &Path) -> Result<ContactTable, DataLoadError> {
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Load a contact table from an in-memory JSON document (an upload).
///
/// Expected schema:
///
/// ```json
/// [
///   {
///     "message": {
///       "content": {
///         "contact_analytics": {
///           "contact_id": "c1",
///           "basic_info": { "full_name": "Jane Doe", "role": "CTO" },
///           "sales_qualification": { "lead_score": 4 }
///         }
///       }
///     }
///   }
/// ]
/// ```
///
/// Elements without `message.content.contact_analytics` are skipped.
pub fn load_bytes(bytes: &[u8]) -> Result<ContactTable, DataLoadError> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let envelopes = root
        .as_array()
        .ok_or_else(|| DataLoadError::NotAnArray(json_kind(&root)))?;

    let records: Vec<ContactRecord> = envelopes
        .iter()
        .enumerate()
        .filter_map(|(index, envelope)| {
            let mut record = flatten_record(envelope)?;
            // the envelope index, so the id still points at the input
            if record.contact_id.is_empty() {
                record.contact_id = synthetic_id(index);
            }
            Some(record)
        })
        .collect();
    let skipped = envelopes.len() - records.len();
    if skipped > 0 {
        log::debug!("skipped {skipped} envelopes without contact analytics");
    }

    let table = ContactTable::from_records(records);
    log::info!("loaded {} contacts from {} envelopes", table.len(), envelopes.len());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

/// Flatten one envelope into a row, or `None` when the analytics path is absent.
///
/// A `contact_analytics` that is present but not an object (null, a string, a
/// list) reads as an empty payload, the same way a non-object section does.
pub fn flatten_record(envelope: &JsonValue) -> Option<ContactRecord> {
    let payload = envelope.get("message")?.get("content")?.get("contact_analytics")?;
    let empty = Map::new();
    let analytics = match payload.as_object() {
        Some(map) => map,
        None => {
            log::debug!("contact_analytics is {}, reading it as empty", json_kind(payload));
            &empty
        }
    };

    let root = Section(Some(analytics));
    let basic = Section::of(analytics, "basic_info");
    let challenge = Section::of(analytics, "challenge_analysis");
    let hunt = Section::of(analytics, "scavenger_hunt_metrics");
    let engagement = Section::of(analytics, "engagement_analysis");
    let sentiment = Section::of(analytics, "sentiment_metrics");
    let industry = Section::of(analytics, "industry_insights");
    let follow_up = Section::of(analytics, "follow_up_strategy");
    let sales = Section::of(analytics, "sales_qualification");

    Some(ContactRecord {
        contact_id: root.text("contact_id"),
        full_name: basic.text("full_name"),
        company: basic.text("company"),
        role: basic.text("role"),

        raw_challenge: challenge.text("raw_challenge"),
        challenge_category: challenge.text("category"),
        challenge_keywords: challenge.list("keywords"),
        severity_level: challenge.text("severity_level"),
        impact_area: challenge.text("impact_area"),

        participated: hunt.flag("participated"),
        completion_rate: hunt.number("completion_rate"),
        completed_activities: hunt.list("completed_activities"),
        response_speed: hunt.text("response_speed"),
        completed_full_hunt: hunt.flag("completed_full_hunt"),

        overall_score: engagement.number("overall_score"),
        response_pattern: engagement.text("response_pattern"),
        interested_features: engagement.list("interested_features"),
        conversation_depth: engagement.text("conversation_depth"),
        contact_sharing_willingness: engagement.text("contact_sharing_willingness"),

        overall_sentiment: sentiment.text("overall_sentiment"),
        sentiment_progression: sentiment.text("sentiment_progression"),
        enthusiasm_level: sentiment.number("enthusiasm_level"),
        pain_points: sentiment.list("pain_points"),
        satisfaction_signals: sentiment.list("satisfaction_signals"),

        company_size_indicator: industry.text("company_size_indicator"),
        industry_vertical: industry.text("industry_vertical"),
        tech_adoption_level: industry.text("tech_adoption_level"),
        competitive_position: industry.text("competitive_position"),

        recommended_next_step: follow_up.text("recommended_next_step"),
        suggested_content: follow_up.text("suggested_content"),
        ideal_follow_up_time: follow_up.text("ideal_follow_up_time"),
        preferred_channel: follow_up.text("preferred_channel"),
        key_talking_points: follow_up.list("key_talking_points"),

        lead_score: sales.number("lead_score"),
        estimated_timeline: sales.text("estimated_timeline"),
        objections_to_address: sales.list("objections_to_address"),
        budget_indicator: sales.text("budget_indicator"),
        decision_maker_status: sales.text("decision_maker_status"),
    })
}

/// One optional sub-object of the analytics payload. A missing or non-object
/// section reads exactly like an empty one.
struct Section<'a>(Option<&'a Map<String, JsonValue>>);

impl<'a> Section<'a> {
    fn of(parent: &'a Map<String, JsonValue>, key: &str) -> Self {
        Section(parent.get(key).and_then(JsonValue::as_object))
    }

    fn get(&self, key: &str) -> Option<&'a JsonValue> {
        self.0.and_then(|map| map.get(key))
    }

    fn text(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Missing → `Some(0.0)`; present but not coercible → `None`.
    fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            None => Some(0.0),
            Some(value) => coerce_number(value),
        }
    }

    fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            None | Some(JsonValue::Null) => false,
            Some(JsonValue::Bool(b)) => *b,
            Some(JsonValue::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(JsonValue::String(s)) => !s.is_empty(),
            Some(JsonValue::Array(items)) => !items.is_empty(),
            Some(JsonValue::Object(map)) => !map.is_empty(),
        }
    }

    fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(JsonValue::Array(items)) => items
                .iter()
                .filter_map(|item| match item {
                    JsonValue::Null => None,
                    JsonValue::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
            Some(JsonValue::String(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

fn coerce_number(value: &JsonValue) -> Option<f64> {
    let v = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        JsonValue::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn envelope(analytics: JsonValue) -> JsonValue {
        json!({ "message": { "content": { "contact_analytics": analytics } } })
    }

    #[test]
    fn loads_minimal_contact_with_defaults() {
        let input = br#"[{"message":{"content":{"contact_analytics":{"contact_id":"c1","basic_info":{"full_name":"Jane Doe","role":"CTO"},"sales_qualification":{"lead_score":4}}}}}]"#;
        let table = load_bytes(input).unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.contact_id, "c1");
        assert_eq!(row.full_name, "Jane Doe");
        assert_eq!(row.role, "CTO");
        assert_eq!(row.lead_score, Some(4.0));
        assert_eq!(row.overall_score, Some(0.0));
        assert!(!row.participated);
        assert_eq!(row.company, "");
        assert!(row.pain_points.is_empty());
    }

    #[test]
    fn row_count_matches_envelopes_with_the_nested_path() {
        let input = json!([
            envelope(json!({ "contact_id": "a" })),
            { "message": { "content": {} } },
            { "message": "not an object" },
            {},
            42,
            envelope(json!({ "contact_id": "b" })),
            envelope(json!(null)),
        ]);
        let table = load_bytes(input.to_string().as_bytes()).unwrap();
        let ids: Vec<&str> = table.iter().map(|r| r.contact_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "#6"]);
    }

    #[test]
    fn non_object_payload_reads_as_empty() {
        for payload in [json!(null), json!("Jane"), json!([1, 2])] {
            let record = flatten_record(&envelope(payload)).unwrap();
            assert_eq!(record.contact_id, "");
            assert_eq!(record.full_name, "");
            assert_eq!(record.lead_score, Some(0.0));
        }
    }

    #[test]
    fn contacts_without_an_id_get_their_envelope_index() {
        let input = json!([
            { "message": { "content": { "text": "hello" } } },
            envelope(json!({ "basic_info": { "full_name": "Ann" } })),
            envelope(json!({ "contact_id": "", "basic_info": { "full_name": "Bob" } })),
        ]);
        let table = load_bytes(input.to_string().as_bytes()).unwrap();
        let rows: Vec<(&str, &str)> = table
            .iter()
            .map(|r| (r.contact_id.as_str(), r.full_name.as_str()))
            .collect();
        assert_eq!(rows, vec![("#1", "Ann"), ("#2", "Bob")]);
    }

    #[test]
    fn list_fields_keep_elements_containing_commas() {
        let record = flatten_record(&envelope(json!({
            "challenge_analysis": {
                "category": "Scaling",
                "keywords": ["cost, at scale", "speed", null, 7]
            }
        })))
        .unwrap();

        assert_eq!(record.challenge_category, "Scaling");
        assert_eq!(record.challenge_keywords, vec!["cost, at scale", "speed", "7"]);
    }

    #[test]
    fn numbers_are_coerced_leniently() {
        let record = flatten_record(&envelope(json!({
            "scavenger_hunt_metrics": { "completion_rate": "75", "participated": 1 },
            "engagement_analysis": { "overall_score": "high" },
            "sentiment_metrics": { "enthusiasm_level": null },
            "sales_qualification": { "lead_score": 3.5 }
        })))
        .unwrap();

        assert_eq!(record.completion_rate, Some(75.0));
        assert!(record.participated);
        assert_eq!(record.overall_score, None);
        assert_eq!(record.enthusiasm_level, None);
        assert_eq!(record.lead_score, Some(3.5));
    }

    #[test]
    fn non_object_sections_read_as_empty() {
        let record = flatten_record(&envelope(json!({
            "basic_info": "Jane",
            "sentiment_metrics": [1, 2, 3]
        })))
        .unwrap();
        assert_eq!(record.full_name, "");
        assert_eq!(record.enthusiasm_level, Some(0.0));
    }

    #[test]
    fn empty_array_is_an_empty_table() {
        let table = load_bytes(b"[]").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = load_bytes(b"[{").unwrap_err();
        assert!(matches!(err, DataLoadError::Json(_)));
    }

    #[test]
    fn top_level_object_is_rejected() {
        let err = load_bytes(b"{\"message\":{}}").unwrap_err();
        assert!(matches!(err, DataLoadError::NotAnArray("an object")));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            envelope_array(&[json!({ "contact_id": "disk" })]).as_bytes(),
        )
        .unwrap();
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.rows()[0].contact_id, "disk");
    }

    fn envelope_array(items: &[JsonValue]) -> String {
        JsonValue::Array(items.iter().cloned().map(envelope).collect()).to_string()
    }
}

use serde_json::{Map, Value};

use super::constants::*;

/// Render a JSON value as a CSV cell.
///
/// Absent and null values become empty cells. Booleans use the `True`/`False`
/// spelling the downstream analysis scripts already expect.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => String::from("True"),
        Some(Value::Bool(false)) => String::from("False"),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// The last path segment of a stimulus reference
fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// TrialRecord is a single entry of an experiment session log.
///
/// Records are heterogeneous; every field is optional and every accessor
/// falls back to an empty value instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialRecord {
    fields: Map<String, Value>,
}

impl From<Value> for TrialRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

impl TrialRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a field only if it is a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn trial_type(&self) -> Option<&str> {
        self.get_str(FIELD_TRIAL_TYPE)
    }

    pub fn task(&self) -> Option<&str> {
        self.get_str(FIELD_TASK)
    }

    pub fn trial_index(&self) -> String {
        render_cell(self.get(FIELD_TRIAL_INDEX))
    }

    pub fn is_dial_video(&self) -> bool {
        self.trial_type() == Some(TRIAL_TYPE_DIAL_VIDEO)
    }

    pub fn is_practice_video(&self) -> bool {
        self.task() == Some(TASK_PRACTICE_VIDEO)
    }

    pub fn is_nature_video(&self) -> bool {
        self.task() == Some(TASK_NATURE_VIDEO)
    }

    pub fn is_rating(&self) -> bool {
        self.task() == Some(TASK_RATING)
    }

    /// Does this record open a new trial (and so close any rating window)?
    pub fn is_trial_boundary(&self) -> bool {
        self.is_dial_video() || self.is_practice_video()
    }

    /// Basename of the first stimulus path, or `?` if there is none
    pub fn video(&self) -> String {
        let first = match self.get(FIELD_STIMULUS) {
            Some(Value::Array(paths)) => paths.first().and_then(Value::as_str),
            Some(Value::String(path)) => Some(path.as_str()),
            _ => None,
        };
        match first {
            Some(path) => basename(path).to_string(),
            None => String::from(UNKNOWN_VIDEO),
        }
    }

    pub fn participant_pid(&self) -> Option<String> {
        self.get(FIELD_PARTICIPANT_PID)
            .map(|pid| render_cell(Some(pid)))
    }

    /// The dial samples of a dial-video record, one cell per entry
    pub fn dial_values(&self) -> Vec<String> {
        match self.get(FIELD_RATINGS) {
            Some(Value::Array(samples)) => samples
                .iter()
                .map(|sample| render_cell(sample.get(FIELD_VALUE)))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// The participant ID of a session is taken from its first record
pub fn session_pid(records: &[TrialRecord]) -> String {
    records
        .first()
        .and_then(TrialRecord::participant_pid)
        .unwrap_or_else(|| String::from(UNKNOWN_PID))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_cell() {
        assert_eq!(render_cell(None), "");
        assert_eq!(render_cell(Some(&json!(null))), "");
        assert_eq!(render_cell(Some(&json!("abc"))), "abc");
        assert_eq!(render_cell(Some(&json!(5))), "5");
        assert_eq!(render_cell(Some(&json!(2.5))), "2.5");
        assert_eq!(render_cell(Some(&json!(true))), "True");
        assert_eq!(render_cell(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn test_video_basename() {
        let record = TrialRecord::from(json!({"stimulus": ["videos/main/clip1.mp4", "other.mp4"]}));
        assert_eq!(record.video(), "clip1.mp4");
        let bare = TrialRecord::from(json!({"stimulus": ["clip2.mp4"]}));
        assert_eq!(bare.video(), "clip2.mp4");
    }

    #[test]
    fn test_missing_stimulus() {
        assert_eq!(TrialRecord::from(json!({})).video(), "?");
        assert_eq!(TrialRecord::from(json!({"stimulus": []})).video(), "?");
        assert_eq!(TrialRecord::from(json!({"stimulus": [3]})).video(), "?");
    }

    #[test]
    fn test_non_object_record() {
        let record = TrialRecord::from(json!(42));
        assert_eq!(record, TrialRecord::default());
        assert!(!record.is_dial_video());
        assert_eq!(record.trial_index(), "");
    }

    #[test]
    fn test_dial_values() {
        let record = TrialRecord::from(json!({
            "ratings": [{"value": 1}, {"time": 20}, {"value": 0.5}]
        }));
        assert_eq!(record.dial_values(), vec!["1", "", "0.5"]);
        assert!(TrialRecord::from(json!({"ratings": 3})).dial_values().is_empty());
    }

    #[test]
    fn test_session_pid() {
        let records = vec![
            TrialRecord::from(json!({"participant_pid": "P7"})),
            TrialRecord::from(json!({"participant_pid": "P8"})),
        ];
        assert_eq!(session_pid(&records), "P7");
        assert_eq!(session_pid(&records[..0]), "unknown");
        assert_eq!(session_pid(&[TrialRecord::from(json!({}))]), "unknown");
    }
}

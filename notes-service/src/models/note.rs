//! Request and response shapes of `POST /api/process_notes`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tone used when the request does not name one.
pub const DEFAULT_TONE: &str = "General";

/// Tones the prompt advertises to the model. Requests are not checked
/// against this list.
pub const KNOWN_TONES: [&str; 6] = [
    "Class Lecture",
    "Formal Meeting",
    "Informal Meeting",
    "Scientific Talk",
    "Business Plan",
    "Travel Plan",
];

/// Shorthand notes submitted for expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRequest {
    pub topic: String,
    pub notes: String,
    pub tone: String,
}

impl Default for NoteRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            notes: String::new(),
            tone: DEFAULT_TONE.to_string(),
        }
    }
}

/// Wire form: every field may be missing or `null`.
#[derive(Debug, Deserialize)]
struct NoteRequestBody {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    tone: Option<String>,
}

impl From<NoteRequestBody> for NoteRequest {
    fn from(body: NoteRequestBody) -> Self {
        Self {
            topic: body.topic.unwrap_or_default(),
            notes: body.notes.unwrap_or_default(),
            tone: body.tone.unwrap_or_else(|| DEFAULT_TONE.to_string()),
        }
    }
}

impl NoteRequest {
    /// Parse a request body. An empty body or a JSON `null` yields the
    /// defaults; anything that is not an object of strings is rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Ok(Self::default()),
            value @ Value::Object(_) => Ok(serde_json::from_value::<NoteRequestBody>(value)?.into()),
            _ => Err(serde::de::Error::custom("request body must be a JSON object")),
        }
    }
}

/// Structured expansion returned to the client.
///
/// Keys the model adds beyond the five known ones are kept in `extra` and
/// passed through unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    #[serde(default)]
    pub expanded_notes: String,
    #[serde(default)]
    pub important: Vec<String>,
    #[serde(default)]
    pub explain: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub meeting: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NoteResponse {
    /// Interpret provider output, degrading to raw text when it is not a
    /// JSON object.
    pub fn from_provider_text(text: &str) -> Self {
        Self::try_from_json(text).unwrap_or_else(|| Self::from_raw_text(text))
    }

    /// Parse provider output as a JSON object, filling defaults for missing
    /// keys. Returns `None` for invalid JSON or a non-object value.
    pub fn try_from_json(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Some(Self::from_object(map)),
            _ => None,
        }
    }

    /// Whole trimmed text as `expandedNotes`, every list empty.
    pub fn from_raw_text(text: &str) -> Self {
        Self {
            expanded_notes: text.trim().to_string(),
            ..Default::default()
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Self {
        let expanded_notes = match map.remove("expandedNotes") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        Self {
            expanded_notes,
            important: take_list(&mut map, "important"),
            explain: take_list(&mut map, "explain"),
            tasks: take_list(&mut map, "tasks"),
            meeting: take_list(&mut map, "meeting"),
            extra: map,
        }
    }
}

/// Remove `key` and coerce it to a list of strings. A lone string becomes a
/// one-item list; non-string items keep their JSON text.
fn take_list(map: &mut Map<String, Value>, key: &str) -> Vec<String> {
    match map.remove(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().map(value_to_string).collect(),
        Some(other) => vec![value_to_string(other)],
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

//! Instruction prompt sent to the model for every note request.

use crate::models::{NoteRequest, KNOWN_TONES};

/// Marker the model is told to leave on shorthand it cannot expand.
pub const NEEDS_CLARIFICATION: &str = "[NEEDS CLARIFICATION]";

/// Output shape described to the model. Nothing enforces it; the response
/// is normalised by [`crate::models::NoteResponse::from_provider_text`].
const OUTPUT_SCHEMA: &str = r#"{
  "expandedNotes": "string (multiline, with \n and - for bullets)",
  "important": ["list of important points"],
  "explain": ["list of misunderstood/?? terms with explanation"],
  "tasks": ["list of tasks/reminders"],
  "meeting": ["list of meeting-related info"]
}"#;

/// Build the full instruction prompt for `request`.
///
/// User values are embedded verbatim after the rules and schema.
pub fn build_prompt(request: &NoteRequest) -> String {
    let tones = KNOWN_TONES.join(", ");

    format!(
        r#"You are a note-taking assistant. The user gives you shorthand notes that may be incomplete,
incoherent, or full of symbols. Expand them into clear notes and return structured JSON with
extra information extracted from them.

Tones may include: {tones}.

Rules:
1. Stay faithful to the given notes, topic, and tone. Do not invent content that is not there.
2. Expand shorthand into clear, plain-text notes written in the given tone.
3. "expandedNotes" must be a single string. Keep line breaks (`\n`) and allow simple bullet
   points that start with a hyphen (`-`).
4. Shorthand or phrases you cannot expand must be kept as written or marked with {marker}.
5. Wherever the notes contain "??", give a concise textbook-level explanation and record it
   under "explain".
6. Text wrapped in multiple asterisks (** or ****) is important; record it under "important".
7. Record tasks, reminders, and other action items under "tasks".
8. Record meeting-related information (schedule, setup, follow-up) under "meeting".
9. Respond with valid JSON only: no extra text, no Markdown, no explanations.

JSON Schema (must follow exactly):
{schema}

Topic: {topic}
Tone: {tone}
Scribbled Notes:
{notes}
"#,
        tones = tones,
        marker = NEEDS_CLARIFICATION,
        schema = OUTPUT_SCHEMA,
        topic = request.topic,
        tone = request.tone,
        notes = request.notes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NoteRequest {
        NoteRequest {
            topic: "Q3 planning".to_string(),
            notes: "- mtg w/ bob\n- **budget due fri**\n- what is EBITDA??".to_string(),
            tone: "Formal Meeting".to_string(),
        }
    }

    #[test]
    fn embeds_user_fields_verbatim() {
        let prompt = build_prompt(&request());

        assert!(prompt.contains("Topic: Q3 planning\n"));
        assert!(prompt.contains("Tone: Formal Meeting\n"));
        assert!(prompt.ends_with(
            "Scribbled Notes:\n- mtg w/ bob\n- **budget due fri**\n- what is EBITDA??\n"
        ));
    }

    #[test]
    fn carries_rules_and_schema() {
        let prompt = build_prompt(&request());

        assert!(prompt.contains(NEEDS_CLARIFICATION));
        assert!(prompt.contains("\"??\""));
        assert!(prompt.contains("\"important\""));
        assert!(prompt.contains("valid JSON only"));
        assert!(prompt.contains(OUTPUT_SCHEMA));
        for tone in KNOWN_TONES {
            assert!(prompt.contains(tone), "missing tone {tone}");
        }
    }

    #[test]
    fn defaults_render_general_tone() {
        let prompt = build_prompt(&NoteRequest::default());

        assert!(prompt.contains("Topic: \n"));
        assert!(prompt.contains("Tone: General\n"));
        assert!(prompt.ends_with("Scribbled Notes:\n\n"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build_prompt(&request()), build_prompt(&request()));
    }
}

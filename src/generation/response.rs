//! Defensive parsing of model-generated question text.
//!
//! The completion boundary returns free-form text that is *expected* to
//! contain a JSON object with exactly four fields. Nothing enforces that on
//! the model's side, so everything here assumes the input is hostile:
//! Markdown code fences and surrounding prose are tolerated, missing or
//! mistyped fields are `MalformedResponse`, and a structurally complete
//! object whose content breaks the question invariants is `InvalidContent`.
//! A partially valid `Question` can never escape this module.

use serde::Deserialize;

use crate::core::question::Question;
use crate::generation::GenerationError;

/// The four-field shape the generation prompt demands from the model.
/// All fields are required: a response missing any of them is malformed.
#[derive(Deserialize, Debug)]
struct RawQuestion {
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Options")]
    options: Vec<String>,
    #[serde(rename = "CorrectAnswer")]
    correct_answer: String,
    #[serde(rename = "Explanation")]
    explanation: String,
}

/// Extracts the JSON object from a model response that may wrap it in
/// Markdown code fences or surrounding prose.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    // ```json ... ``` or ``` ... ```
    if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(end) = rest.rfind("```") {
            return rest[..end].trim();
        }
    }

    // Otherwise slice from the first '{' to the last '}'
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && start < end
    {
        return &trimmed[start..=end];
    }

    trimmed
}

/// Parses and validates a model response into a `Question`.
pub fn parse_question(text: &str) -> Result<Question, GenerationError> {
    let json = extract_json(text);
    let raw: RawQuestion = serde_json::from_str(json)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    Question::new(
        raw.question,
        raw.options,
        raw.correct_answer,
        Some(raw.explanation),
    )
    .map_err(|e| GenerationError::InvalidContent(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "Question": "Which planet is known as the Red Planet?",
        "Options": ["Venus", "Mars", "Jupiter", "Saturn"],
        "CorrectAnswer": "Mars",
        "Explanation": "Iron oxide on its surface gives Mars a reddish appearance."
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let q = parse_question(VALID).unwrap();
        assert_eq!(q.correct_answer(), "Mars");
        assert_eq!(q.options().len(), 4);
        assert!(q.explanation().unwrap().contains("Iron oxide"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{VALID}\n```");
        let q = parse_question(&fenced).unwrap();
        assert_eq!(q.correct_answer(), "Mars");
    }

    #[test]
    fn test_parse_bare_fence() {
        let fenced = format!("```\n{VALID}\n```");
        assert!(parse_question(&fenced).is_ok());
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let chatty = format!("Sure! Here is your question:\n{VALID}\nEnjoy!");
        let q = parse_question(&chatty).unwrap();
        assert_eq!(q.prompt(), "Which planet is known as the Red Planet?");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let text = r#"{
            "Question": "Q?",
            "Options": ["a", "b"],
            "Explanation": "no answer field"
        }"#;
        let err = parse_question(text).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_wrong_field_type_is_malformed() {
        let text = r#"{
            "Question": "Q?",
            "Options": "not a list",
            "CorrectAnswer": "a",
            "Explanation": "x"
        }"#;
        let err = parse_question(text).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_question("I'm sorry, I can't do that.").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_answer_outside_options_is_invalid_content() {
        let text = r#"{
            "Question": "Q?",
            "Options": ["a", "b"],
            "CorrectAnswer": "c",
            "Explanation": "x"
        }"#;
        let err = parse_question(text).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidContent(_)));
    }

    #[test]
    fn test_too_few_options_is_invalid_content() {
        let text = r#"{
            "Question": "Q?",
            "Options": ["only"],
            "CorrectAnswer": "only",
            "Explanation": "x"
        }"#;
        let err = parse_question(text).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidContent(_)));
    }
}

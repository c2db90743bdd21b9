//! The trivia question value type.
//!
//! A `Question` is immutable after construction. `Question::new` is the only
//! way to build one and enforces the structural invariants, so a partially
//! valid question can never enter the bank. The generator relies on this
//! when turning untrusted model output into domain values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single trivia item: prompt, ordered answer options, the correct answer,
/// and an optional explanation shown after a correct submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    explanation: Option<String>,
}

/// Why a question failed structural validation.
#[derive(Debug, PartialEq)]
pub enum QuestionError {
    /// Fewer than two answer options were supplied.
    NotEnoughOptions { count: usize },
    /// The correct answer does not match any of the options.
    AnswerNotInOptions { answer: String },
}

impl fmt::Display for QuestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionError::NotEnoughOptions { count } => {
                write!(f, "a question needs at least 2 options, got {count}")
            }
            QuestionError::AnswerNotInOptions { answer } => {
                write!(f, "correct answer {answer:?} is not one of the options")
            }
        }
    }
}

impl std::error::Error for QuestionError {}

impl Question {
    /// Builds a question, validating that there are at least two options and
    /// that the correct answer appears among them (exact string match).
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        if options.len() < 2 {
            return Err(QuestionError::NotEnoughOptions {
                count: options.len(),
            });
        }
        if !options.iter().any(|o| *o == correct_answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: correct_answer,
            });
        }
        Ok(Self {
            prompt: prompt.into(),
            options,
            correct_answer,
            explanation,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Exact, case-sensitive comparison against the correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_valid_question() {
        let q = Question::new(
            "What is the capital of France?",
            opts(&["London", "Paris", "Berlin", "Madrid"]),
            "Paris",
            Some("Paris is the capital of France.".to_string()),
        )
        .unwrap();
        assert_eq!(q.prompt(), "What is the capital of France?");
        assert_eq!(q.options().len(), 4);
        assert_eq!(q.correct_answer(), "Paris");
        assert!(q.explanation().is_some());
    }

    #[test]
    fn test_new_rejects_single_option() {
        let err = Question::new("Q?", opts(&["only"]), "only", None).unwrap_err();
        assert_eq!(err, QuestionError::NotEnoughOptions { count: 1 });
    }

    #[test]
    fn test_new_rejects_answer_outside_options() {
        let err = Question::new("Q?", opts(&["a", "b"]), "c", None).unwrap_err();
        assert!(matches!(err, QuestionError::AnswerNotInOptions { .. }));
    }

    #[test]
    fn test_is_correct_is_case_sensitive() {
        let q = Question::new("Q?", opts(&["Paris", "Berlin"]), "Paris", None).unwrap();
        assert!(q.is_correct("Paris"));
        assert!(!q.is_correct("paris"));
        assert!(!q.is_correct("Berlin"));
    }
}

//! # Question Generator
//!
//! Grows the bank by asking the completion boundary for a new question:
//! build the two instructions, make a single blocking call, defensively
//! parse the result, and append only on full success. Any failure leaves
//! the bank exactly as it was, and the quiz keeps working with the
//! questions it already has.

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use crate::core::bank::QuestionBank;
use crate::core::history::HistorySnapshot;
use crate::core::question::Question;
use crate::generation::response::parse_question;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// Why generation failed. All variants are non-fatal to the session.
#[derive(Debug)]
pub enum GenerationError {
    /// The response was not the required four-field JSON object.
    MalformedResponse(String),
    /// The response parsed but violated a question invariant.
    InvalidContent(String),
    /// The completion call did not return within the configured timeout.
    Timeout,
    /// The completion boundary failed underneath us.
    Transport(ProviderError),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MalformedResponse(msg) => {
                write!(f, "model response was not a usable question: {msg}")
            }
            GenerationError::InvalidContent(msg) => {
                write!(f, "model produced an invalid question: {msg}")
            }
            GenerationError::Timeout => write!(f, "question generation timed out"),
            GenerationError::Transport(e) => write!(f, "completion request failed: {e}"),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for GenerationError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Timeout => GenerationError::Timeout,
            other => GenerationError::Transport(other),
        }
    }
}

const SYSTEM_INSTRUCTION: &str = r#"Generate a JSON response for a trivia question including the question, options, correct answer, and explanation. The format should be as follows:

{
  "Question": "The actual question text goes here?",
  "Options": ["Option1", "Option2", "Option3", "Option4"],
  "CorrectAnswer": "TheCorrectAnswer",
  "Explanation": "A detailed explanation on why the correct answer is correct."
}"#;

/// The user instruction: topic hint plus the dedup list of everything the
/// bank already asks. Best-effort only: the model may still repeat itself,
/// and a structurally valid duplicate is accepted.
fn user_instruction(topic_hint: &str, history: &HistorySnapshot) -> String {
    format!(
        "Create a question about: {topic_hint}\n\
         It must be different from these previously asked questions:\n{history}"
    )
}

pub struct QuestionGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl QuestionGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Requests one new question from the completion boundary. Pure with
    /// respect to the bank: the caller decides where the question goes.
    pub async fn generate(
        &self,
        topic_hint: &str,
        history: &HistorySnapshot,
    ) -> Result<Question, GenerationError> {
        info!(
            "Generating question via {} (topic: {:?}, {} prior questions)",
            self.provider.name(),
            topic_hint,
            history.len()
        );

        let user = user_instruction(topic_hint, history);
        let request = CompletionRequest {
            system: SYSTEM_INSTRUCTION,
            user: &user,
            model: &self.model,
        };

        let text = self.provider.complete(request).await.map_err(|e| {
            warn!("Completion request failed: {e}");
            GenerationError::from(e)
        })?;

        let question = parse_question(&text)?;
        info!("Generated question: {:?}", question.prompt());
        Ok(question)
    }

    /// Generates against the bank's own history and appends on success.
    /// The bank is untouched on any failure path.
    pub async fn generate_into(
        &self,
        topic_hint: &str,
        bank: &mut QuestionBank,
    ) -> Result<Question, GenerationError> {
        let history = bank.snapshot();
        let question = self.generate(topic_hint, &history).await?;
        bank.append(question.clone());
        Ok(question)
    }
}

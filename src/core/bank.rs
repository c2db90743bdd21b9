//! # Question Bank
//!
//! The ordered, mutable collection of questions behind a quiz session.
//!
//! Invariant: the bank never drops below one question. Construction from an
//! empty list and deletion of the last question are both rejected, so every
//! session always has a current question to show.
//!
//! Mutation discipline (enforced by [`crate::core::session::QuizSession`],
//! not here): the generator and editor only touch the bank before the first
//! answer of a cycle is submitted.

use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::history::{HistoryEntry, HistorySnapshot};
use crate::core::question::Question;

/// Errors from bank mutations. Rejected operations leave the bank unchanged.
#[derive(Debug, PartialEq)]
pub enum BankError {
    /// The operation would leave the bank empty.
    InvariantViolation(String),
    /// The index does not name a question.
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            BankError::IndexOutOfBounds { index, len } => {
                write!(f, "no question at index {index} (bank holds {len})")
            }
        }
    }
}

impl std::error::Error for BankError {}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a bank from a non-empty list of questions.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::InvariantViolation(
                "a bank must hold at least one question".to_string(),
            ));
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: the minimum-size invariant holds from construction on.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Appends a question to the end of the bank.
    pub fn append(&mut self, question: Question) {
        debug!("Appending question to bank: {:?}", question.prompt());
        self.questions.push(question);
    }

    /// Removes the question at `index`, shifting later questions down.
    /// Fails without mutating if the bank would become empty or the index
    /// is out of bounds.
    pub fn delete(&mut self, index: usize) -> Result<Question, BankError> {
        if index >= self.questions.len() {
            return Err(BankError::IndexOutOfBounds {
                index,
                len: self.questions.len(),
            });
        }
        if self.questions.len() == 1 {
            return Err(BankError::InvariantViolation(
                "deleting the last remaining question would leave the bank empty".to_string(),
            ));
        }
        let removed = self.questions.remove(index);
        debug!("Deleted question {index}: {:?}", removed.prompt());
        Ok(removed)
    }

    /// Shuffles the bank into a fresh uniform permutation.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Shuffle with a caller-supplied RNG (seeded in tests for determinism).
    pub fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
    }

    /// Deterministic shuffle from a seed.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with(&mut StdRng::seed_from_u64(seed));
    }

    /// Captures the current (prompt, correct answer) pairs in bank order.
    /// Explanations never cross this boundary.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(
            self.questions
                .iter()
                .map(|q| HistoryEntry {
                    prompt: q.prompt().to_string(),
                    answer: q.correct_answer().to_string(),
                })
                .collect(),
        )
    }
}

/// The default starter bank: two stock questions so a quiz works out of the
/// box before any generation has happened.
pub fn seed_bank() -> QuestionBank {
    let questions = vec![
        Question::new(
            "What is the capital of France?",
            vec![
                "London".to_string(),
                "Paris".to_string(),
                "Berlin".to_string(),
                "Madrid".to_string(),
            ],
            "Paris",
            Some("Paris is the capital and most populous city of France.".to_string()),
        ),
        Question::new(
            "Who developed the theory of relativity?",
            vec![
                "Isaac Newton".to_string(),
                "Albert Einstein".to_string(),
                "Nikola Tesla".to_string(),
                "Marie Curie".to_string(),
            ],
            "Albert Einstein",
            Some(
                "Albert Einstein is known for developing the theory of relativity, \
                 one of the two pillars of modern physics."
                    .to_string(),
            ),
        ),
    ];
    let questions = questions
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("seed questions are statically valid");
    QuestionBank::new(questions).expect("seed bank is non-empty")
}

//! # Quiz Session State Machine
//!
//! Drives one quiz attempt over a [`QuestionBank`]: question sequencing,
//! scoring, and the terminal result. The session owns the bank; the front
//! and the generator reach the bank only through the gated accessors here.
//!
//! ```text
//! in progress (index, score, submitted)
//!      │ submit_answer            submitted == total
//!      └──────────────────────────────────────────────▶ complete
//!                      restart() from any state ◀──────────┘
//! ```
//!
//! Every operation is synchronous and mutates at most once per call, so any
//! front can re-render as often as it likes: one interaction maps to exactly
//! one state-machine call.

use std::fmt;

use log::{debug, info};
use rand::Rng;

use crate::core::bank::{BankError, QuestionBank};
use crate::core::question::Question;

/// Errors surfaced by session operations.
#[derive(Debug, PartialEq)]
pub enum SessionError {
    /// There is no current question: the quiz has been completed.
    OutOfRange { index: usize, total: usize },
    /// `result()` was called before the last answer was submitted.
    NotComplete { submitted: usize, total: usize },
    /// Editing was attempted after the first answer of the cycle.
    EditLocked,
    /// An edit was forwarded to the bank and rejected there.
    Bank(BankError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::OutOfRange { index, total } => {
                write!(f, "quiz is complete: no current question at {index} of {total}")
            }
            SessionError::NotComplete { submitted, total } => {
                write!(f, "quiz still in progress ({submitted}/{total} answers submitted)")
            }
            SessionError::EditLocked => {
                write!(f, "this action is not supported while the quiz is in session")
            }
            SessionError::Bank(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Bank(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BankError> for SessionError {
    fn from(e: BankError) -> Self {
        SessionError::Bank(e)
    }
}

/// What the front should show after a submission: the reveal event on a
/// correct answer, or a bare "wrong answer" signal. An incorrect submission
/// deliberately does not carry the correct answer; it is only visible in
/// the history view after completion.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerFeedback {
    Correct { explanation: Option<String> },
    Incorrect,
}

/// Terminal outcome of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    /// A perfect score selects the "success" presentation; anything else
    /// selects "retry". The threshold is exact equality, not a percentage.
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

pub struct QuizSession {
    bank: QuestionBank,
    index: usize,
    score: usize,
    submitted: usize,
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        info!("New quiz session over {} questions", bank.len());
        Self {
            bank,
            index: 0,
            score: 0,
            submitted: 0,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn is_complete(&self) -> bool {
        self.submitted == self.bank.len()
    }

    /// The question currently being asked.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        if self.is_complete() {
            return Err(SessionError::OutOfRange {
                index: self.index,
                total: self.bank.len(),
            });
        }
        // index < bank.len() holds while in progress
        Ok(self.bank.get(self.index).expect("index within bank"))
    }

    /// Submits an answer for the current question. Exact string equality,
    /// case-sensitive, as presented. Not idempotent: the front must gate
    /// one submission per question.
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerFeedback, SessionError> {
        let question = self.current_question()?;
        let feedback = if question.is_correct(choice) {
            let explanation = question.explanation().map(str::to_string);
            self.score += 1;
            AnswerFeedback::Correct { explanation }
        } else {
            AnswerFeedback::Incorrect
        };

        self.submitted += 1;
        if self.index < self.bank.len() - 1 {
            self.index += 1;
        }
        debug!(
            "Answer submitted: score={} submitted={} index={}",
            self.score, self.submitted, self.index
        );
        if self.is_complete() {
            info!("Quiz complete: {}/{}", self.score, self.bank.len());
        }
        Ok(feedback)
    }

    /// Fraction of the quiz answered so far, in [0, 1].
    pub fn progress(&self) -> f64 {
        self.submitted as f64 / self.bank.len() as f64
    }

    /// The final score. Only available once every question has been answered.
    pub fn result(&self) -> Result<QuizResult, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::NotComplete {
                submitted: self.submitted,
                total: self.bank.len(),
            });
        }
        Ok(QuizResult {
            score: self.score,
            total: self.bank.len(),
        })
    }

    /// Resets progress and reshuffles the bank into a fresh permutation.
    /// Valid in any state; membership is untouched, only order changes.
    pub fn restart(&mut self) {
        self.restart_with(&mut rand::thread_rng());
    }

    pub fn restart_with<R: Rng>(&mut self, rng: &mut R) {
        info!("Restarting quiz");
        self.index = 0;
        self.score = 0;
        self.submitted = 0;
        self.bank.shuffle_with(rng);
    }

    /// Mutable bank access for pre-quiz editing and generation. Locked once
    /// the first answer of the cycle is in, so the question set cannot shift
    /// mid-quiz.
    pub fn bank_mut(&mut self) -> Result<&mut QuestionBank, SessionError> {
        if self.submitted > 0 {
            return Err(SessionError::EditLocked);
        }
        Ok(&mut self.bank)
    }

    /// Deletes a question before the quiz starts. Subject to the same gate
    /// as `bank_mut` and the bank's own minimum-size invariant.
    pub fn delete_question(&mut self, index: usize) -> Result<Question, SessionError> {
        let removed = self.bank_mut()?.delete(index)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bank::seed_bank;
    use crate::core::question::Question;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> QuizSession {
        QuizSession::new(seed_bank())
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.score(), 0);
        assert_eq!(s.submitted(), 0);
        assert!(!s.is_complete());
        assert_eq!(s.progress(), 0.0);
        assert_eq!(
            s.current_question().unwrap().prompt(),
            "What is the capital of France?"
        );
    }

    /// One right, one wrong: index parks on the last question, outcome is "retry".
    #[test]
    fn test_mixed_run_ends_in_retry_outcome() {
        let mut s = session();

        let feedback = s.submit_answer("Paris").unwrap();
        assert!(matches!(
            feedback,
            AnswerFeedback::Correct { explanation: Some(_) }
        ));
        assert_eq!(s.score(), 1);
        assert_eq!(s.submitted(), 1);
        assert_eq!(s.progress(), 0.5);

        let feedback = s.submit_answer("Isaac Newton").unwrap();
        assert_eq!(feedback, AnswerFeedback::Incorrect);
        assert_eq!(s.score(), 1);
        assert_eq!(s.submitted(), 2);
        assert!(s.is_complete());

        let result = s.result().unwrap();
        assert_eq!((result.score, result.total), (1, 2));
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_perfect_run() {
        let mut s = session();
        s.submit_answer("Paris").unwrap();
        s.submit_answer("Albert Einstein").unwrap();
        assert!(s.result().unwrap().is_perfect());
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn test_current_question_fails_after_completion() {
        let mut s = session();
        s.submit_answer("Paris").unwrap();
        s.submit_answer("Albert Einstein").unwrap();
        assert!(matches!(
            s.current_question(),
            Err(SessionError::OutOfRange { total: 2, .. })
        ));
        assert!(matches!(
            s.submit_answer("anything"),
            Err(SessionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_result_fails_while_in_progress() {
        let mut s = session();
        s.submit_answer("Paris").unwrap();
        assert_eq!(
            s.result(),
            Err(SessionError::NotComplete {
                submitted: 1,
                total: 2
            })
        );
    }

    #[test]
    fn test_submitted_is_monotonic_and_bounded() {
        let mut s = session();
        let mut last = 0;
        while !s.is_complete() {
            s.submit_answer("whatever").unwrap();
            assert!(s.submitted() > last);
            assert!(s.submitted() <= s.total());
            assert!(s.score() <= s.submitted());
            last = s.submitted();
        }
    }

    #[test]
    fn test_restart_resets_counters_and_keeps_membership() {
        let mut s = session();
        s.submit_answer("Paris").unwrap();
        s.submit_answer("Albert Einstein").unwrap();
        assert!(s.is_complete());

        let mut before: Vec<String> = s
            .bank()
            .questions()
            .iter()
            .map(|q| q.prompt().to_string())
            .collect();
        s.restart_with(&mut StdRng::seed_from_u64(3));
        assert_eq!(s.score(), 0);
        assert_eq!(s.submitted(), 0);
        assert!(!s.is_complete());

        let mut after: Vec<String> = s
            .bank()
            .questions()
            .iter()
            .map(|q| q.prompt().to_string())
            .collect();
        before.sort();
        after.sort();
        assert_eq!(after, before);
    }

    #[test]
    fn test_editing_locked_after_first_answer() {
        let mut s = session();
        assert!(s.bank_mut().is_ok());
        s.submit_answer("Paris").unwrap();
        assert_eq!(s.bank_mut().unwrap_err(), SessionError::EditLocked);
        assert_eq!(s.delete_question(0).unwrap_err(), SessionError::EditLocked);
    }

    #[test]
    fn test_editing_unlocks_after_restart() {
        let mut s = session();
        s.submit_answer("Paris").unwrap();
        assert!(s.bank_mut().is_err());
        s.restart_with(&mut StdRng::seed_from_u64(1));
        assert!(s.bank_mut().is_ok());
    }

    #[test]
    fn test_delete_question_forwards_bank_invariant() {
        let mut s = session();
        s.delete_question(0).unwrap();
        let err = s.delete_question(0).unwrap_err();
        assert!(matches!(err, SessionError::Bank(BankError::InvariantViolation(_))));
        assert_eq!(s.total(), 1);
    }

    #[test]
    fn test_appended_question_joins_the_quiz() {
        let mut s = session();
        let extra = Question::new(
            "Largest planet in the solar system?",
            vec!["Earth".to_string(), "Jupiter".to_string()],
            "Jupiter",
            None,
        )
        .unwrap();
        s.bank_mut().unwrap().append(extra);
        assert_eq!(s.total(), 3);

        s.submit_answer("Paris").unwrap();
        s.submit_answer("Albert Einstein").unwrap();
        assert!(!s.is_complete());
        assert_eq!(
            s.current_question().unwrap().prompt(),
            "Largest planet in the solar system?"
        );
        s.submit_answer("Jupiter").unwrap();
        assert!(s.result().unwrap().is_perfect());
    }
}

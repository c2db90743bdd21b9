//! # Core Quiz Logic
//!
//! This module contains Quizforge's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │  (this module)               │
//!                    │                              │
//!                    │  • Question (value type)     │
//!                    │  • QuestionBank (collection) │
//!                    │  • QuizSession (state)       │
//!                    │  • HistorySnapshot (export)  │
//!                    │                              │
//!                    │  Sync. No I/O. No UI.        │
//!                    └──────────────┬───────────────┘
//!                                   │
//!               ┌───────────────────┼───────────────────┐
//!               ▼                   ▼                   ▼
//!        ┌────────────┐      ┌────────────┐      ┌────────────┐
//!        │  Console   │      │ Generator  │      │  Any GUI   │
//!        │   front    │      │ (appends)  │      │  (future)  │
//!        └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`question`]: the immutable trivia item and its validation
//! - [`bank`]: the ordered question collection with its min-size invariant
//! - [`session`]: the per-attempt state machine (progress, score, result)
//! - [`history`]: read-only (prompt, answer) export for display and dedup
//! - [`config`]: TOML config with defaults → file → env → CLI resolution

pub mod bank;
pub mod config;
pub mod history;
pub mod question;
pub mod session;

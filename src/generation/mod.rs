//! AI-backed question generation: prompt building, the completion call,
//! and defensive parsing of whatever comes back.

pub mod generator;
pub mod response;

pub use generator::{GenerationError, QuestionGenerator};

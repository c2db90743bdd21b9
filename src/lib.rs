//! Quizforge library exports for testing

use clap::ValueEnum;

pub mod cli;
pub mod core;
pub mod generation;
pub mod inference;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Debug, Default, ValueEnum)]
pub enum Provider {
    #[default]
    OpenAi,
    LmStudio,
}

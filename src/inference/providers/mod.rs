pub mod lmstudio;
pub mod openai;

pub use lmstudio::LmStudioProvider;
pub use openai::OpenAiProvider;

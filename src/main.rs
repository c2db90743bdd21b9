use std::sync::Arc;

use clap::Parser;
use quizforge::core::config;
use quizforge::inference::{CompletionProvider, LmStudioProvider, OpenAiProvider};
use quizforge::{Provider, cli};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "quizforge", about = "AI-assisted trivia quiz")]
struct Args {
    /// LLM provider to use for question generation
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to quizforge.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("quizforge.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    let cli_provider = args.provider.as_ref().map(|p| match p {
        Provider::OpenAi => "openai",
        Provider::LmStudio => "lmstudio",
    });
    let resolved = config::resolve(&file_config, cli_provider);

    log::info!(
        "Quizforge starting up with provider: {} (model: {})",
        resolved.provider,
        resolved.model_name
    );

    let provider: Arc<dyn CompletionProvider> = match resolved.provider.as_str() {
        "lmstudio" => Arc::new(LmStudioProvider::new(
            Some(resolved.lmstudio_base_url.clone()),
            resolved.generation_timeout,
        )),
        "openai" => {
            let api_key = match resolved.openai_api_key.clone() {
                Some(key) => key,
                None => {
                    eprintln!(
                        "No OpenAI API key configured. Set OPENAI_API_KEY or add it to \
                         ~/.quizforge/config.toml, or run with --provider lm-studio."
                    );
                    std::process::exit(1);
                }
            };
            Arc::new(OpenAiProvider::new(
                api_key,
                Some(resolved.openai_base_url.clone()),
                resolved.generation_timeout,
            ))
        }
        other => {
            eprintln!("Unknown provider {other:?} (expected \"openai\" or \"lmstudio\")");
            std::process::exit(1);
        }
    };

    cli::run(resolved, provider).await
}

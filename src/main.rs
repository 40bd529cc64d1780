mod app;
mod capture;
mod cli;
mod commands;
mod config;
mod core;
mod display;
mod input;
mod prompts;
mod providers;
mod session;

use crate::app::Application;
use crate::cli::Args;
use crate::commands::create_command_registry;
use crate::config::Config;
use crate::core::error::StepError;
use crate::providers::ReplyProvider;
use crate::providers::gemini::GeminiProvider;
use crate::session::ChatSession;
use crate::session::controller::SessionController;
use crate::session::store::SessionStore;
use clap::Parser;
use console::style;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{} {}", style("오류:").bold().red(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StepError> {
    let args = Args::parse();
    let config = Config::load()?;

    let api_key = config
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok());
    if api_key.is_none() {
        return Err(StepError::Config(
            "API 키가 없어요. ~/.littlestep/config.yaml의 api_key나 GEMINI_API_KEY 환경변수를 설정해주세요."
                .to_string(),
        ));
    }

    let model = args.model.clone().unwrap_or_else(|| config.model());
    let provider: Arc<dyn ReplyProvider> = match &config.base_url {
        Some(base_url) => Arc::new(GeminiProvider::with_endpoint(
            base_url.clone(),
            api_key,
            model,
            config.temperature(),
        )),
        None => Arc::new(GeminiProvider::new(api_key, model, config.temperature())),
    };

    let store = SessionStore::new(SessionStore::default_path());
    let session = ChatSession::restore(&store);
    if let Err(err) = store.save(session.messages()) {
        warn!("failed to persist session at startup: {err}");
    }

    let controller = SessionController::new(session, store, provider);
    let commands = create_command_registry();

    let mut app = Application::new(args, config, controller, commands);
    app.run().await
}

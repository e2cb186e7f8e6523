//! Runs the shop assistant HTTP server.

#[macro_use]
extern crate tracing;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use shopchat::AssistantBuilder;
use shopchat::config::AppConfig;
use shopchat::generator::Generator;
use shopchat::server::{self, AppState};
use shopchat::store::Store;
use shopchat_gemini_model::GeminiProvider;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(version, about = "Chat with your shop database")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides `server.bind`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    debug!("loaded configuration: {config:?}");
    if config.api_key().is_none() {
        warn!("GEMINI_API_KEY is not set, chat will only answer with a hint");
    }

    let store = Arc::new(Store::default());
    let generator = Arc::new(Generator::new(Arc::clone(&store)));
    generator
        .populate(config.seed.clients, config.seed.orders)
        .context("failed to generate sample data")?;

    let provider = GeminiProvider::new(config.gemini_config());
    let orchestrator = AssistantBuilder::with_model_provider(provider, store)
        .with_system_instruction(config.gemini.instructions.clone())
        .with_temperature(config.gemini.temperature)
        .build();

    let bind = args.bind.unwrap_or(config.server.bind);
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    let state = AppState {
        orchestrator,
        generator,
    };
    server::serve(listener, state, shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

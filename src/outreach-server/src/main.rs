//! Outreach Express — multi-channel B2B outreach orchestration server.
//!
//! Main entry point that wires the store, collaborators, and engine, then
//! starts the HTTP server.

use clap::Parser;
use outreach_api::ApiServer;
use outreach_channels::{
    PromptGenerator, SendGridDispatcher, StaticTokenVerifier, TwilioDispatcher,
};
use outreach_core::AppConfig;
use outreach_engine::OutreachEngine;
use outreach_store::DocumentStore;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "outreach-server")]
#[command(about = "Multi-channel B2B outreach orchestration server")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "OUTREACH__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "OUTREACH__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "OUTREACH__METRICS__PORT")]
    metrics_port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach=info,outreach_server=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Outreach Express starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        "Configuration loaded"
    );

    // Backing store and collaborators, built once and shared by reference.
    let store = Arc::new(DocumentStore::new());
    let generator = Arc::new(PromptGenerator::new(config.generator.clone()));
    let email = Arc::new(SendGridDispatcher::new(config.email.clone()));
    let sms = Arc::new(TwilioDispatcher::new(config.sms.clone()));

    let mut verifier = StaticTokenVerifier::new();
    for pair in &config.auth.dev_tokens {
        match pair.split_once(':') {
            Some((token, user_id)) => {
                verifier = verifier.with_token(token, user_id);
            }
            None => warn!(pair = %pair, "Ignoring malformed dev token (expected token:user_id)"),
        }
    }

    let engine = Arc::new(OutreachEngine::new(store, generator, email, sms));

    // Start API server
    let api_server = ApiServer::new(config, engine, Arc::new(verifier));

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Outreach Express is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}

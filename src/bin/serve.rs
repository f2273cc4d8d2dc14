//! Inference service entry point.
//!
//! Loads the model once, then serves `POST /predict/` until shutdown.
//! A model that fails to load is fatal: the process exits before binding.

use catdog_infer::classifier::CatDogClassifier;
use catdog_infer::core::{ClassifierConfig, ServerConfig};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cat-vs-Dog inference service")]
struct Args {
    /// Path to the consolidated ONNX model artifact
    #[arg(long, default_value = "models/cat-vs-dog.onnx")]
    model: std::path::PathBuf,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Decision threshold for the positive ("Dog") class
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,

    /// Maximum accepted upload size in bytes
    #[arg(long, default_value_t = 32 * 1024 * 1024)]
    max_body_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let server_config = ServerConfig {
        host: args.host,
        port: args.port,
        max_body_bytes: args.max_body_bytes,
    };
    server_config.validate()?;

    let classifier_config =
        ClassifierConfig::new(&args.model).with_threshold(args.threshold);
    let classifier = Arc::new(CatDogClassifier::new(&classifier_config)?);
    tracing::info!(model = %args.model.display(), "classifier ready");

    let app = catdog_infer::server::router(classifier, server_config.max_body_bytes);
    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler");
    }
}

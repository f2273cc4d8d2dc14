//! Offline model materializer.
//!
//! Validates a model bundle (config.json + model.onnx) and re-serializes it
//! as a single consolidated artifact for the inference service.

use catdog_infer::artifact::MaterializeJob;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Consolidate a model bundle into one artifact")]
struct Args {
    /// Directory holding config.json and model.onnx
    #[arg(long)]
    bundle: std::path::PathBuf,

    /// Path of the consolidated artifact to write
    #[arg(long)]
    output: std::path::PathBuf,

    /// Also write the validated config as a JSON sidecar
    #[arg(long)]
    keep_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    MaterializeJob::new(&args.bundle, &args.output)
        .keep_config(args.keep_config)
        .run()?;

    println!("model materialization successful: {}", args.output.display());
    Ok(())
}

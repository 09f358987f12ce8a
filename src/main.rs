use clap::Parser;
use snyk_actions::{generate_from_store, GenerateOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Generate a GitHub Action for every supported Snyk image variant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ref the generated documentation points at (e.g. v1.2.0).
    /// Defaults to the configured default tag.
    tag: Option<String>,

    /// Repository root the actions are generated into
    #[arg(long, env = "SNYK_ACTIONS_ROOT", default_value = ".")]
    root: PathBuf,

    /// Variant store, defaults to <root>/variants
    #[arg(long)]
    variants: Option<PathBuf>,

    /// Template directory, overrides the configured one
    #[arg(long)]
    templates: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        println!("Failed to initialize logging: {e}");
    }

    let args = Args::parse();

    let options = GenerateOptions {
        variants_path: args.variants,
        templates_dir: args.templates,
        tag: args.tag,
    };

    match generate_from_store(&args.root, options).await {
        Ok(result) => {
            info!(
                "Generated {} files ({} unchanged, {} removed)",
                result.written.len(),
                result.unchanged.len(),
                result.pruned.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", anyhow::Error::from(e));
            ExitCode::FAILURE
        }
    }
}

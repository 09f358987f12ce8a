use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use snyk_actions::utils::VARIANTS_FILE;
use snyk_actions::{
    execute_reconciliation, locate_upstream, Outcome, ProcessGenerator, ReconcilePolicy,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Reconcile the local variant list against the upstream snyk-images repository
#[derive(Parser, Debug)]
#[command(name = "reconcile", author, version, about, long_about = None)]
struct Args {
    /// Path to a checkout of the upstream images repository
    upstream: Option<String>,

    /// Variant store to reconcile
    #[arg(long, default_value = VARIANTS_FILE)]
    variants: PathBuf,

    /// What to do with variants no longer supported upstream: deprecate or remove
    #[arg(long, env = "SNYK_ACTIONS_POLICY", default_value_t = ReconcilePolicy::Deprecate)]
    policy: ReconcilePolicy,

    /// Generator to run after the store changes.
    /// Defaults to the `generate` binary next to this one.
    #[arg(long, env = "SNYK_ACTIONS_GENERATOR")]
    generator: Option<PathBuf>,

    /// Tag passed through to the generator
    #[arg(long)]
    tag: Option<String>,

    /// Report the plan without writing the store or running the generator
    #[arg(long)]
    dry_run: bool,
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

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            print!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(upstream) = args.upstream.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        println!("{}", Args::command().render_usage());
        return ExitCode::FAILURE;
    };
    let upstream = PathBuf::from(upstream);

    match run(&args, &upstream).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, upstream: &Path) -> anyhow::Result<()> {
    locate_upstream(upstream)?;

    let mut generator = match &args.generator {
        Some(program) => ProcessGenerator::new(program, args.tag.clone()),
        None => ProcessGenerator::sibling(args.tag.clone()),
    };
    // The generator reads ./variants unless told otherwise
    if args.variants != Path::new(VARIANTS_FILE) {
        generator = generator.with_variants(&args.variants);
    }

    let result = execute_reconciliation(
        upstream,
        &args.variants,
        args.policy,
        &generator,
        args.dry_run,
    )
    .await
    .with_context(|| format!("Reconciling {}", args.variants.display()))?;

    let plan = &result.plan;
    info!(
        policy = %plan.policy,
        deprecated = plan.with_outcome(Outcome::Deprecated).count(),
        reactivated = plan.with_outcome(Outcome::Reactivated).count(),
        removed = plan.with_outcome(Outcome::Removed).count(),
        written = result.written,
        regenerated = result.regenerated,
        "Reconciliation complete"
    );
    Ok(())
}

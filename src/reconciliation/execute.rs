use super::downstream::{DownstreamError, DownstreamGenerator};
use super::plan::{build_reconciliation_plan, Outcome, ReconcilePolicy, ReconciliationPlan};
use crate::upstream::{load_source_of_truth, UpstreamError};
use crate::variant::{read_variants, write_variants, VariantError};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Variant(#[from] VariantError),

    #[error(transparent)]
    Downstream(#[from] DownstreamError),
}

/// Result of reconciliation execution
#[derive(Debug, Clone, Default)]
pub struct ReconciliationResult {
    pub plan: ReconciliationPlan,
    /// Whether the store was rewritten
    pub written: bool,
    /// Whether the downstream generator ran
    pub regenerated: bool,
}

/// Reconcile the store at `variants_path` against the upstream checkout.
///
/// The store is only rewritten, and the generator only run, when the plan
/// changes at least one entry. With `dry_run` nothing is written.
pub async fn execute_reconciliation(
    upstream_path: &Path,
    variants_path: &Path,
    policy: ReconcilePolicy,
    generator: &dyn DownstreamGenerator,
    dry_run: bool,
) -> Result<ReconciliationResult, ReconcileError> {
    let source = load_source_of_truth(upstream_path).await?;
    info!(
        deprecated = source.deprecated.len(),
        supported = source.supported.len(),
        "Loaded upstream images"
    );

    let variants = read_variants(variants_path).await?;
    let plan = build_reconciliation_plan(&variants, &source, policy)?;
    log_plan(&plan);

    let mut result = ReconciliationResult {
        plan,
        ..Default::default()
    };

    if !result.plan.changed() {
        info!("Variant store is up to date, nothing to do");
        return Ok(result);
    }

    if dry_run {
        info!("Dry run, leaving {} untouched", variants_path.display());
        return Ok(result);
    }

    write_variants(variants_path, &result.plan.variants()).await?;
    result.written = true;
    info!(path = %variants_path.display(), "Updated variant store");

    generator.regenerate().await?;
    result.regenerated = true;

    Ok(result)
}

fn log_plan(plan: &ReconciliationPlan) {
    for decision in &plan.decisions {
        let variant = &decision.original.identifier;
        match decision.outcome {
            Outcome::Deprecated => info!(variant = %variant, "Marking variant deprecated"),
            Outcome::Reactivated => info!(variant = %variant, "Variant is supported again"),
            Outcome::Removed => info!(variant = %variant, "Removing variant"),
            Outcome::Active | Outcome::AlreadyDeprecated => {
                debug!(variant = %variant, outcome = ?decision.outcome, "Unchanged")
            }
        }
    }

    for name in &plan.untracked {
        info!(image = %name, "Upstream image has no variant");
    }
}

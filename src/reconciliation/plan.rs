use crate::upstream::{SourceOfTruth, UpstreamError};
use crate::variant::{display_name, Variant};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How a variant missing from upstream is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Keep the variant in the store, marked deprecated
    #[default]
    Deprecate,
    /// Drop the variant from the store
    Remove,
}

impl FromStr for ReconcilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deprecate" => Ok(Self::Deprecate),
            "remove" => Ok(Self::Remove),
            other => Err(format!("unknown policy '{other}', expected 'deprecate' or 'remove'")),
        }
    }
}

impl fmt::Display for ReconcilePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deprecate => write!(f, "deprecate"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// What happens to a single store entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Active upstream and unmarked locally
    Active,
    /// Already marked locally and still deprecated or absent upstream
    AlreadyDeprecated,
    /// Newly marked deprecated
    Deprecated,
    /// Marked locally but active upstream again
    Reactivated,
    /// Dropped from the store
    Removed,
}

impl Outcome {
    /// Whether the entry's line in the store changes
    pub fn is_change(self) -> bool {
        matches!(self, Self::Deprecated | Self::Reactivated | Self::Removed)
    }
}

/// Decision for one store entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub original: Variant,
    pub outcome: Outcome,
}

impl Decision {
    /// The entry as it is written back, `None` when removed
    pub fn result(&self) -> Option<Variant> {
        let name = self.original.identifier.clone();
        match self.outcome {
            Outcome::Active | Outcome::Reactivated => Some(Variant::active(name)),
            Outcome::AlreadyDeprecated | Outcome::Deprecated => Some(Variant::deprecated(name)),
            Outcome::Removed => None,
        }
    }
}

/// The reconciliation plan, in store order
#[derive(Debug, Clone, Default)]
pub struct ReconciliationPlan {
    pub policy: ReconcilePolicy,
    pub decisions: Vec<Decision>,
    /// Display names of supported upstream images with no local entry
    pub untracked: Vec<String>,
}

impl ReconciliationPlan {
    /// Whether writing the plan would change the store
    pub fn changed(&self) -> bool {
        self.decisions.iter().any(|d| d.outcome.is_change())
    }

    /// The store as it looks after the plan is applied
    pub fn variants(&self) -> Vec<Variant> {
        self.decisions.iter().filter_map(Decision::result).collect()
    }

    pub fn with_outcome(&self, outcome: Outcome) -> impl Iterator<Item = &Variant> {
        self.decisions
            .iter()
            .filter(move |d| d.outcome == outcome)
            .map(|d| &d.original)
    }
}

/// Decide, for every current variant, whether it stays active, gets
/// marked deprecated or is removed
pub fn build_reconciliation_plan(
    variants: &[Variant],
    source: &SourceOfTruth,
    policy: ReconcilePolicy,
) -> Result<ReconciliationPlan, UpstreamError> {
    let supported: HashSet<String> = source
        .supported
        .iter()
        .map(|name| display_name(name).to_lowercase())
        .collect();

    let decisions = variants
        .iter()
        .map(|variant| {
            let outcome = match policy {
                ReconcilePolicy::Deprecate => deprecate_outcome(variant, source)?,
                ReconcilePolicy::Remove => remove_outcome(variant, &supported),
            };
            Ok(Decision {
                original: variant.clone(),
                outcome,
            })
        })
        .collect::<Result<Vec<_>, UpstreamError>>()?;

    let tracked: HashSet<String> = variants
        .iter()
        .map(|v| v.identifier.to_lowercase())
        .collect();

    let untracked = source
        .supported
        .iter()
        .map(|name| display_name(name))
        .filter(|name| !tracked.contains(&name.to_lowercase()))
        .collect();

    Ok(ReconciliationPlan {
        policy,
        decisions,
        untracked,
    })
}

fn deprecate_outcome(
    variant: &Variant,
    source: &SourceOfTruth,
) -> Result<Outcome, UpstreamError> {
    let name = &variant.identifier;
    let found = source.contains_word(name)?;
    let deprecated_upstream = source.is_deprecated(name);

    Ok(match (found && !deprecated_upstream, variant.deprecated) {
        (true, false) => Outcome::Active,
        (true, true) => Outcome::Reactivated,
        (false, true) => Outcome::AlreadyDeprecated,
        (false, false) => Outcome::Deprecated,
    })
}

fn remove_outcome(variant: &Variant, supported: &HashSet<String>) -> Outcome {
    match (supported.contains(&variant.identifier.to_lowercase()), variant.deprecated) {
        (true, false) => Outcome::Active,
        (true, true) => Outcome::Reactivated,
        (false, _) => Outcome::Removed,
    }
}

mod downstream;
mod execute;
mod plan;

pub use downstream::{DownstreamError, DownstreamGenerator, ProcessGenerator};
pub use execute::{execute_reconciliation, ReconcileError, ReconciliationResult};
pub use plan::{build_reconciliation_plan, Decision, Outcome, ReconcilePolicy, ReconciliationPlan};

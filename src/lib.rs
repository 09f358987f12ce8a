pub mod config;
pub mod generate;
pub mod manifest;
pub mod reconciliation;
pub mod template;
pub mod upstream;
pub mod utils;
pub mod variant;

// Re-export commonly used types
pub use config::{read_config, ActionsConfig, ConfigError};
pub use generate::{
    generate_actions, generate_from_store, GenerateError, GenerateOptions, GenerateResult,
};
pub use manifest::{ActionsManifest, GeneratedFile, ManifestError};
pub use reconciliation::{
    build_reconciliation_plan, execute_reconciliation, Decision, DownstreamError,
    DownstreamGenerator, Outcome, ProcessGenerator, ReconcileError, ReconcilePolicy,
    ReconciliationPlan, ReconciliationResult,
};
pub use template::{
    RootTemplateContext, TemplateEngine, TemplateError, TemplateType, VariantTemplateContext,
};
pub use upstream::{load_source_of_truth, locate_upstream, SourceOfTruth, UpstreamError};
pub use variant::{display_name, read_variants, write_variants, Variant, VariantError};

use crate::variant::Variant;
use serde::Serialize;

/// Templates the generator renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateType {
    /// Root README listing every action
    Base,
    /// `action.yml` of a single variant
    Action,
    /// README of a single variant
    Readme,
    /// Workflow exercising every active action
    Workflow,
}

impl TemplateType {
    pub const ALL: [TemplateType; 4] = [
        TemplateType::Base,
        TemplateType::Action,
        TemplateType::Readme,
        TemplateType::Workflow,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateType::Base => "BASE.md.hbs",
            TemplateType::Action => "action.yml.hbs",
            TemplateType::Readme => "README.md.hbs",
            TemplateType::Workflow => "workflow.yml.hbs",
        }
    }
}

/// Context for per-variant templates
/// Placeholders: {{variant}}, {{name}}, {{ident}}, {{dirname}}, {{image}}, {{tag}}
#[derive(Debug, Clone, Serialize)]
pub struct VariantTemplateContext {
    pub variant: String,
    pub name: String,
    pub ident: String,
    pub dirname: String,
    pub image: String,
    pub tag: String,
}

impl VariantTemplateContext {
    pub fn new(variant: &Variant, image: &str, tag: &str) -> Self {
        let (name, ident) = variant.name_and_ident();
        Self {
            variant: variant.identifier.clone(),
            name: name.to_string(),
            ident: ident.to_string(),
            dirname: variant.dirname(),
            image: image.to_string(),
            tag: tag.to_string(),
        }
    }
}

/// Context for the root README and the workflow
/// Placeholders: {{variants}}, {{deprecated}}, {{image}}, {{tag}}
#[derive(Debug, Clone, Serialize)]
pub struct RootTemplateContext {
    pub variants: Vec<VariantTemplateContext>,
    pub deprecated: Vec<String>,
    pub image: String,
    pub tag: String,
}

impl RootTemplateContext {
    pub fn new(variants: &[Variant], image: &str, tag: &str) -> Self {
        Self {
            variants: variants
                .iter()
                .filter(|v| !v.deprecated)
                .map(|v| VariantTemplateContext::new(v, image, tag))
                .collect(),
            deprecated: variants
                .iter()
                .filter(|v| v.deprecated)
                .map(|v| v.identifier.clone())
                .collect(),
            image: image.to_string(),
            tag: tag.to_string(),
        }
    }
}

use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

use super::types::TemplateType;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),
}

/// Handlebars registry holding every generator template.
///
/// Strict mode is on, so a template referencing a name its context does
/// not declare fails to render. Output is YAML and Markdown, so nothing is
/// HTML-escaped.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Load every template type from `templates_dir`
    pub async fn load(templates_dir: &Path) -> Result<Self, TemplateError> {
        let mut engine = Self::new();

        for template_type in TemplateType::ALL {
            let file_name = template_type.file_name();
            let template_path = templates_dir.join(file_name);

            if !template_path.is_file() {
                return Err(TemplateError::TemplateNotFound(file_name.to_string()));
            }

            let content = fs::read_to_string(&template_path).await?;
            engine.register(template_type, &content)?;
        }

        Ok(engine)
    }

    /// Register template source for a template type
    pub fn register(
        &mut self,
        template_type: TemplateType,
        content: &str,
    ) -> Result<(), TemplateError> {
        self.handlebars
            .register_template_string(template_type.file_name(), content)
            .map_err(TemplateError::from)
    }

    /// Render a registered template with an explicit context
    pub fn render<T: Serialize>(
        &self,
        template_type: TemplateType,
        context: &T,
    ) -> Result<String, TemplateError> {
        let name = template_type.file_name();
        if !self.handlebars.has_template(name) {
            return Err(TemplateError::TemplateNotFound(name.to_string()));
        }

        self.handlebars
            .render(name, context)
            .map_err(TemplateError::from)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::VariantTemplateContext;
    use crate::variant::Variant;

    fn context(variant: &str) -> VariantTemplateContext {
        VariantTemplateContext::new(&Variant::active(variant), "snyk/snyk", "master")
    }

    #[test]
    fn test_template_type_file_name() {
        assert_eq!(TemplateType::Base.file_name(), "BASE.md.hbs");
        assert_eq!(TemplateType::Action.file_name(), "action.yml.hbs");
        assert_eq!(TemplateType::Readme.file_name(), "README.md.hbs");
        assert_eq!(TemplateType::Workflow.file_name(), "workflow.yml.hbs");
    }

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new();
        assert!(engine.handlebars.get_templates().is_empty());
    }

    #[test]
    fn test_render_variant_fields() {
        let mut engine = TemplateEngine::new();
        engine
            .register(
                TemplateType::Action,
                "{{name}}|{{ident}}|{{dirname}}|{{image}}:{{dirname}}@{{tag}}",
            )
            .unwrap();

        let rendered = engine
            .render(TemplateType::Action, &context("Gradle-jdk17"))
            .unwrap();
        assert_eq!(rendered, "Gradle|jdk17|gradle-jdk17|snyk/snyk:gradle-jdk17@master");
    }

    #[test]
    fn test_undeclared_name_is_render_error() {
        let mut engine = TemplateEngine::new();
        engine
            .register(TemplateType::Readme, "{{variant}} {{undeclared}}")
            .unwrap();

        let result = engine.render(TemplateType::Readme, &context("Node"));
        assert!(matches!(result, Err(TemplateError::RenderError(_))));
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let mut engine = TemplateEngine::new();
        engine.register(TemplateType::Readme, "{{variant}}").unwrap();

        let rendered = engine
            .render(TemplateType::Readme, &context("C&C++<x>"))
            .unwrap();
        assert_eq!(rendered, "C&C++<x>");
    }

    #[test]
    fn test_unregistered_template_not_found() {
        let engine = TemplateEngine::new();
        let result = engine.render(TemplateType::Workflow, &context("Node"));
        assert!(matches!(result, Err(TemplateError::TemplateNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_reports_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("BASE.md.hbs"), "# Actions")
            .await
            .unwrap();

        let result = TemplateEngine::load(dir.path()).await;
        match result {
            Err(TemplateError::TemplateNotFound(name)) => assert_eq!(name, "action.yml.hbs"),
            _ => panic!("expected missing action template"),
        }
    }
}

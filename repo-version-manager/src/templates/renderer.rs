//! Template renderer.

use super::TemplateContext;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Helper function for equality comparison in templates.
///
/// Usage: `{{#if (eq variable "value")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders user-supplied formats for branch names, titles and messages.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").finish_non_exhaustive()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders `template` against an update context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed or references an
    /// unknown variable.
    pub fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateError;

    fn sample_context() -> TemplateContext {
        TemplateContext {
            repository: "acme/widgets".to_string(),
            branch: "release/1.0".to_string(),
            version: "1.45.0".to_string(),
            target_path: "conanrecipe_ckit.txt".to_string(),
            subject: "constructionkit".to_string(),
            mode: "marker".to_string(),
        }
    }

    #[test]
    fn renders_simple_template() {
        let renderer = TemplateRenderer::new();
        let result = renderer
            .render("{{repository}}@{{branch}} -> {{version}}", &sample_context())
            .unwrap();
        assert_eq!(result, "acme/widgets@release/1.0 -> 1.45.0");
    }

    #[test]
    fn renders_conditional_eq() {
        let renderer = TemplateRenderer::new();
        let template = r#"{{#if (eq mode "marker")}}marker{{else}}json{{/if}}"#;

        assert_eq!(renderer.render(template, &sample_context()).unwrap(), "marker");

        let mut context = sample_context();
        context.mode = "key_value".to_string();
        assert_eq!(renderer.render(template, &context).unwrap(), "json");
    }

    #[test]
    fn strict_mode_rejects_unknown_variables() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render("{{old_string}}", &sample_context());
        assert!(matches!(result, Err(TemplateError::RenderError(_))));
    }

    #[test]
    fn does_not_escape_html() {
        let renderer = TemplateRenderer::new();
        let mut context = sample_context();
        context.version = "<1.0 & >2.0".to_string();

        assert_eq!(
            renderer.render("{{version}}", &context).unwrap(),
            "<1.0 & >2.0"
        );
    }
}

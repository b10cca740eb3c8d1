// weekshare-core/src/infrastructure/templates.rs

// Renders the Slack message templates (mrkdwn text) with minijinja.

use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaRenderer<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // {{ 3 | week_label }} -> "3주차"
        env.add_filter("week_label", |week: u32| -> String {
            crate::domain::cohort::week_label(week)
        });

        Self { env }
    }
}

impl<'a> Default for JinjaRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

use crate::application::ports::TemplateEngine;
use crate::error::WeekShareError;

impl<'a> TemplateEngine for JinjaRenderer<'a> {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, WeekShareError> {
        self.env
            .render_str(template, context)
            .map_err(|e| WeekShareError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn test_jinja_render_context() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let result = renderer.render("{{ cohort }} / {{ week }}", &json!({"cohort": "8기", "week": 3}))?;
        assert_eq!(result, "8기 / 3");
        Ok(())
    }

    #[test]
    fn test_jinja_week_label_filter() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let result = renderer.render("{{ 4 | week_label }}", &json!({}))?;
        assert_eq!(result, "4주차");
        Ok(())
    }

    #[test]
    fn test_jinja_syntax_error() {
        let renderer = JinjaRenderer::new();
        let result = renderer.render("{% if %}", &json!({}));
        assert!(matches!(
            result,
            Err(WeekShareError::Infrastructure(InfrastructureError::TemplateError(_)))
        ));
    }
}

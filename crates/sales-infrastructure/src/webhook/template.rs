//! Sale message rendering with Handlebars

use handlebars::Handlebars;
use sales_core::error::DomainError;
use sales_core::services::SaleNotification;

pub const DEFAULT_SALE_TEMPLATE: &str =
    "New sale: {{member}} {{display_amount}} ({{date}}){{#if description}} - {{description}}{{/if}}";

/// Renders per-integration templates. Output is plain chat text, so HTML
/// escaping is disabled.
pub struct MessageRenderer {
    registry: Handlebars<'static>,
}

impl MessageRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    pub fn render(&self, template: Option<&str>, sale: &SaleNotification) -> Result<String, DomainError> {
        let template = template
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SALE_TEMPLATE);

        self.registry
            .render_template(template, sale)
            .map_err(|e| DomainError::validation(format!("Invalid message template: {}", e)))
    }
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

//! HTTP delivery of chat messages

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info};

use sales_core::domain::{Integration, IntegrationProvider};
use sales_core::error::DomainError;
use sales_core::services::{SaleNotification, WebhookSender};
use sales_shared::config::WebhookSettings;

use super::template::MessageRenderer;

const CHATWORK_TOKEN_HEADER: &str = "X-ChatWorkToken";

pub struct HttpWebhookSender {
    client: Client,
    renderer: MessageRenderer,
}

impl HttpWebhookSender {
    /// Fails when the HTTP client cannot be built with the configured
    /// timeout.
    pub fn new(settings: &WebhookSettings) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| {
                error!("Failed to build webhook client: {}", e);
                DomainError::InternalError(format!("webhook client: {}", e))
            })?;
        Ok(Self {
            client,
            renderer: MessageRenderer::new(),
        })
    }

    async fn deliver(
        &self,
        integration: &Integration,
        text: &str,
        sale: Option<&SaleNotification>,
    ) -> Result<(), DomainError> {
        let endpoint = integration
            .endpoint()
            .ok_or_else(|| DomainError::validation("Integration has no delivery endpoint"))?;

        let request = match integration.provider {
            IntegrationProvider::Slack => self.client.post(&endpoint).json(&json!({ "text": text })),
            IntegrationProvider::Chatwork => {
                let token = integration.api_token.as_deref().unwrap_or_default();
                self.client
                    .post(&endpoint)
                    .header(CHATWORK_TOKEN_HEADER, token)
                    .form(&[("body", text)])
            }
            IntegrationProvider::Generic => self
                .client
                .post(&endpoint)
                .json(&json!({ "text": text, "record": sale })),
        };

        debug!("Delivering {} webhook for tenant {}", integration.provider.as_str(), integration.tenant_id);

        let response = request.send().await.map_err(|e| {
            error!("Webhook request to {} failed: {}", integration.provider.as_str(), e);
            DomainError::ExternalService(format!("{} request failed: {}", integration.provider.as_str(), e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} webhook returned {}: {}", integration.provider.as_str(), status, body);
            return Err(DomainError::ExternalService(format!(
                "{} responded with {}",
                integration.provider.as_str(),
                status
            )));
        }

        info!("{} webhook delivered for tenant {}", integration.provider.as_str(), integration.tenant_id);
        Ok(())
    }
}

#[async_trait]
impl WebhookSender for HttpWebhookSender {
    async fn send_sale(&self, integration: &Integration, sale: &SaleNotification) -> Result<(), DomainError> {
        let text = self.renderer.render(integration.message_template.as_deref(), sale)?;
        self.deliver(integration, &text, Some(sale)).await
    }

    async fn send_text(&self, integration: &Integration, text: &str) -> Result<(), DomainError> {
        self.deliver(integration, text, None).await
    }
}

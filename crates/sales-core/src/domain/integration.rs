//! Messaging integration (sales notifications)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::normalize_optional;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationProvider {
    Slack,
    Chatwork,
    Generic,
}

impl IntegrationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationProvider::Slack => "SLACK",
            IntegrationProvider::Chatwork => "CHATWORK",
            IntegrationProvider::Generic => "GENERIC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SLACK" => Some(IntegrationProvider::Slack),
            "CHATWORK" => Some(IntegrationProvider::Chatwork),
            "GENERIC" => Some(IntegrationProvider::Generic),
            _ => None,
        }
    }
}

pub const CHATWORK_API_BASE: &str = "https://api.chatwork.com/v2";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub provider: IntegrationProvider,
    pub webhook_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    pub room_id: Option<String>,
    pub message_template: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable integration attributes.
#[derive(Debug, Clone, Default)]
pub struct IntegrationSettings {
    pub webhook_url: Option<String>,
    pub api_token: Option<String>,
    pub room_id: Option<String>,
    pub message_template: Option<String>,
    pub is_active: bool,
}

impl Integration {
    pub fn new(
        tenant_id: Uuid,
        provider: IntegrationProvider,
        settings: IntegrationSettings,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut integration = Self {
            id: Uuid::new_v4(),
            tenant_id,
            provider,
            webhook_url: None,
            api_token: None,
            room_id: None,
            message_template: None,
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        integration.apply(settings)?;
        Ok(integration)
    }

    /// Overwrite settings. A blank `api_token` keeps the stored one so the
    /// secret never needs to round-trip through the client.
    pub fn apply(&mut self, settings: IntegrationSettings) -> Result<(), DomainError> {
        let webhook_url = normalize_optional(settings.webhook_url);
        if let Some(url) = &webhook_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(DomainError::validation("webhook_url must be an http(s) URL"));
            }
        }
        let api_token = normalize_optional(settings.api_token).or_else(|| self.api_token.take());
        let room_id = normalize_optional(settings.room_id);

        match self.provider {
            IntegrationProvider::Slack | IntegrationProvider::Generic if webhook_url.is_none() => {
                return Err(DomainError::validation(format!(
                    "{} integrations need a webhook_url",
                    self.provider.as_str()
                )));
            }
            IntegrationProvider::Chatwork if api_token.is_none() => {
                return Err(DomainError::validation("CHATWORK integrations need an api_token"));
            }
            IntegrationProvider::Chatwork if room_id.is_none() && webhook_url.is_none() => {
                return Err(DomainError::validation("CHATWORK integrations need a room_id"));
            }
            _ => {}
        }

        self.webhook_url = webhook_url;
        self.api_token = api_token;
        self.room_id = room_id;
        self.message_template = normalize_optional(settings.message_template);
        self.is_active = settings.is_active;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Where messages are delivered.
    pub fn endpoint(&self) -> Option<String> {
        match self.provider {
            IntegrationProvider::Chatwork => self.webhook_url.clone().or_else(|| {
                self.room_id
                    .as_ref()
                    .map(|room| format!("{}/rooms/{}/messages", CHATWORK_API_BASE, room))
            }),
            _ => self.webhook_url.clone(),
        }
    }
}

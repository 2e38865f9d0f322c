//! Targets, custom fields, slides, display mode and integrations

use serde::Deserialize;
use uuid::Uuid;

use sales_core::domain::{
    CustomFieldType, DisplayConfigView, IntegrationProvider, IntegrationSettings, Period, SlideContent, SlideType,
    YearMonth,
};
use sales_core::services::{CustomFieldInput, DisplayConfigInput, TargetInput};

use super::admin::default_true;
use crate::error::ApiError;

const DEFAULT_SLIDE_SECONDS: i32 = 10;

#[derive(Debug, Deserialize)]
pub struct TargetsQuery {
    pub year: i32,
    pub month: u32,
}

impl TargetsQuery {
    pub fn year_month(&self) -> Result<YearMonth, ApiError> {
        Ok(YearMonth::new(self.year, self.month)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetItem {
    pub member_id: Uuid,
    #[serde(default)]
    pub monthly: i64,
    #[serde(default)]
    pub quarterly: i64,
    #[serde(default)]
    pub annual: i64,
}

#[derive(Debug, Deserialize)]
pub struct TargetsRequest {
    pub year: i32,
    pub month: u32,
    pub items: Vec<TargetItem>,
}

impl TargetsRequest {
    pub fn into_parts(self) -> Result<(YearMonth, Vec<TargetInput>), ApiError> {
        let month = YearMonth::new(self.year, self.month)?;
        let items = self
            .items
            .into_iter()
            .map(|i| TargetInput {
                member_id: i.member_id,
                monthly: i.monthly,
                quarterly: i.quarterly,
                annual: i.annual,
            })
            .collect();
        Ok((month, items))
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomFieldRequest {
    pub name: String,
    pub field_type: CustomFieldType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl From<CustomFieldRequest> for CustomFieldInput {
    fn from(req: CustomFieldRequest) -> Self {
        CustomFieldInput {
            name: req.name,
            field_type: req.field_type,
            is_required: req.is_required,
            options: req.options,
            sort_order: req.sort_order,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlideRequest {
    pub slide_type: SlideType,
    pub title: Option<String>,
    pub content: String,
    #[serde(default = "default_slide_seconds")]
    pub display_seconds: i32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_slide_seconds() -> i32 {
    DEFAULT_SLIDE_SECONDS
}

impl From<SlideRequest> for SlideContent {
    fn from(req: SlideRequest) -> Self {
        SlideContent {
            slide_type: req.slide_type,
            title: req.title,
            content: req.content,
            display_seconds: req.display_seconds,
            sort_order: req.sort_order,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DisplayRequest {
    pub interval_seconds: i32,
    #[serde(default = "default_true")]
    pub auto_loop: bool,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub views: Vec<DisplayConfigView>,
}

impl From<DisplayRequest> for DisplayConfigInput {
    fn from(req: DisplayRequest) -> Self {
        DisplayConfigInput {
            interval_seconds: req.interval_seconds,
            auto_loop: req.auto_loop,
            period: req.period,
            views: req.views,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IntegrationRequest {
    pub provider: IntegrationProvider,
    pub webhook_url: Option<String>,
    /// Blank keeps the stored token.
    pub api_token: Option<String>,
    pub room_id: Option<String>,
    pub message_template: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl IntegrationRequest {
    pub fn into_parts(self) -> (IntegrationProvider, IntegrationSettings) {
        (
            self.provider,
            IntegrationSettings {
                webhook_url: self.webhook_url,
                api_token: self.api_token,
                room_id: self.room_id,
                message_template: self.message_template,
                is_active: self.is_active,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::domain::ViewType;

    #[test]
    fn display_request_accepts_screaming_case_enums() {
        let req: DisplayRequest = serde_json::from_value(serde_json::json!({
            "interval_seconds": 20,
            "period": "QUARTERLY",
            "views": [
                { "view_type": "RANKING", "custom_slide_id": null, "duration_seconds": 15, "sort_order": 0, "is_enabled": true }
            ]
        }))
        .unwrap();
        let input = DisplayConfigInput::from(req);
        assert_eq!(input.period, Period::Quarterly);
        assert!(input.auto_loop);
        assert_eq!(input.views[0].view_type, ViewType::Ranking);
    }

    #[test]
    fn slide_request_defaults() {
        let req: SlideRequest =
            serde_json::from_value(serde_json::json!({ "slide_type": "TEXT", "content": "Hello" })).unwrap();
        let content = SlideContent::from(req);
        assert_eq!(content.display_seconds, DEFAULT_SLIDE_SECONDS);
        assert!(content.is_active);
    }

    #[test]
    fn targets_request_checks_month() {
        let req = TargetsRequest {
            year: 2024,
            month: 13,
            items: vec![],
        };
        assert!(req.into_parts().is_err());
    }
}

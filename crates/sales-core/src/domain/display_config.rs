//! Display-mode (kiosk rotation) configuration

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::Period;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewType {
    Ranking,
    BarChart,
    LineChart,
    PieChart,
    Summary,
    CustomSlide,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Ranking => "RANKING",
            ViewType::BarChart => "BAR_CHART",
            ViewType::LineChart => "LINE_CHART",
            ViewType::PieChart => "PIE_CHART",
            ViewType::Summary => "SUMMARY",
            ViewType::CustomSlide => "CUSTOM_SLIDE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "RANKING" => Some(ViewType::Ranking),
            "BAR_CHART" => Some(ViewType::BarChart),
            "LINE_CHART" => Some(ViewType::LineChart),
            "PIE_CHART" => Some(ViewType::PieChart),
            "SUMMARY" => Some(ViewType::Summary),
            "CUSTOM_SLIDE" => Some(ViewType::CustomSlide),
            _ => None,
        }
    }
}

pub const MIN_INTERVAL_SECONDS: i32 = 5;
pub const MAX_INTERVAL_SECONDS: i32 = 3600;
pub const DEFAULT_INTERVAL_SECONDS: i32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfigView {
    pub view_type: ViewType,
    pub custom_slide_id: Option<Uuid>,
    pub duration_seconds: i32,
    pub sort_order: i32,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub tenant_id: Uuid,
    pub interval_seconds: i32,
    pub auto_loop: bool,
    pub period: Period,
    pub views: Vec<DisplayConfigView>,
    pub updated_at: DateTime<Utc>,
}

impl DisplayConfig {
    /// Rotation used until a tenant saves its own settings.
    pub fn default_for(tenant_id: Uuid) -> Self {
        let views = [
            ViewType::Ranking,
            ViewType::BarChart,
            ViewType::LineChart,
            ViewType::PieChart,
            ViewType::Summary,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, view_type)| DisplayConfigView {
            view_type,
            custom_slide_id: None,
            duration_seconds: DEFAULT_INTERVAL_SECONDS,
            sort_order: i as i32,
            is_enabled: true,
        })
        .collect();

        Self {
            tenant_id,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            auto_loop: true,
            period: Period::Monthly,
            views,
            updated_at: Utc::now(),
        }
    }

    /// Check ranges and view consistency. Slide ownership is checked by the
    /// service, which can see the tenant's slides.
    pub fn check(&self) -> Result<(), DomainError> {
        let in_range = |s: i32| (MIN_INTERVAL_SECONDS..=MAX_INTERVAL_SECONDS).contains(&s);
        if !in_range(self.interval_seconds) {
            return Err(DomainError::validation(format!(
                "interval_seconds must be between {} and {}",
                MIN_INTERVAL_SECONDS, MAX_INTERVAL_SECONDS
            )));
        }
        for view in &self.views {
            if !in_range(view.duration_seconds) {
                return Err(DomainError::validation(format!(
                    "duration_seconds of {} must be between {} and {}",
                    view.view_type.as_str(),
                    MIN_INTERVAL_SECONDS,
                    MAX_INTERVAL_SECONDS
                )));
            }
            match (view.view_type, view.custom_slide_id) {
                (ViewType::CustomSlide, None) => {
                    return Err(DomainError::validation("CUSTOM_SLIDE views need a custom_slide_id"));
                }
                (ViewType::CustomSlide, Some(_)) | (_, None) => {}
                (other, Some(_)) => {
                    return Err(DomainError::validation(format!(
                        "{} views cannot reference a slide",
                        other.as_str()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Views sorted by `sort_order`, stable for equal keys.
    pub fn sort_views(&mut self) {
        self.views.sort_by_key(|v| v.sort_order);
    }
}

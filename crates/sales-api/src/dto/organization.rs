//! Members, departments and groups

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use sales_core::services::{GroupInput, MemberInput};

use super::admin::default_true;

#[derive(Debug, Deserialize, Validate)]
pub struct MemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<Uuid>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<MemberRequest> for MemberInput {
    fn from(req: MemberRequest) -> Self {
        MemberInput {
            name: req.name,
            email: req.email,
            department_id: req.department_id,
            image_url: req.image_url,
            display_order: req.display_order,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GroupRequest {
    pub name: String,
    pub description: Option<String>,
}

impl From<GroupRequest> for GroupInput {
    fn from(req: GroupRequest) -> Self {
        GroupInput {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SyncMembersRequest {
    pub member_ids: Vec<Uuid>,
}

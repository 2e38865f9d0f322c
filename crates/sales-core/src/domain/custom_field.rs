//! Custom field definition domain entity
//!
//! Tenants attach extra attributes to sales records. Definitions are never
//! removed; deleting one flips `is_active` so values stored on historical
//! records stay resolvable by id.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomFieldType {
    Text,
    Date,
    Select,
}

impl CustomFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomFieldType::Text => "TEXT",
            CustomFieldType::Date => "DATE",
            CustomFieldType::Select => "SELECT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TEXT" => Some(CustomFieldType::Text),
            "DATE" => Some(CustomFieldType::Date),
            "SELECT" => Some(CustomFieldType::Select),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomFieldDefinition {
    pub id: Uuid,
    pub tenant_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Field name must be between 1 and 100 characters"))]
    pub name: String,

    pub field_type: CustomFieldType,
    pub is_required: bool,
    pub options: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomFieldDefinition {
    pub fn new(
        tenant_id: Uuid,
        name: String,
        field_type: CustomFieldType,
        is_required: bool,
        options: Vec<String>,
        sort_order: i32,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut field = Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: String::new(),
            field_type,
            is_required,
            options: Vec::new(),
            sort_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        field.apply(name, field_type, is_required, options, sort_order)?;
        Ok(field)
    }

    /// Overwrite the editable attributes and re-validate.
    pub fn apply(
        &mut self,
        name: String,
        field_type: CustomFieldType,
        is_required: bool,
        options: Vec<String>,
        sort_order: i32,
    ) -> Result<(), DomainError> {
        self.name = name.trim().to_string();
        self.field_type = field_type;
        self.is_required = is_required;
        self.sort_order = sort_order;
        self.options = match field_type {
            CustomFieldType::Select => {
                let mut cleaned: Vec<String> = Vec::new();
                for option in options {
                    let option = option.trim().to_string();
                    if !option.is_empty() && !cleaned.contains(&option) {
                        cleaned.push(option);
                    }
                }
                if cleaned.is_empty() {
                    return Err(DomainError::validation("SELECT fields need at least one option"));
                }
                cleaned
            }
            _ => Vec::new(),
        };
        self.updated_at = Utc::now();
        self.validate()?;
        Ok(())
    }

    fn check_value(&self, value: &str) -> Result<(), DomainError> {
        match self.field_type {
            CustomFieldType::Text => {
                if value.chars().count() > 1000 {
                    return Err(DomainError::validation(format!("{} is too long", self.name)));
                }
            }
            CustomFieldType::Date => {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    DomainError::validation(format!("{} must be a date (YYYY-MM-DD)", self.name))
                })?;
            }
            CustomFieldType::Select => {
                if !self.options.iter().any(|o| o == value) {
                    return Err(DomainError::validation(format!(
                        "{} must be one of: {}",
                        self.name,
                        self.options.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Validate submitted custom field values against the tenant's active
/// definitions and return the normalized map (trimmed, blanks dropped).
pub fn validate_values(
    definitions: &[CustomFieldDefinition],
    values: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, DomainError> {
    let active: Vec<&CustomFieldDefinition> = definitions.iter().filter(|d| d.is_active).collect();
    let mut normalized = BTreeMap::new();

    for (key, value) in values {
        let definition = active
            .iter()
            .find(|d| d.id.to_string() == key)
            .ok_or_else(|| DomainError::validation(format!("Unknown custom field: {}", key)))?;
        let value = value.trim().to_string();
        if value.is_empty() {
            continue;
        }
        definition.check_value(&value)?;
        normalized.insert(key, value);
    }

    for definition in active.iter().filter(|d| d.is_required) {
        if !normalized.contains_key(&definition.id.to_string()) {
            return Err(DomainError::validation(format!("{} is required", definition.name)));
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field_type: CustomFieldType, required: bool, options: &[&str]) -> CustomFieldDefinition {
        CustomFieldDefinition::new(
            Uuid::nil(),
            format!("{:?} field", field_type),
            field_type,
            required,
            options.iter().map(|s| s.to_string()).collect(),
            0,
        )
        .unwrap()
    }

    fn values(pairs: &[(&CustomFieldDefinition, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(d, v)| (d.id.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_select_requires_options() {
        let result = CustomFieldDefinition::new(
            Uuid::nil(),
            "Channel".to_string(),
            CustomFieldType::Select,
            false,
            vec!["  ".to_string()],
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_options_dropped_for_text() {
        let f = field(CustomFieldType::Text, false, &["a", "b"]);
        assert!(f.options.is_empty());
    }

    #[test]
    fn test_valid_values_normalized() {
        let text = field(CustomFieldType::Text, true, &[]);
        let date = field(CustomFieldType::Date, false, &[]);
        let select = field(CustomFieldType::Select, false, &["Web", "Store"]);
        let defs = vec![text.clone(), date.clone(), select.clone()];

        let result = validate_values(
            &defs,
            values(&[(&text, "  hello "), (&date, "2024-02-29"), (&select, "Web")]),
        )
        .unwrap();
        assert_eq!(result.get(&text.id.to_string()).map(String::as_str), Some("hello"));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_required_missing() {
        let text = field(CustomFieldType::Text, true, &[]);
        let result = validate_values(&[text.clone()], values(&[(&text, "   ")]));
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_bad_select_and_date() {
        let date = field(CustomFieldType::Date, false, &[]);
        let select = field(CustomFieldType::Select, false, &["Web"]);
        let defs = vec![date.clone(), select.clone()];
        assert!(validate_values(&defs, values(&[(&date, "2024-13-01")])).is_err());
        assert!(validate_values(&defs, values(&[(&select, "Phone")])).is_err());
    }

    #[test]
    fn test_inactive_and_unknown_fields_rejected() {
        let mut retired = field(CustomFieldType::Text, true, &[]);
        retired.is_active = false;
        let defs = vec![retired.clone()];

        // Inactive required fields are not enforced
        assert!(validate_values(&defs, BTreeMap::new()).unwrap().is_empty());
        // but cannot receive new values
        assert!(validate_values(&defs, values(&[(&retired, "x")])).is_err());
    }
}

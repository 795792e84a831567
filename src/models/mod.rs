//! Data models for the lead inquiry API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    New,
    Contacted,
    Quoted,
    Completed,
    Cancelled,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 5] = [
        ContactStatus::New,
        ContactStatus::Contacted,
        ContactStatus::Quoted,
        ContactStatus::Completed,
        ContactStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Contacted => "contacted",
            ContactStatus::Quoted => "quoted",
            ContactStatus::Completed => "completed",
            ContactStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = ContactStatus::ALL.iter().map(|s| s.as_str()).collect();
                format!("Invalid status. Must be one of: {}", valid.join(", "))
            })
    }
}

// =============================================================================
// Contact
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inquiry as posted by the contact form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContact {
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub service: Option<String>,
    #[validate(length(max = 5000))]
    pub message: String,
}

impl CreateContact {
    /// Copy with surrounding whitespace stripped from name and email
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        }
    }

    /// The form sends optional fields as empty strings; store those as NULL
    pub fn normalized_phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    pub fn normalized_service(&self) -> Option<&str> {
        non_blank(self.service.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactCreated {
    pub id: Uuid,
    pub message: String,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ServiceOffering {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub instagram: &'static str,
    pub location: &'static str,
    pub established: &'static str,
    pub specialties: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

// =============================================================================
// API Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_status_parse() {
        assert_eq!("quoted".parse::<ContactStatus>(), Ok(ContactStatus::Quoted));
        assert_eq!("new".parse::<ContactStatus>(), Ok(ContactStatus::New));
        let err = "archived".parse::<ContactStatus>().unwrap_err();
        assert!(err.contains("contacted"));
    }

    #[test]
    fn test_contact_status_serializes_snake_case() {
        let json = serde_json::to_string(&ContactStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn test_create_contact_optional_fields_default() {
        let input: CreateContact = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@x.com",
            "message": "Hi"
        }))
        .unwrap();
        assert_eq!(input.phone, None);
        assert_eq!(input.normalized_service(), None);
    }

    #[test]
    fn test_create_contact_trimmed() {
        let input: CreateContact = serde_json::from_value(serde_json::json!({
            "name": "  Jane ",
            "email": "jane@x.com \n",
            "phone": " 0700188923 ",
            "message": " Hi "
        }))
        .unwrap();
        let trimmed = input.trimmed();
        assert_eq!(trimmed.name, "Jane");
        assert_eq!(trimmed.email, "jane@x.com");
        assert_eq!(trimmed.message, " Hi ");
        assert_eq!(trimmed.normalized_phone(), Some("0700188923"));
    }

    #[test]
    fn test_create_contact_empty_strings_normalize_to_none() {
        let input: CreateContact = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@x.com",
            "phone": "",
            "service": "  ",
            "message": "Hi"
        }))
        .unwrap();
        assert_eq!(input.normalized_phone(), None);
        assert_eq!(input.normalized_service(), None);
    }

    #[test]
    fn test_api_response_error_shape() {
        let response = ApiResponse::<()>::error("Contact not found");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Contact not found");
        assert!(json["data"].is_null());
    }
}

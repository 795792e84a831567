//! Input validation module

use crate::catalog::is_known_service;
use crate::models::CreateContact;
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' is too long (max {max} characters)")]
    TooLong { field: String, max: u64 },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Field '{field}' is invalid")]
    Invalid { field: String },
}

/// Validate an inquiry posted to the contact endpoint
pub fn validate_contact(input: &CreateContact) -> Result<(), ValidationError> {
    let input = input.trimmed();

    for (field, value) in [
        ("name", &input.name),
        ("email", &input.email),
        ("message", &input.message),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    if let Err(errors) = input.validate() {
        return Err(first_error(&errors));
    }

    // Unknown services are stored anyway; the form may offer new ones first
    if let Some(service) = input.normalized_service() {
        if !is_known_service(service) {
            tracing::warn!("Inquiry for service not in catalog: {}", service);
        }
    }

    Ok(())
}

/// Translate the first `validator` failure into our error type.
///
/// Fields are checked in form order so the reported error is stable.
fn first_error(errors: &validator::ValidationErrors) -> ValidationError {
    let field_errors = errors.field_errors();

    for field in ["name", "email", "phone", "service", "message"] {
        let Some(first) = field_errors.get(field).and_then(|errs| errs.first()) else {
            continue;
        };

        return match first.code.as_ref() {
            "email" => ValidationError::InvalidEmail,
            "length" => ValidationError::TooLong {
                field: field.to_string(),
                max: first
                    .params
                    .get("max")
                    .and_then(|v| v.as_u64())
                    .unwrap_or_default(),
            },
            _ => ValidationError::Invalid {
                field: field.to_string(),
            },
        };
    }

    ValidationError::Invalid {
        field: "unknown".to_string(),
    }
}

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::services::store::Record;

/// Newsletter subscriber. Optional fields are stored explicitly (`null`, `[]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Subscriber {
    #[validate(email(message = "Invalid email address"))]
    #[validate(custom(function = "validate_email_domain", message = "Invalid email address"))]
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Require a dotted domain (`a@tea.example`, not `a@localhost`).
pub(crate) fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let dotted = email
        .rsplit_once('@')
        .map(|(_, domain)| {
            domain
                .split('.')
                .filter(|label| !label.is_empty())
                .count()
                >= 2
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        })
        .unwrap_or(false);

    if dotted {
        Ok(())
    } else {
        Err(ValidationError::new("email_domain"))
    }
}

impl Record for Subscriber {
    const COLLECTION: &'static str = "subscriber";
}

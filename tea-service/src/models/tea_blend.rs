use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_true;
use crate::services::store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TeaBlend {
    /// e.g. "Calm Chamomile"
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub flavor_notes: Option<String>,
    #[serde(default = "default_true")]
    pub caffeine_free: bool,
    #[validate(range(min = 0.0, message = "Price must be zero or greater"))]
    pub price: f64,
    /// Image URL for the blend.
    pub image: Option<String>,
    /// e.g. "sleep", "stress", "digestive"
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Record for TeaBlend {
    const COLLECTION: &'static str = "teablend";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_payload_gets_defaults() {
        let blend: TeaBlend =
            serde_json::from_value(json!({ "name": "Calm Chamomile", "price": 8.5 })).unwrap();

        assert!(blend.caffeine_free);
        assert!(blend.ingredients.is_empty());
        assert!(blend.tags.is_empty());
        assert!(blend.description.is_none());
        assert!(blend.validate().is_ok());
    }

    #[test]
    fn negative_price_fails_validation() {
        let blend: TeaBlend =
            serde_json::from_value(json!({ "name": "Bad Deal", "price": -5 })).unwrap();

        let errors = blend.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn free_blend_is_allowed() {
        let blend: TeaBlend =
            serde_json::from_value(json!({ "name": "Sample", "price": 0 })).unwrap();
        assert!(blend.validate().is_ok());
    }

    #[test]
    fn missing_price_is_rejected_by_deserialization() {
        let result = serde_json::from_value::<TeaBlend>(json!({ "name": "No Price" }));
        assert!(result.is_err());
    }
}

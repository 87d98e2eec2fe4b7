use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Testimonial {
    /// Customer first name.
    pub name: String,
    pub quote: String,
    /// Blend they enjoyed.
    pub blend: Option<String>,
    /// Star rating. Omitted means 5; an explicit `null` is kept as no rating.
    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
}

fn default_rating() -> Option<i32> {
    Some(5)
}

impl Record for Testimonial {
    const COLLECTION: &'static str = "testimonial";
}

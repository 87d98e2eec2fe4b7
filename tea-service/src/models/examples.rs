//! Reference schemas kept for the database viewer. No endpoint reads or
//! writes these collections.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::default_true;
use crate::services::store::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    pub age: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for User {
    const COLLECTION: &'static str = "user";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be zero or greater"))]
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Record for Product {
    const COLLECTION: &'static str = "product";
}

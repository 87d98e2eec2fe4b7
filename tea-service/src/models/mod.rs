//! Schema models. Each type is one collection; fields are validated at the
//! API boundary and stored as-is.

pub mod examples;
pub mod subscriber;
pub mod tea_blend;
pub mod testimonial;

pub use examples::{Product, User};
pub use subscriber::Subscriber;
pub use tea_blend::TeaBlend;
pub use testimonial::Testimonial;

use crate::services::store::Record;

/// Collections exposed through the API, in the order `/schema` lists them.
pub const API_COLLECTIONS: [&str; 3] = [
    TeaBlend::COLLECTION,
    Testimonial::COLLECTION,
    Subscriber::COLLECTION,
];

pub(crate) fn default_true() -> bool {
    true
}

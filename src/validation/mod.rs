//! Option validation.
//!
//! Every operation has a static schema ([`schema`]) describing its fields.
//! [`validate`] checks caller options against that schema before anything
//! touches the network.

mod error;
mod rules;
mod schema;
mod validator;


pub use error::ValidationError;
pub use rules::{Field, MOBILE_MESSAGE, Rule, SPLIT_TYPES, is_email, is_mobile, is_url};
pub use schema::schema;
pub use validator::validate;

//! Field rules and the format checks behind them.

use std::sync::LazyLock;

use regex::Regex;

/// Message reported for malformed mobile numbers.
pub const MOBILE_MESSAGE: &str = "Phone number must be 10 digits and start with 09 or 07";

/// Accepted values for `split_type`.
pub const SPLIT_TYPES: &[&str] = &["percentage", "flat"];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[79]\d{8}$").expect("mobile pattern is valid"));

/// What a single field must look like.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// A string. JSON numbers are accepted and converted to strings.
    Text,
    /// A string holding an email address.
    Email,
    /// A string holding an absolute http(s) URL.
    Url,
    /// A string holding a local mobile number (`0[79]XXXXXXXX`).
    Mobile,
    /// A JSON number. Numeric strings are rejected.
    Number,
    /// A string from a fixed set.
    OneOf(&'static [&'static str]),
    /// An object validated against nested fields. Undeclared keys are kept.
    Object(&'static [Field]),
    /// An array whose elements are objects validated against nested fields.
    List {
        /// Fields of each element.
        item: &'static [Field],
        /// Minimum number of elements.
        min: usize,
    },
    /// Anything; only presence is checked.
    Any,
}

/// A named field in an options schema.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Key in the options object.
    pub name: &'static str,
    /// Shape the value must have.
    pub rule: Rule,
    /// Whether the field must be present, non-null and non-empty.
    pub required: bool,
}

impl Field {
    /// A field that must be present.
    #[must_use]
    pub const fn required(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            rule,
            required: true,
        }
    }

    /// A field that may be absent or null.
    #[must_use]
    pub const fn optional(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            rule,
            required: false,
        }
    }
}

/// Returns true if `value` looks like an email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Returns true if `value` is a local mobile number.
#[must_use]
pub fn is_mobile(value: &str) -> bool {
    MOBILE.is_match(value)
}

/// Returns true if `value` is an absolute http(s) URL with a host.
#[must_use]
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value)
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}

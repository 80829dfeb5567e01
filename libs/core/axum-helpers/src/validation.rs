//! Request-scoped field validation.
//!
//! A [`Validator`] collects at most one message per field. Checks run in
//! order and the first failing check for a field is the one reported, so
//! rules are written from the most basic ("must be provided") to the most
//! specific.
//!
//! ```
//! use axum_helpers::validation::Validator;
//!
//! let name = "ab";
//! let mut v = Validator::new();
//! v.check(!name.is_empty(), "name", "must be provided");
//! v.check(name.len() >= 3, "name", "must be at least 3 bytes long");
//! v.check(name.len() <= 30, "name", "must not be more than 30 bytes long");
//!
//! assert!(!v.valid());
//! assert_eq!(v.errors()["name"], "must be at least 3 bytes long");
//! ```

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::ValidateUrl;

/// Field name to message, ordered by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Conventional HTML5 e-mail pattern.
pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Accumulates validation failures for one request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no error has been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records `message` for `key` unless the field already has an error.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_insert_with(|| message.into());
    }

    /// Records `message` for `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Input types that know their own field rules.
pub trait Validate {
    fn validate(&self, v: &mut Validator);
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// Absolute URL with a scheme and host, as accepted by the `validator` crate.
pub fn is_url(value: &str) -> bool {
    value.validate_url()
}

pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

//! Query string decoding.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

use crate::errors::AppError;
use crate::validation::Validator;

/// Raw query parameters; the first value wins when a key repeats.
///
/// Typed reads go through [`QueryParams::read_int`] and
/// [`QueryParams::read_string`], which fall back to a default instead of
/// failing the request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = HashMap::new();
        for (k, v) in pairs {
            map.entry(k.into()).or_insert_with(|| v.into());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// `default` when the key is missing or empty.
    pub fn read_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => default.to_string(),
        }
    }

    /// `default` when the key is missing or empty. A value that is not a
    /// positive integer records "must be a positive integer value" for `key`
    /// and also yields `default`. Upper bounds are left to the caller.
    pub fn read_int(&self, key: &str, default: i64, v: &mut Validator) -> i64 {
        let s = match self.get(key) {
            Some(s) if !s.is_empty() => s,
            _ => return default,
        };

        match s.parse::<i64>() {
            Ok(n) if n > 0 => n,
            _ => {
                v.add_error(key, "must be a positive integer value");
                default
            }
        }
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(format!("invalid query string: {}", e.body_text())))?;
        Ok(Self::from_pairs(pairs))
    }
}

//! Bounded JSON body decoding.
//!
//! [`read_json`] reads at most [`MAX_BODY_BYTES`] and decodes exactly one
//! JSON value into `T`. Every failure maps to a [`BodyError`] whose message
//! is sent to the client unchanged.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

use crate::errors::AppError;
use crate::validation::{Validate, Validator};

/// Largest accepted request body (1 MiB).
pub const MAX_BODY_BYTES: usize = 1_048_576;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: usize },

    #[error("body contains incorrect JSON type for field \"{field}\"")]
    FieldType { field: String },

    #[error("body contains incorrect JSON type (at character {offset})")]
    Type { offset: usize },

    #[error("body contains badly-formed JSON")]
    Truncated,

    #[error("body must not be empty")]
    Empty,

    #[error("body contains unknown key {0}")]
    UnknownKey(String),

    #[error("body must only contain a single JSON value")]
    TrailingData,

    #[error("body could not be read")]
    Read,
}

impl From<BodyError> for AppError {
    fn from(err: BodyError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Reads the whole body, failing once it grows past [`MAX_BODY_BYTES`].
pub async fn read_body(body: Body) -> Result<Bytes, BodyError> {
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyError::TooLarge {
            limit: MAX_BODY_BYTES,
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read request body");
            Err(BodyError::Read)
        }
    }
}

/// Decodes one JSON value from `bytes`. Unknown keys are only rejected when
/// `T` is declared with `#[serde(deny_unknown_fields)]`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BodyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyError::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| {
        let path = err.path().to_string();
        classify(bytes, &path, err.into_inner())
    })?;

    de.end().map_err(|_| BodyError::TrailingData)?;
    Ok(value)
}

/// [`read_body`] followed by [`decode_json`].
pub async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T, BodyError> {
    let bytes = read_body(body).await?;
    decode_json(&bytes)
}

fn classify(bytes: &[u8], path: &str, err: serde_json::Error) -> BodyError {
    match err.classify() {
        Category::Eof => BodyError::Truncated,
        Category::Syntax => BodyError::Syntax {
            offset: offset_of(bytes, err.line(), err.column()),
        },
        Category::Data => {
            let message = err.to_string();
            if let Some(key) = unknown_field(&message) {
                BodyError::UnknownKey(format!("\"{}\"", key))
            } else if path != "." && !path.is_empty() {
                BodyError::FieldType {
                    field: path.to_string(),
                }
            } else {
                BodyError::Type {
                    offset: offset_of(bytes, err.line(), err.column()),
                }
            }
        }
        Category::Io => BodyError::Read,
    }
}

/// Pulls `x` out of serde's "unknown field `x`, expected ..." message.
fn unknown_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("unknown field `")?;
    rest.split('`').next()
}

/// Converts serde_json's 1-based line/column into a byte offset from the
/// start of the body.
fn offset_of(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    line_start + column
}

/// JSON body extractor that decodes with [`read_json`] and then runs the
/// type's [`Validate`] rules.
///
/// Decoding failures are rejected with 400 and the decoder's message; rule
/// failures with 422 and one message per field.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> ... { }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let data: T = read_json(req.into_body()).await?;

        let mut v = Validator::new();
        data.validate(&mut v);
        if !v.valid() {
            return Err(AppError::FailedValidation(v.into_errors()));
        }

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Input {
        name: Option<String>,
        price: Option<i32>,
    }

    fn decode(body: &str) -> Result<Input, BodyError> {
        decode_json(body.as_bytes())
    }

    #[test]
    fn test_decodes_valid_object() {
        let input = decode(r#"{"name":"Lamp","price":20}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Lamp"));
        assert_eq!(input.price, Some(20));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(decode("").unwrap_err(), BodyError::Empty);
        assert_eq!(decode("  \n").unwrap_err(), BodyError::Empty);
        assert_eq!(BodyError::Empty.to_string(), "body must not be empty");
    }

    #[test]
    fn test_syntax_error_reports_offset() {
        let err = decode(r#"{"name": "Lamp",}"#).unwrap_err();
        assert!(matches!(err, BodyError::Syntax { .. }));
        assert!(
            err.to_string()
                .starts_with("body contains badly-formed JSON (at character ")
        );
    }

    #[test]
    fn test_offset_counts_previous_lines() {
        assert_eq!(offset_of(b"{\n  x", 2, 3), 5);
        assert_eq!(offset_of(b"{x", 1, 2), 2);
    }

    #[test]
    fn test_truncated_body() {
        let err = decode(r#"{"name": "La"#).unwrap_err();
        assert_eq!(err, BodyError::Truncated);
        assert_eq!(err.to_string(), "body contains badly-formed JSON");
    }

    #[test]
    fn test_wrong_type_for_field_names_the_field() {
        let err = decode(r#"{"price": "ten"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "body contains incorrect JSON type for field \"price\""
        );
    }

    #[test]
    fn test_wrong_top_level_type() {
        let err = decode(r#""lamp""#).unwrap_err();
        assert!(matches!(err, BodyError::Type { .. }));
        assert!(
            err.to_string()
                .starts_with("body contains incorrect JSON type (at character ")
        );
    }

    #[test]
    fn test_unknown_key_is_quoted() {
        let err = decode(r#"{"name": "Lamp", "colour": "red"}"#).unwrap_err();
        assert_eq!(err.to_string(), "body contains unknown key \"colour\"");
    }

    #[test]
    fn test_trailing_value_rejected() {
        let err = decode(r#"{"name": "Lamp"} {"name": "Desk"}"#).unwrap_err();
        assert_eq!(err, BodyError::TrailingData);
    }

    #[test]
    fn test_trailing_whitespace_accepted() {
        assert!(decode("{}\n\n").is_ok());
    }

    #[tokio::test]
    async fn test_body_over_limit_is_rejected() {
        let big = format!(r#"{{"name": "{}"}}"#, "a".repeat(MAX_BODY_BYTES));
        let err = read_json::<Input>(Body::from(big)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "body must not be larger than 1048576 bytes"
        );
    }

    #[tokio::test]
    async fn test_body_at_limit_is_read() {
        let body = vec![b' '; MAX_BODY_BYTES];
        let bytes = read_body(Body::from(body)).await.unwrap();
        assert_eq!(bytes.len(), MAX_BODY_BYTES);
    }

    #[test]
    fn test_body_error_maps_to_bad_request() {
        let err: AppError = BodyError::UnknownKey("\"x\"".into()).into();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "body contains unknown key \"x\""));
    }
}

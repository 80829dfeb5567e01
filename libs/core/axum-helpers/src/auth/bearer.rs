use axum::http::{HeaderMap, header};

/// The `Authorization` header is present but is not `Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedAuthorization;

/// Token from an `Authorization: Bearer <token>` header.
///
/// `Ok(None)` when the header is absent.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, MalformedAuthorization> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| MalformedAuthorization)?;
    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(Some(token)),
        _ => Err(MalformedAuthorization),
    }
}

//! JSON response writer.
//!
//! Every body the API sends, errors included, goes through [`encode_json`]:
//! tab-indented JSON followed by a newline, served as `application/json`.

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use utoipa::ToSchema;

/// Body used when the payload itself cannot be serialized.
const ENCODE_FAILURE_BODY: &str = "{\n\t\"code\": 1100,\n\t\"error\": \"INTERNAL_ERROR\",\n\t\"message\": \"the server encountered a problem and could not process your request\"\n}\n";

/// Serializes `value` as tab-indented JSON with a trailing newline.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// A status code, optional extra headers and a serializable payload.
///
/// ```ignore
/// JsonResponse::created(ProductEnvelope { product })
///     .with_header(header::LOCATION, format!("/v1/products/{}", id))
/// ```
#[derive(Debug)]
pub struct JsonResponse<T> {
    status: StatusCode,
    headers: HeaderMap,
    body: T,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    /// Adds a header; values that are not valid header text are skipped.
    pub fn with_header(mut self, name: HeaderName, value: impl AsRef<str>) -> Self {
        match HeaderValue::from_str(value.as_ref()) {
            Ok(value) => {
                self.headers.append(name, value);
            }
            Err(_) => tracing::warn!(header = %name, "Dropping invalid response header value"),
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &T {
        &self.body
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        let bytes = match encode_json(&self.body) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode JSON response");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(header::CONTENT_TYPE, "application/json")],
                    ENCODE_FAILURE_BODY,
                )
                    .into_response();
            }
        };

        let mut response = (self.status, bytes).into_response();
        let headers = response.headers_mut();
        headers.extend(self.headers);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, serde::Deserialize, ToSchema)]
pub struct MessageEnvelope {
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

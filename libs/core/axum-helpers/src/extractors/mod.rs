//! Custom extractors for Axum handlers.

pub mod id_path;
pub mod json_body;
pub mod query;

pub use id_path::{IdPath, parse_id};
pub use json_body::{BodyError, MAX_BODY_BYTES, ValidatedJson, decode_json, read_body, read_json};
pub use query::QueryParams;

//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1100,
        "error": "INTERNAL_ERROR",
        "message": "the server encountered a problem and could not process your request"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Body could not be decoded",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "MALFORMED_REQUEST",
        "message": "body contains badly-formed JSON (at character 14)"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Validation failed",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "product_name": "must be at least 3 bytes long",
            "product_price": "must be greater than zero"
        }
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "the requested resource could not be found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - Authentication required",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "UNAUTHORIZED",
        "message": "invalid or missing authentication token"
    })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Not Implemented",
    content_type = "application/json",
    example = json!({
        "code": 1101,
        "error": "NOT_IMPLEMENTED",
        "message": "this endpoint is not implemented yet"
    })
)]
pub struct NotImplementedResponse(pub ErrorResponse);

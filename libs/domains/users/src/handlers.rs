use axum::{Router, extract::State, routing::{get, post}};
use axum_helpers::{
    AppError, JsonResponse, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, UnauthorizedResponse,
        ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth::CurrentUser;
use crate::models::{LoginInput, SignupInput, TokenEnvelope, User, UserEnvelope};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(signup, login, me),
    components(
        schemas(User, SignupInput, LoginInput, UserEnvelope, TokenEnvelope),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Accounts and authentication")
    )
)]
pub struct ApiDoc;

/// Account routes, mounted at `/users`.
///
/// `/me` reads the identity set by [`crate::auth::authenticate`], so the
/// router must sit behind that middleware.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    tag = TAG,
    request_body = SignupInput,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signup<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<SignupInput>,
) -> Result<JsonResponse<UserEnvelope>, AppError> {
    let user = service.signup(input).await?;
    Ok(JsonResponse::created(UserEnvelope { user }))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginInput,
    responses(
        (status = 200, description = "Token issued", body = TokenEnvelope),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> Result<JsonResponse<TokenEnvelope>, AppError> {
    let authentication_token = service.login(input).await?;
    Ok(JsonResponse::ok(TokenEnvelope {
        authentication_token,
    }))
}

/// The authenticated user
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserEnvelope),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn me(CurrentUser(user): CurrentUser) -> JsonResponse<UserEnvelope> {
    JsonResponse::ok(UserEnvelope { user })
}

use axum::{
    Router,
    extract::State,
    routing::{delete, get, post},
};
use axum_helpers::{
    AppError, IdPath, JsonResponse, MessageEnvelope, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        NotImplementedResponse, UnauthorizedResponse, ValidationErrorResponse,
    },
};
use domain_products::ProductRepository;
use domain_users::CurrentUser;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{AddCartItem, CartEnvelope, CartItem, CartItemEnvelope};
use crate::repository::CartRepository;
use crate::service::CartService;

pub const TAG: &str = "cart";

type SharedService<R, P> = Arc<CartService<R, P>>;

/// OpenAPI documentation for the cart endpoints
#[derive(OpenApi)]
#[openapi(
    paths(list_cart, add_item, remove_item, checkout, instant_buy),
    components(
        schemas(CartItem, AddCartItem, CartEnvelope, CartItemEnvelope, MessageEnvelope),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ValidationErrorResponse,
            NotImplementedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Shopping cart of the authenticated user")
    )
)]
pub struct ApiDoc;

/// Cart routes, mounted at `/cart` behind the authenticate middleware.
pub fn router<R, P>(service: CartService<R, P>) -> Router
where
    R: CartRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_cart))
        .route("/items", post(add_item))
        .route("/items/{product_id}", delete(remove_item))
        .route("/checkout", post(checkout))
        .route("/instant-buy", post(instant_buy))
        .with_state(shared_service)
}

/// List the items in the caller's cart
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart items, oldest first", body = CartEnvelope),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_cart<R: CartRepository, P: ProductRepository>(
    State(service): State<SharedService<R, P>>,
    CurrentUser(user): CurrentUser,
) -> Result<JsonResponse<CartEnvelope>, AppError> {
    let cart = service.list(user.id).await?;
    Ok(JsonResponse::ok(CartEnvelope { cart }))
}

/// Add a product, or change its quantity if it is already in the cart
#[utoipa::path(
    post,
    path = "/items",
    tag = TAG,
    security(("bearer_auth" = [])),
    request_body = AddCartItem,
    responses(
        (status = 200, description = "Cart line after the change", body = CartItemEnvelope),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_item<R: CartRepository, P: ProductRepository>(
    State(service): State<SharedService<R, P>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(input): ValidatedJson<AddCartItem>,
) -> Result<JsonResponse<CartItemEnvelope>, AppError> {
    let cart_item = service.add_item(user.id, input).await?;
    Ok(JsonResponse::ok(CartItemEnvelope { cart_item }))
}

/// Remove a product from the cart
#[utoipa::path(
    delete,
    path = "/items/{product_id}",
    tag = TAG,
    security(("bearer_auth" = [])),
    params(
        ("product_id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Item removed", body = MessageEnvelope),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_item<R: CartRepository, P: ProductRepository>(
    State(service): State<SharedService<R, P>>,
    CurrentUser(user): CurrentUser,
    IdPath(product_id): IdPath,
) -> Result<JsonResponse<MessageEnvelope>, AppError> {
    service.remove_item(user.id, product_id).await?;
    Ok(JsonResponse::ok(MessageEnvelope::new(
        "item successfully removed from cart",
    )))
}

/// Check out the cart (not implemented)
#[utoipa::path(
    post,
    path = "/checkout",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 401, response = UnauthorizedResponse),
        (status = 501, response = NotImplementedResponse)
    )
)]
async fn checkout<R: CartRepository, P: ProductRepository>(
    State(service): State<SharedService<R, P>>,
    CurrentUser(user): CurrentUser,
) -> Result<JsonResponse<MessageEnvelope>, AppError> {
    service.checkout(user.id).await?;
    Ok(JsonResponse::ok(MessageEnvelope::new("order placed")))
}

/// Buy a single product immediately (not implemented)
#[utoipa::path(
    post,
    path = "/instant-buy",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 401, response = UnauthorizedResponse),
        (status = 501, response = NotImplementedResponse)
    )
)]
async fn instant_buy<R: CartRepository, P: ProductRepository>(
    State(service): State<SharedService<R, P>>,
    CurrentUser(user): CurrentUser,
) -> Result<JsonResponse<MessageEnvelope>, AppError> {
    service.instant_buy(user.id).await?;
    Ok(JsonResponse::ok(MessageEnvelope::new("order placed")))
}

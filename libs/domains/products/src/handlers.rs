use axum::{
    Router,
    extract::State,
    http::header,
    routing::{delete, get, post},
};
use axum_helpers::{
    AppError, IdPath, JsonResponse, MessageEnvelope, QueryParams, ValidatedJson, Validator,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
        ValidationErrorResponse,
    },
    server::API_PREFIX,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::filters::{Filters, Metadata, validate_filters};
use crate::models::{
    CreateProduct, DEFAULT_MAX_PRICE, PRODUCT_SORT_SAFE_LIST, Product, ProductEnvelope,
    ProductListEnvelope,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";
pub const ADMIN_TAG: &str = "admin";

/// OpenAPI documentation for the public product endpoints
#[derive(OpenApi)]
#[openapi(
    paths(search_products, get_product),
    components(
        schemas(Product, ProductEnvelope, ProductListEnvelope, Metadata),
        responses(NotFoundResponse, ValidationErrorResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for product administration
#[derive(OpenApi)]
#[openapi(
    paths(create_product, delete_product),
    components(
        schemas(CreateProduct, ProductEnvelope, MessageEnvelope),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ADMIN_TAG, description = "Product administration")
    )
)]
pub struct AdminApiDoc;

/// Public catalog routes, mounted at `/products`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/search", get(search_products))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// Admin routes, mounted at `/admin/products`
pub fn admin_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_product))
        .route("/{id}", delete(delete_product))
        .with_state(shared_service)
}

/// Search products by name and maximum price
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(
        ("product_name" = Option<String>, Query, description = "Case-insensitive name fragment"),
        ("price" = Option<i64>, Query, description = "Inclusive price ceiling"),
        ("page" = Option<i64>, Query, description = "1 to 10000000, default 1"),
        ("page_size" = Option<i64>, Query, description = "1 to 100, default 20"),
        ("sort" = Option<String>, Query, description = "id, name, price or rating, `-` prefix for descending")
    ),
    responses(
        (status = 200, description = "One page of matching products", body = ProductListEnvelope),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    qs: QueryParams,
) -> Result<JsonResponse<ProductListEnvelope>, AppError> {
    let mut v = Validator::new();

    let name = qs.read_string("product_name", "");
    let max_price = qs.read_int("price", DEFAULT_MAX_PRICE, &mut v);
    let filters = Filters {
        page: qs.read_int("page", 1, &mut v),
        page_size: qs.read_int("page_size", 20, &mut v),
        sort: qs.read_string("sort", "id"),
        sort_safe_list: PRODUCT_SORT_SAFE_LIST,
    };

    validate_filters(&mut v, &filters);
    if !v.valid() {
        return Err(AppError::FailedValidation(v.into_errors()));
    }

    let (products, metadata) = service.get_all(&name, max_price, filters).await?;
    Ok(JsonResponse::ok(ProductListEnvelope { products, metadata }))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<JsonResponse<ProductEnvelope>, AppError> {
    let product = service.get_product(id).await?;
    Ok(JsonResponse::ok(ProductEnvelope { product }))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = ADMIN_TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ProductEnvelope,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<JsonResponse<ProductEnvelope>, AppError> {
    let product = service.create_product(input).await?;
    let location = format!("{}/products/{}", API_PREFIX, product.id);

    Ok(JsonResponse::created(ProductEnvelope { product }).with_header(header::LOCATION, location))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageEnvelope),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<JsonResponse<MessageEnvelope>, AppError> {
    service.delete_product(id).await?;
    Ok(JsonResponse::ok(MessageEnvelope::new(
        "product successfully deleted",
    )))
}

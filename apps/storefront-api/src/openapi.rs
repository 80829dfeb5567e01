//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme referenced by authenticated routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Combined OpenAPI documentation for the Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Accounts, product catalog search, cart and product administration",
        license(name = "MIT")
    ),
    servers(
        (url = "/v1", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/admin/products", api = domain_products::AdminApiDoc),
        (path = "/cart", api = domain_cart::ApiDoc)
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_nested_per_domain() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/users/signup",
            "/users/login",
            "/users/me",
            "/products/search",
            "/products/{id}",
            "/admin/products",
            "/admin/products/{id}",
            "/cart",
            "/cart/items",
            "/cart/items/{product_id}",
            "/cart/checkout",
            "/cart/instant-buy",
        ] {
            assert!(paths.contains(&expected), "missing {expected}: {paths:?}");
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}

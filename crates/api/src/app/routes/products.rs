//! Product catalog endpoints.
//!
//! Reads are public; every mutation sits behind the auth middleware and an
//! admin check.

use std::sync::Arc;

use axum::extract::{Extension, Json, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use chrono::Utc;

use casecraft_core::ProductId;
use casecraft_products::{NewProduct, Product, ProductFilter, ProductPatch};

use crate::app::dto::{
    CreateProductRequest, ListProductsQuery, ProductResponse, UpdateProductRequest,
};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::PrincipalContext;
use crate::middleware::{AuthState, auth_middleware};

pub fn router(auth_state: AuthState) -> Router {
    let mutations = Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
        .route_layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .merge(mutations)
}

async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListProductsQuery>,
) -> Response {
    let defaults = ProductFilter::default();
    let filter = ProductFilter {
        category: query.category,
        skip: query.skip.unwrap_or(defaults.skip),
        limit: query.limit.unwrap_or(defaults.limit),
    };

    match services.products.list(&filter).await {
        Ok(items) => {
            let body: Vec<ProductResponse> = items.iter().map(ProductResponse::from).collect();
            Json(body).into_response()
        }
        Err(err) => errors::store_error_to_response(&err),
    }
}

async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match services.products.get(id).await {
        Ok(Some(product)) => Json(ProductResponse::from(&product)).into_response(),
        Ok(None) => not_found(),
        Err(err) => errors::store_error_to_response(&err),
    }
}

async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<CreateProductRequest>,
) -> Response {
    if let Err(response) = authz::require_admin(&ctx) {
        return response;
    }

    let new: NewProduct = body.into();
    if let Err(err) = new.validate() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string());
    }

    let product = Product::create(new, Utc::now());
    if let Err(err) = services.products.insert(&product).await {
        return errors::store_error_to_response(&err);
    }

    tracing::info!(product_id = %product.id, actor = %ctx.username(), "product created");
    (StatusCode::CREATED, Json(ProductResponse::from(&product))).into_response()
}

async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Response {
    if let Err(response) = authz::require_admin(&ctx) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let patch: ProductPatch = body.into();
    if let Err(err) = patch.validate() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string());
    }

    let mut product = match services.products.get(id).await {
        Ok(Some(product)) => product,
        Ok(None) => return not_found(),
        Err(err) => return errors::store_error_to_response(&err),
    };

    patch.apply(&mut product, Utc::now());
    if let Err(err) = services.products.update(&product).await {
        return errors::store_error_to_response(&err);
    }

    tracing::info!(product_id = %product.id, actor = %ctx.username(), "product updated");
    Json(ProductResponse::from(&product)).into_response()
}

async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = authz::require_admin(&ctx) {
        return response;
    }

    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    // Fetch first so the deleted row can be echoed back.
    let product = match services.products.get(id).await {
        Ok(Some(product)) => product,
        Ok(None) => return not_found(),
        Err(err) => return errors::store_error_to_response(&err),
    };

    match services.products.delete(id).await {
        Ok(true) => {
            tracing::info!(product_id = %product.id, actor = %ctx.username(), "product deleted");
            Json(ProductResponse::from(&product)).into_response()
        }
        Ok(false) => not_found(),
        Err(err) => errors::store_error_to_response(&err),
    }
}

fn parse_id(raw: &str) -> Result<ProductId, Response> {
    raw.parse::<ProductId>().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

fn not_found() -> Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
}

use super::model::{ProductRequest, ProductResponse};
use super::service::ProductService;
use crate::error::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

pub const BASE_PATH: &str = "/api/product";

/// `POST /api/product` and `GET /api/product`.
pub fn router(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(BASE_PATH, get(list).post(create))
        .with_state(service)
}

async fn create(
    State(service): State<Arc<ProductService>>,
    Json(req): Json<ProductRequest>,
) -> Result<StatusCode> {
    service.create_product(req).await?;
    Ok(StatusCode::CREATED)
}

async fn list(State(service): State<Arc<ProductService>>) -> Result<Json<Vec<ProductResponse>>> {
    Ok(Json(service.get_all_products().await?))
}

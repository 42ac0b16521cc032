//! 产品处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Product, ProductPayload};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::infrastructure::{Record, Stored};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, CoreError> {
    Ok(Json(state.products.list().await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, CoreError> {
    Ok(Json(state.products.get(&id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored<Product>>), CoreError> {
    let Json(payload) = payload?;
    let product = state.products.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Stored<Product>>, CoreError> {
    let Json(payload) = payload?;
    Ok(Json(state.products.replace(&id, payload).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.products.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! 客户处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Customer, CustomerPayload};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::infrastructure::{Record, Stored};

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, CoreError> {
    Ok(Json(state.customers.list().await?))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, CoreError> {
    Ok(Json(state.customers.get(&id).await?))
}

pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored<Customer>>), CoreError> {
    let Json(payload) = payload?;
    let customer = state.customers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<Stored<Customer>>, CoreError> {
    let Json(payload) = payload?;
    Ok(Json(state.customers.replace(&id, payload).await?))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.customers.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

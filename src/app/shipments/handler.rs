//! 发货单处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{Shipment, ShipmentPayload, ShipmentView};
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::infrastructure::Stored;

pub async fn list_shipments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShipmentView>>, CoreError> {
    Ok(Json(state.shipments.list().await?))
}

pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShipmentView>, CoreError> {
    Ok(Json(state.shipments.get(&id).await?))
}

pub async fn create_shipment(
    State(state): State<AppState>,
    payload: Result<Json<ShipmentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Stored<Shipment>>), CoreError> {
    let Json(payload) = payload?;
    let shipment = state.shipments.create(payload).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShipmentPayload>, JsonRejection>,
) -> Result<Json<Stored<Shipment>>, CoreError> {
    let Json(payload) = payload?;
    Ok(Json(state.shipments.replace(&id, payload).await?))
}

pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.shipments.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

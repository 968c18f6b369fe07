// src/handlers/inventario.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventario::{ActualizarInventario, InventarioNuevo},
};

pub async fn listar_inventario(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventario_service.listar().await?;
    Ok(Json(items))
}

pub async fn crear_item(
    State(app_state): State<AppState>,
    Json(payload): Json<InventarioNuevo>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let item = app_state.inventario_service.crear(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Convenio creado correctamente",
            "convenio": item,
        })),
    ))
}

pub async fn actualizar_item(
    State(app_state): State<AppState>,
    Json(payload): Json<ActualizarInventario>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let id = payload.id.unwrap_or_default();

    app_state.inventario_service.actualizar(id, &payload).await?;

    Ok(Json(json!({ "message": "Inventario actualizado correctamente" })))
}

#[derive(Debug, Deserialize)]
pub struct IdItemParams {
    pub id: Option<i32>,
}

pub async fn eliminar_item(
    State(app_state): State<AppState>,
    Query(params): Query<IdItemParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Falta el parámetro 'id'".to_string()))?;

    app_state.inventario_service.eliminar(id).await?;

    Ok(Json(json!({ "message": "Inventario eliminado correctamente" })))
}

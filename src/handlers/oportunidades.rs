// src/handlers/oportunidades.rs

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
    models::oportunidad::{ActualizarOportunidad, OportunidadNueva},
};

pub async fn listar_oportunidades(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let oportunidades = app_state.oportunidad_service.listar().await?;
    Ok(Json(oportunidades))
}

pub async fn crear_oportunidad(
    State(app_state): State<AppState>,
    Json(payload): Json<OportunidadNueva>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let oportunidad = app_state.oportunidad_service.crear(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Oportunidad creada correctamente",
            "oportunidad": oportunidad,
        })),
    ))
}

pub async fn actualizar_oportunidad(
    State(app_state): State<AppState>,
    Json(payload): Json<ActualizarOportunidad>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let id = payload.id.unwrap_or_default();

    app_state
        .oportunidad_service
        .actualizar(id, &payload)
        .await?;

    Ok(Json(json!({ "message": "Oportunidad actualizada correctamente" })))
}

#[derive(Debug, Deserialize)]
pub struct IdOportunidadParams {
    pub id: Option<i32>,
}

pub async fn eliminar_oportunidad(
    State(app_state): State<AppState>,
    Query(params): Query<IdOportunidadParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Falta el parámetro 'id'".to_string()))?;

    app_state.oportunidad_service.eliminar(id).await?;

    Ok(Json(json!({ "message": "Oportunidad eliminada correctamente" })))
}

// src/handlers/convenios.rs

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
    models::convenio::{ActualizarConvenio, ConvenioNuevo},
};

pub async fn listar_convenios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lista = app_state.convenio_service.listar().await?;
    Ok(Json(lista))
}

pub async fn crear_convenio(
    State(app_state): State<AppState>,
    Json(payload): Json<ConvenioNuevo>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Los required de arriba garantizan que estos Option vienen llenos.
    let cooperante = payload.cooperante.unwrap_or_default();
    let nombre = payload.nombre.unwrap_or_default();
    let sector = payload.sector.map(|s| s.etiqueta().to_string()).unwrap_or_default();

    let convenio = app_state
        .convenio_service
        .crear(
            &cooperante,
            &nombre,
            &sector,
            payload.fase_actual.as_deref(),
            payload.firmado,
            payload.consecutivo_numerico,
            payload.fecha_inicio,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Convenio agregado correctamente",
            "convenio": convenio,
        })),
    ))
}

pub async fn actualizar_convenio(
    State(app_state): State<AppState>,
    Json(payload): Json<ActualizarConvenio>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let id = payload.id.unwrap_or_default();

    app_state.convenio_service.actualizar(id, &payload).await?;

    Ok(Json(json!({ "message": "Convenio actualizado correctamente" })))
}

#[derive(Debug, Deserialize)]
pub struct IdConvenioParams {
    pub id: Option<i32>,
}

pub async fn eliminar_convenio(
    State(app_state): State<AppState>,
    Query(params): Query<IdConvenioParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("ID del convenio es obligatorio".to_string()))?;

    app_state.convenio_service.eliminar(id).await?;

    Ok(Json(json!({ "message": "Convenio eliminado correctamente" })))
}

#[derive(Debug, Deserialize)]
pub struct ConsecutivoParams {
    pub consecutivo: Option<i32>,
}

pub async fn check_consecutivo(
    State(app_state): State<AppState>,
    Query(params): Query<ConsecutivoParams>,
) -> Result<impl IntoResponse, AppError> {
    let consecutivo = params
        .consecutivo
        .ok_or_else(|| AppError::BadRequest("Falta el número de consecutivo".to_string()))?;

    let existe = app_state
        .convenio_service
        .existe_consecutivo(consecutivo)
        .await?;

    Ok(Json(json!({ "exists": existe })))
}

pub async fn max_consecutivo(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let max = app_state.convenio_service.max_consecutivo().await?;
    Ok(Json(json!({ "maxConsecutivo": max })))
}

// src/handlers/registros.rs

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
    models::registro::{ActualizarRegistro, RegistroNuevo},
};

#[derive(Debug, Deserialize)]
pub struct ListarRegistrosParams {
    pub convenio_id: Option<i32>,
}

pub async fn listar_registros(
    State(app_state): State<AppState>,
    Query(params): Query<ListarRegistrosParams>,
) -> Result<impl IntoResponse, AppError> {
    let registros = app_state
        .registro_service
        .listar(params.convenio_id)
        .await?;
    Ok(Json(registros))
}

pub async fn crear_registro(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistroNuevo>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let convenio_id = payload.convenio_id.unwrap_or_default();

    let registro = app_state
        .registro_service
        .crear(convenio_id, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Registro insertado y fase actualizada exitosamente",
            "registro": registro,
        })),
    ))
}

pub async fn actualizar_registro(
    State(app_state): State<AppState>,
    Json(payload): Json<ActualizarRegistro>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let id = payload.id.unwrap_or_default();

    app_state.registro_service.actualizar(id, &payload).await?;

    Ok(Json(json!({ "message": "Registro actualizado exitosamente" })))
}

#[derive(Debug, Deserialize)]
pub struct IdRegistroParams {
    pub id: Option<i32>,
}

pub async fn eliminar_registro(
    State(app_state): State<AppState>,
    Query(params): Query<IdRegistroParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("ID es requerido".to_string()))?;

    app_state.registro_service.eliminar(id).await?;

    Ok(Json(json!({ "message": "Registro eliminado exitosamente" })))
}

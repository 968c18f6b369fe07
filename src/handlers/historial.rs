// src/handlers/historial.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::registro::EventoNuevo};

#[derive(Debug, Deserialize)]
pub struct ListarHistorialParams {
    pub registro_proceso_id: Option<i32>,
}

pub async fn listar_historial(
    State(app_state): State<AppState>,
    Query(params): Query<ListarHistorialParams>,
) -> Result<impl IntoResponse, AppError> {
    let registro_proceso_id = params
        .registro_proceso_id
        .ok_or_else(|| AppError::BadRequest("registro_proceso_id es requerido".to_string()))?;

    let eventos = app_state
        .registro_service
        .listar_historial(registro_proceso_id)
        .await?;
    Ok(Json(eventos))
}

pub async fn agregar_evento(
    State(app_state): State<AppState>,
    Json(payload): Json<EventoNuevo>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let registro_proceso_id = payload.registro_proceso_id.unwrap_or_default();
    let evento = payload.evento.unwrap_or_default();
    let fecha = payload
        .fecha
        .ok_or_else(|| AppError::BadRequest("El campo 'fecha' es obligatorio.".to_string()))?;

    let evento = app_state
        .registro_service
        .agregar_evento(registro_proceso_id, &evento, fecha)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Evento agregado correctamente",
            "evento": evento,
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct IdEventoParams {
    pub id: Option<i32>,
}

pub async fn eliminar_evento(
    State(app_state): State<AppState>,
    Query(params): Query<IdEventoParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("ID es requerido".to_string()))?;

    app_state.registro_service.eliminar_evento(id).await?;

    Ok(Json(json!({ "message": "Evento eliminado correctamente" })))
}

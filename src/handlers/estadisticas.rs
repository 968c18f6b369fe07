// src/handlers/estadisticas.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState};

pub async fn resumen_convenios(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resumen = app_state.estadisticas_service.resumen_convenios().await?;
    Ok(Json(resumen))
}

pub async fn resumen_oportunidades(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resumen = app_state
        .estadisticas_service
        .resumen_oportunidades()
        .await?;
    Ok(Json(resumen))
}

// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUsuario, RegistroUsuario},
};

pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistroUsuario>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .registrar(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUsuario>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// El guard ya resolvió el usuario; solo se devuelve.
pub async fn me(AuthenticatedUser(usuario): AuthenticatedUser) -> impl IntoResponse {
    Json(usuario)
}

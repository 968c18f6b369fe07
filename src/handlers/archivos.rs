// src/handlers/archivos.rs

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, config::AppState, services::archivo_service::ArchivoService};

// Subida multipart con dos campos: "file" (el binario) e "id" (la fila a
// la que pertenece). Devuelve la URL relativa que el cliente persiste.
pub async fn subir_archivo(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut archivo: Option<(Option<String>, Vec<u8>)> = None;
    let mut id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let nombre_original = field.file_name().map(|n| n.to_string());
                let datos = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                archivo = Some((nombre_original, datos.to_vec()));
            }
            Some("id") => {
                id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let (nombre_original, datos) = archivo
        .ok_or_else(|| AppError::BadRequest("Archivo o ID faltante".to_string()))?;
    let id = id.ok_or_else(|| AppError::BadRequest("Archivo o ID faltante".to_string()))?;

    let url = app_state
        .archivo_service
        .guardar(&id, nombre_original.as_deref(), &datos)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "url": url }))))
}

#[derive(Debug, Deserialize)]
pub struct EliminarArchivoPayload {
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
}

pub async fn eliminar_archivo(
    State(app_state): State<AppState>,
    Json(payload): Json<EliminarArchivoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let nombre = payload
        .file_name
        .ok_or_else(|| AppError::BadRequest("Falta el nombre del archivo".to_string()))?;

    app_state.archivo_service.eliminar(&nombre).await?;

    Ok(Json(json!({ "message": "Archivo eliminado correctamente" })))
}

/// Sirve un documento subido, con el Content-Type según la extensión.
pub async fn descargar_archivo(
    State(app_state): State<AppState>,
    Path(archivo): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let datos = app_state.archivo_service.leer(&archivo).await?;
    let content_type = ArchivoService::content_type(&archivo);

    Ok(([(header::CONTENT_TYPE, content_type)], datos))
}

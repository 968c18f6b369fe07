// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Tipo de error de toda la aplicación. Los handlers devuelven
// Result<_, AppError> y la conversión a respuesta HTTP vive en un
// único lugar.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    // Parámetro de query ausente u otro dato de entrada inservible.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NoEncontrado(&'static str),

    #[error("Ya existe un convenio con el consecutivo {0}")]
    ConsecutivoDuplicado(i32),

    #[error("El correo ya está registrado")]
    EmailYaExiste,

    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    #[error("Usuario no encontrado")]
    UsuarioNoEncontrado,

    #[error("Archivo no encontrado")]
    ArchivoNoEncontrado,

    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Error de E/S")]
    IoError(#[from] std::io::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Cajón genérico para cualquier otro error inesperado.
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código HTTP con el que se reporta este error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NoEncontrado(_)
            | AppError::UsuarioNoEncontrado
            | AppError::ArchivoNoEncontrado => StatusCode::NOT_FOUND,
            AppError::ConsecutivoDuplicado(_) | AppError::EmailYaExiste => StatusCode::CONFLICT,
            AppError::CredencialesInvalidas | AppError::TokenInvalido => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // La validación devuelve el detalle campo por campo.
        if let AppError::ValidationError(errores) = &self {
            let mut detalles = std::collections::HashMap::new();
            for (campo, errores_campo) in errores.field_errors() {
                let mensajes: Vec<String> = errores_campo
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                detalles.insert(campo.to_string(), mensajes);
            }
            let body = Json(json!({
                "error": "Faltan campos obligatorios",
                "details": detalles,
            }));
            return (status, body).into_response();
        }

        let mensaje = match &self {
            AppError::BadRequest(msj) => msj.clone(),
            AppError::NoEncontrado(msj) => msj.to_string(),
            AppError::ConsecutivoDuplicado(n) => {
                format!("Ya existe un convenio con el consecutivo {}", n)
            }
            AppError::EmailYaExiste => "Este correo ya está en uso.".to_string(),
            AppError::CredencialesInvalidas => "Correo o contraseña inválidos.".to_string(),
            AppError::TokenInvalido => {
                "Token de autenticación inválido o ausente.".to_string()
            }
            AppError::UsuarioNoEncontrado => "Usuario no encontrado.".to_string(),
            AppError::ArchivoNoEncontrado => "Archivo no encontrado".to_string(),
            // El resto se enmascara: el detalle queda solo en el log.
            otro => {
                tracing::error!("Error interno del servidor: {otro}");
                "Ocurrió un error inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": mensaje }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "obligatorio"))]
        campo: String,
    }

    #[test]
    fn cada_familia_de_error_tiene_su_codigo() {
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NoEncontrado("Convenio no encontrado").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ConsecutivoDuplicado(12).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::TokenInvalido.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::ArchivoNoEncontrado.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn la_validacion_responde_400() {
        let errores = Payload { campo: String::new() }.validate().unwrap_err();
        let respuesta = AppError::ValidationError(errores).into_response();
        assert_eq!(respuesta.status(), StatusCode::BAD_REQUEST);
    }
}

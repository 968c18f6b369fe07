// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// Usuario del sistema, tal como viene de la base.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // nunca sale al alambre
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistroUsuario {
    #[validate(email(message = "El correo electrónico no es válido."))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUsuario {
    #[validate(email(message = "El correo electrónico no es válido."))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

// Respuesta de autenticación con el token emitido.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

// Claims dentro del JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // id del usuario
    pub exp: usize, // expiración
    pub iat: usize, // emisión
}

// src/handlers.rs

pub mod archivos;
pub mod auth;
pub mod convenios;
pub mod estadisticas;
pub mod historial;
pub mod inventario;
pub mod oportunidades;
pub mod registros;

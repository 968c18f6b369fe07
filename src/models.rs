pub mod auth;
pub mod convenio;
pub mod estadisticas;
pub mod fase;
pub mod inventario;
pub mod oportunidad;
pub mod registro;

pub mod archivo_service;
pub mod auth;
pub mod convenio_service;
pub mod estadisticas_service;
pub mod inventario_service;
pub mod oportunidad_service;
pub mod registro_service;

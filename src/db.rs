pub mod convenio_repo;
pub use convenio_repo::ConvenioRepository;
pub mod registro_repo;
pub use registro_repo::RegistroRepository;
pub mod inventario_repo;
pub use inventario_repo::InventarioRepository;
pub mod oportunidad_repo;
pub use oportunidad_repo::OportunidadRepository;
pub mod estadisticas_repo;
pub use estadisticas_repo::EstadisticasRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

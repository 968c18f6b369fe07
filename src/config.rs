// src/config.rs

use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{
    db::{
        ConvenioRepository, EstadisticasRepository, InventarioRepository, OportunidadRepository,
        RegistroRepository, UserRepository,
    },
    services::{
        archivo_service::ArchivoService, auth::AuthService, convenio_service::ConvenioService,
        estadisticas_service::EstadisticasService, inventario_service::InventarioService,
        oportunidad_service::OportunidadService, registro_service::RegistroService,
    },
};

// Estado compartido de la aplicación: el pool y el grafo de servicios.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub convenio_service: ConvenioService,
    pub registro_service: RegistroService,
    pub inventario_service: InventarioService,
    pub oportunidad_service: OportunidadService,
    pub estadisticas_service: EstadisticasService,
    pub archivo_service: ArchivoService,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .context("La variable de entorno DATABASE_URL es obligatoria")?;
        let jwt_secret = std::env::var("JWT_SECRET")
            .context("La variable de entorno JWT_SECRET es obligatoria")?;
        let uploads_dir =
            std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("No se pudo conectar a la base de datos")?;

        let archivo_service = ArchivoService::new(uploads_dir);
        archivo_service.preparar().await?;

        Ok(Self {
            convenio_service: ConvenioService::new(ConvenioRepository::new(db_pool.clone())),
            registro_service: RegistroService::new(RegistroRepository::new(db_pool.clone())),
            inventario_service: InventarioService::new(InventarioRepository::new(db_pool.clone())),
            oportunidad_service: OportunidadService::new(OportunidadRepository::new(
                db_pool.clone(),
            )),
            estadisticas_service: EstadisticasService::new(EstadisticasRepository::new(
                db_pool.clone(),
            )),
            archivo_service,
            auth_service: AuthService::new(UserRepository::new(db_pool.clone()), jwt_secret),
            db_pool,
        })
    }
}

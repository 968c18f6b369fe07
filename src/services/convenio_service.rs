// src/services/convenio_service.rs

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::ConvenioRepository,
    models::convenio::{ActualizarConvenio, Convenio, ListaConvenios},
    models::fase::FASE_INICIAL,
};

#[derive(Clone)]
pub struct ConvenioService {
    repo: ConvenioRepository,
}

impl ConvenioService {
    pub fn new(repo: ConvenioRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(&self) -> Result<ListaConvenios, AppError> {
        self.repo.listar_con_totales(self.repo.pool()).await
    }

    /// Alta de convenio. Si no viene consecutivo se asigna max + 1; el
    /// chequeo de duplicado y el insert corren en la misma transacción.
    pub async fn crear(
        &self,
        cooperante: &str,
        nombre: &str,
        sector: &str,
        fase_actual: Option<&str>,
        firmado: bool,
        consecutivo_numerico: Option<i32>,
        fecha_inicio: Option<NaiveDate>,
    ) -> Result<Convenio, AppError> {
        let mut tx = self.repo.pool().begin().await?;

        let consecutivo = match consecutivo_numerico {
            Some(n) => n,
            None => self.repo.max_consecutivo(&mut *tx).await? + 1,
        };

        if self.repo.existe_consecutivo(&mut *tx, consecutivo, None).await? {
            return Err(AppError::ConsecutivoDuplicado(consecutivo));
        }

        let convenio = self
            .repo
            .insertar(
                &mut *tx,
                cooperante,
                nombre,
                sector,
                fase_actual.unwrap_or(FASE_INICIAL),
                firmado,
                consecutivo,
                fecha_inicio,
            )
            .await?;

        tx.commit().await?;
        Ok(convenio)
    }

    pub async fn actualizar(&self, id: i32, datos: &ActualizarConvenio) -> Result<(), AppError> {
        let mut tx = self.repo.pool().begin().await?;

        // Si cambia el consecutivo, volver a chequear la unicidad
        // (excluyendo la propia fila).
        if let Some(consecutivo) = datos.consecutivo_numerico {
            if self
                .repo
                .existe_consecutivo(&mut *tx, consecutivo, Some(id))
                .await?
            {
                return Err(AppError::ConsecutivoDuplicado(consecutivo));
            }
        }

        let filas = self
            .repo
            .actualizar(
                &mut *tx,
                id,
                datos.cooperante.as_deref(),
                datos.nombre.as_deref(),
                datos.sector.as_ref().map(|s| s.etiqueta()),
                datos.fase_actual.as_deref(),
                datos.firmado,
                datos.consecutivo_numerico,
                datos.fecha_inicio,
            )
            .await?;

        if filas == 0 {
            return Err(AppError::NoEncontrado("Convenio no encontrado"));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn eliminar(&self, id: i32) -> Result<(), AppError> {
        let filas = self.repo.eliminar(self.repo.pool(), id).await?;
        if filas == 0 {
            return Err(AppError::NoEncontrado("Convenio no encontrado"));
        }
        Ok(())
    }

    pub async fn existe_consecutivo(&self, consecutivo: i32) -> Result<bool, AppError> {
        self.repo
            .existe_consecutivo(self.repo.pool(), consecutivo, None)
            .await
    }

    pub async fn max_consecutivo(&self) -> Result<i32, AppError> {
        self.repo.max_consecutivo(self.repo.pool()).await
    }
}

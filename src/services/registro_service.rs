// src/services/registro_service.rs

use sqlx::{Postgres, Transaction};

use crate::{
    common::error::AppError,
    db::RegistroRepository,
    models::fase::FASE_INICIAL,
    models::registro::{ActualizarRegistro, EventoHistorial, RegistroNuevo, RegistroProceso},
};

// Dueño único de la regla de consistencia del sistema: la fase_actual de
// un convenio siempre es la fase de su registro de proceso más reciente.
// Toda mutación del registro pasa por aquí y corre junto con el recálculo
// dentro de una misma transacción.
#[derive(Clone)]
pub struct RegistroService {
    repo: RegistroRepository,
}

/// Fase que corresponde a un convenio dada la fase de su último registro.
/// Sin registros (o con la fase en NULL) se vuelve a la fase inicial.
pub(crate) fn fase_derivada(ultima: Option<String>) -> String {
    ultima.unwrap_or_else(|| FASE_INICIAL.to_string())
}

impl RegistroService {
    pub fn new(repo: RegistroRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(
        &self,
        convenio_id: Option<i32>,
    ) -> Result<Vec<RegistroProceso>, AppError> {
        self.repo.listar(self.repo.pool(), convenio_id).await
    }

    pub async fn crear(
        &self,
        convenio_id: i32,
        datos: &RegistroNuevo,
    ) -> Result<RegistroProceso, AppError> {
        let mut tx = self.repo.pool().begin().await?;

        let registro = self.repo.insertar(&mut *tx, convenio_id, datos).await?;
        self.recalcular_fase(&mut tx, convenio_id).await?;

        tx.commit().await?;
        Ok(registro)
    }

    pub async fn actualizar(&self, id: i32, datos: &ActualizarRegistro) -> Result<(), AppError> {
        let mut tx = self.repo.pool().begin().await?;

        let registro = self
            .repo
            .obtener(&mut *tx, id)
            .await?
            .ok_or(AppError::NoEncontrado("Registro no encontrado"))?;

        self.repo.actualizar(&mut *tx, id, datos).await?;
        self.recalcular_fase(&mut tx, registro.convenio_id).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn eliminar(&self, id: i32) -> Result<(), AppError> {
        let mut tx = self.repo.pool().begin().await?;

        // El convenio padre se toma de la fila guardada, no del cliente.
        let registro = self
            .repo
            .obtener(&mut *tx, id)
            .await?
            .ok_or(AppError::NoEncontrado("Registro no encontrado"))?;

        self.repo.eliminar(&mut *tx, id).await?;
        self.recalcular_fase(&mut tx, registro.convenio_id).await?;

        tx.commit().await?;
        Ok(())
    }

    // El "más reciente" es el id más alto, no la fecha: ver ultima_fase.
    async fn recalcular_fase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        convenio_id: i32,
    ) -> Result<String, AppError> {
        let ultima = self.repo.ultima_fase(&mut **tx, convenio_id).await?;
        let fase = fase_derivada(ultima);
        self.repo
            .actualizar_fase_convenio(&mut **tx, convenio_id, &fase)
            .await?;
        tracing::debug!(convenio_id, fase = %fase, "fase_actual recalculada");
        Ok(fase)
    }

    // --- Historial ---

    pub async fn listar_historial(
        &self,
        registro_proceso_id: i32,
    ) -> Result<Vec<EventoHistorial>, AppError> {
        self.repo
            .listar_historial(self.repo.pool(), registro_proceso_id)
            .await
    }

    pub async fn agregar_evento(
        &self,
        registro_proceso_id: i32,
        evento: &str,
        fecha: chrono::NaiveDateTime,
    ) -> Result<EventoHistorial, AppError> {
        self.repo
            .insertar_evento(self.repo.pool(), registro_proceso_id, evento, fecha)
            .await
    }

    pub async fn eliminar_evento(&self, id: i32) -> Result<(), AppError> {
        let filas = self.repo.eliminar_evento(self.repo.pool(), id).await?;
        if filas == 0 {
            return Err(AppError::NoEncontrado("Evento no encontrado"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_registros_se_vuelve_a_la_fase_inicial() {
        assert_eq!(fase_derivada(None), "Negociación");
    }

    #[test]
    fn con_registros_manda_la_fase_del_ultimo() {
        assert_eq!(fase_derivada(Some("Firma".to_string())), "Firma");
        // Las etiquetas fuera del catálogo también se propagan tal cual.
        assert_eq!(
            fase_derivada(Some("Fase Especial".to_string())),
            "Fase Especial"
        );
    }
}

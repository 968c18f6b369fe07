// src/db/registro_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::registro::{ActualizarRegistro, EventoHistorial, RegistroNuevo, RegistroProceso},
};

#[derive(Clone)]
pub struct RegistroRepository {
    pool: PgPool,
}

impl RegistroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        convenio_id: Option<i32>,
    ) -> Result<Vec<RegistroProceso>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registros = match convenio_id {
            Some(convenio_id) => {
                sqlx::query_as::<_, RegistroProceso>(
                    "SELECT * FROM registro_procesos WHERE convenio_id = $1 ORDER BY fecha_inicio DESC",
                )
                .bind(convenio_id)
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, RegistroProceso>(
                    "SELECT * FROM registro_procesos ORDER BY fecha_inicio DESC",
                )
                .fetch_all(executor)
                .await?
            }
        };

        Ok(registros)
    }

    pub async fn obtener<'e, E>(
        &self,
        executor: E,
        id: i32,
    ) -> Result<Option<RegistroProceso>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registro =
            sqlx::query_as::<_, RegistroProceso>("SELECT * FROM registro_procesos WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(registro)
    }

    pub async fn insertar<'e, E>(
        &self,
        executor: E,
        convenio_id: i32,
        datos: &RegistroNuevo,
    ) -> Result<RegistroProceso, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registro = sqlx::query_as::<_, RegistroProceso>(
            r#"
            INSERT INTO registro_procesos
                (convenio_id, entidad_proponente, autoridad_ministerial, funcionario_emisor,
                 entidad_emisora, funcionario_receptor, entidad_receptora, registro_proceso,
                 fecha_inicio, fecha_final, tipo_convenio, fase_registro, documento)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(convenio_id)
        .bind(datos.entidad_proponente.as_deref())
        .bind(datos.autoridad_ministerial.as_deref())
        .bind(datos.funcionario_emisor.as_deref())
        .bind(datos.entidad_emisora.as_deref())
        .bind(datos.funcionario_receptor.as_deref())
        .bind(datos.entidad_receptora.as_deref())
        .bind(datos.registro_proceso.as_deref())
        .bind(datos.fecha_inicio)
        .bind(datos.fecha_final)
        .bind(datos.tipo_convenio.as_deref())
        .bind(datos.fase_registro.as_deref())
        .bind(datos.documento.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(registro)
    }

    // Actualización parcial con COALESCE: lo que no vino queda como estaba.
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: i32,
        datos: &ActualizarRegistro,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE registro_procesos SET
                entidad_proponente = COALESCE($2, entidad_proponente),
                autoridad_ministerial = COALESCE($3, autoridad_ministerial),
                funcionario_emisor = COALESCE($4, funcionario_emisor),
                entidad_emisora = COALESCE($5, entidad_emisora),
                funcionario_receptor = COALESCE($6, funcionario_receptor),
                entidad_receptora = COALESCE($7, entidad_receptora),
                registro_proceso = COALESCE($8, registro_proceso),
                fecha_inicio = COALESCE($9, fecha_inicio),
                fecha_final = COALESCE($10, fecha_final),
                tipo_convenio = COALESCE($11, tipo_convenio),
                fase_registro = COALESCE($12, fase_registro),
                documento = COALESCE($13, documento)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(datos.entidad_proponente.as_deref())
        .bind(datos.autoridad_ministerial.as_deref())
        .bind(datos.funcionario_emisor.as_deref())
        .bind(datos.entidad_emisora.as_deref())
        .bind(datos.funcionario_receptor.as_deref())
        .bind(datos.entidad_receptora.as_deref())
        .bind(datos.registro_proceso.as_deref())
        .bind(datos.fecha_inicio)
        .bind(datos.fecha_final)
        .bind(datos.tipo_convenio.as_deref())
        .bind(datos.fase_registro.as_deref())
        .bind(datos.documento.as_deref())
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM registro_procesos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }

    /// Fase del registro más reciente de un convenio. "Más reciente" es el
    /// id más alto (orden de inserción), NO la fecha de inicio: varios
    /// consumidores dependen de esa semántica.
    pub async fn ultima_fase<'e, E>(
        &self,
        executor: E,
        convenio_id: i32,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fase = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT fase_registro
            FROM registro_procesos
            WHERE convenio_id = $1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(convenio_id)
        .fetch_optional(executor)
        .await?;

        Ok(fase.flatten())
    }

    pub async fn actualizar_fase_convenio<'e, E>(
        &self,
        executor: E,
        convenio_id: i32,
        fase: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("UPDATE convenios SET fase_actual = $2 WHERE id = $1")
            .bind(convenio_id)
            .bind(fase)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }

    // --- Historial ---

    pub async fn listar_historial<'e, E>(
        &self,
        executor: E,
        registro_proceso_id: i32,
    ) -> Result<Vec<EventoHistorial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let eventos = sqlx::query_as::<_, EventoHistorial>(
            r#"
            SELECT id, evento, fecha
            FROM historial_registro_procesos
            WHERE registro_proceso_id = $1
            ORDER BY fecha ASC
            "#,
        )
        .bind(registro_proceso_id)
        .fetch_all(executor)
        .await?;

        Ok(eventos)
    }

    pub async fn insertar_evento<'e, E>(
        &self,
        executor: E,
        registro_proceso_id: i32,
        evento: &str,
        fecha: chrono::NaiveDateTime,
    ) -> Result<EventoHistorial, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let evento = sqlx::query_as::<_, EventoHistorial>(
            r#"
            INSERT INTO historial_registro_procesos (registro_proceso_id, evento, fecha)
            VALUES ($1, $2, $3)
            RETURNING id, evento, fecha
            "#,
        )
        .bind(registro_proceso_id)
        .bind(evento)
        .bind(fecha)
        .fetch_one(executor)
        .await?;

        Ok(evento)
    }

    pub async fn eliminar_evento<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM historial_registro_procesos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }
}

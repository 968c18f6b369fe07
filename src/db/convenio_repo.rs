// src/db/convenio_repo.rs

use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::convenio::{Convenio, ListaConvenios},
    models::fase::FASE_INICIAL,
};

#[derive(Clone)]
pub struct ConvenioRepository {
    pool: PgPool,
}

impl ConvenioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Lista completa más los totales que consumen los tableros, en una
    /// transacción para que los conteos correspondan a la misma foto.
    pub async fn listar_con_totales<'e, A>(&self, acquirer: A) -> Result<ListaConvenios, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = acquirer.begin().await?;

        // Una fase vacía o NULL se muestra como la fase inicial.
        let convenios = sqlx::query_as::<_, Convenio>(
            r#"
            SELECT id, cooperante, nombre, sector,
                   COALESCE(NULLIF(fase_actual, ''), $1) AS fase_actual,
                   firmado, consecutivo_numerico, fecha_inicio
            FROM convenios
            ORDER BY id ASC
            "#,
        )
        .bind(FASE_INICIAL)
        .fetch_all(&mut *tx)
        .await?;

        let total_convenios =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM convenios")
                .fetch_one(&mut *tx)
                .await?;

        let total_cooperantes =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT cooperante) FROM convenios")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(ListaConvenios {
            total_convenios,
            total_cooperantes,
            convenios,
        })
    }

    pub async fn insertar<'e, E>(
        &self,
        executor: E,
        cooperante: &str,
        nombre: &str,
        sector: &str,
        fase_actual: &str,
        firmado: bool,
        consecutivo_numerico: i32,
        fecha_inicio: Option<chrono::NaiveDate>,
    ) -> Result<Convenio, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let convenio = sqlx::query_as::<_, Convenio>(
            r#"
            INSERT INTO convenios
                (cooperante, nombre, sector, fase_actual, firmado, consecutivo_numerico, fecha_inicio)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(cooperante)
        .bind(nombre)
        .bind(sector)
        .bind(fase_actual)
        .bind(firmado)
        .bind(consecutivo_numerico)
        .bind(fecha_inicio)
        .fetch_one(executor)
        .await?;

        Ok(convenio)
    }

    /// Actualización parcial: cada COALESCE deja el valor existente cuando
    /// el campo no vino en el payload. Devuelve las filas afectadas.
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: i32,
        cooperante: Option<&str>,
        nombre: Option<&str>,
        sector: Option<&str>,
        fase_actual: Option<&str>,
        firmado: Option<bool>,
        consecutivo_numerico: Option<i32>,
        fecha_inicio: Option<chrono::NaiveDate>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE convenios SET
                cooperante = COALESCE($2, cooperante),
                nombre = COALESCE($3, nombre),
                sector = COALESCE($4, sector),
                fase_actual = COALESCE($5, fase_actual),
                firmado = COALESCE($6, firmado),
                consecutivo_numerico = COALESCE($7, consecutivo_numerico),
                fecha_inicio = COALESCE($8, fecha_inicio)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(cooperante)
        .bind(nombre)
        .bind(sector)
        .bind(fase_actual)
        .bind(firmado)
        .bind(consecutivo_numerico)
        .bind(fecha_inicio)
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM convenios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }

    /// Unicidad del consecutivo en capa de aplicación: no hay UNIQUE en la
    /// tabla. `excluir_id` permite reusar el mismo número al editar la fila.
    pub async fn existe_consecutivo<'e, E>(
        &self,
        executor: E,
        consecutivo: i32,
        excluir_id: Option<i32>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM convenios
                WHERE consecutivo_numerico = $1
                  AND ($2::INTEGER IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(consecutivo)
        .bind(excluir_id)
        .fetch_one(executor)
        .await?;

        Ok(existe)
    }

    pub async fn max_consecutivo<'e, E>(&self, executor: E) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maximo = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(consecutivo_numerico), 0) FROM convenios",
        )
        .fetch_one(executor)
        .await?;

        Ok(maximo)
    }
}

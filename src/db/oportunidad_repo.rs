// src/db/oportunidad_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::oportunidad::{ActualizarOportunidad, Oportunidad, OportunidadNueva},
};

#[derive(Clone)]
pub struct OportunidadRepository {
    pool: PgPool,
}

impl OportunidadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Oportunidad>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let oportunidades =
            sqlx::query_as::<_, Oportunidad>("SELECT * FROM oportunidades ORDER BY id ASC")
                .fetch_all(executor)
                .await?;
        Ok(oportunidades)
    }

    pub async fn existe<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM oportunidades WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(existe)
    }

    pub async fn insertar<'e, E>(
        &self,
        executor: E,
        datos: &OportunidadNueva,
    ) -> Result<Oportunidad, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let oportunidad = sqlx::query_as::<_, Oportunidad>(
            r#"
            INSERT INTO oportunidades
                (nombre_oportunidad, objetivo, modalidad, tipo_oportunidad, socio, sector,
                 tema, poblacion_meta, despacho, direccion_envio, fecha_inicio, fecha_fin,
                 funcionario)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(datos.nombre_oportunidad.as_deref())
        .bind(datos.objetivo.as_deref())
        .bind(datos.modalidad.as_deref())
        .bind(datos.tipo_oportunidad.as_deref())
        .bind(datos.socio.as_deref())
        .bind(datos.sector.as_deref())
        .bind(datos.tema.as_deref())
        .bind(datos.poblacion_meta.as_deref())
        .bind(datos.despacho.as_deref())
        .bind(datos.direccion_envio.as_deref())
        .bind(datos.fecha_inicio)
        .bind(datos.fecha_fin)
        .bind(datos.funcionario.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(oportunidad)
    }

    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: i32,
        datos: &ActualizarOportunidad,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE oportunidades SET
                nombre_oportunidad = COALESCE($2, nombre_oportunidad),
                objetivo = COALESCE($3, objetivo),
                modalidad = COALESCE($4, modalidad),
                tipo_oportunidad = COALESCE($5, tipo_oportunidad),
                socio = COALESCE($6, socio),
                sector = COALESCE($7, sector),
                tema = COALESCE($8, tema),
                poblacion_meta = COALESCE($9, poblacion_meta),
                despacho = COALESCE($10, despacho),
                direccion_envio = COALESCE($11, direccion_envio),
                fecha_inicio = COALESCE($12, fecha_inicio),
                fecha_fin = COALESCE($13, fecha_fin),
                funcionario = COALESCE($14, funcionario),
                doc_pdf = COALESCE($15, doc_pdf)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(datos.nombre_oportunidad.as_deref())
        .bind(datos.objetivo.as_deref())
        .bind(datos.modalidad.as_deref())
        .bind(datos.tipo_oportunidad.as_deref())
        .bind(datos.socio.as_deref())
        .bind(datos.sector.as_deref())
        .bind(datos.tema.as_deref())
        .bind(datos.poblacion_meta.as_deref())
        .bind(datos.despacho.as_deref())
        .bind(datos.direccion_envio.as_deref())
        .bind(datos.fecha_inicio)
        .bind(datos.fecha_fin)
        .bind(datos.funcionario.as_deref())
        .bind(datos.doc_pdf.as_deref())
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM oportunidades WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }
}

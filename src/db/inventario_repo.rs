// src/db/inventario_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::inventario::{ActualizarInventario, InventarioNuevo, ItemInventario},
};

#[derive(Clone)]
pub struct InventarioRepository {
    pool: PgPool,
}

impl InventarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<ItemInventario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items =
            sqlx::query_as::<_, ItemInventario>("SELECT * FROM inventario ORDER BY id ASC")
                .fetch_all(executor)
                .await?;
        Ok(items)
    }

    pub async fn existe<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let existe =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM inventario WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(existe)
    }

    pub async fn insertar<'e, E>(
        &self,
        executor: E,
        datos: &InventarioNuevo,
    ) -> Result<ItemInventario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ItemInventario>(
            r#"
            INSERT INTO inventario
                (nombre_convenio, objeto_convenio, tipo_instrumento, presupuesto,
                 instancias_tecnicas, informe, fecha_rige, fecha_vencimiento,
                 cooperante, contraparte_externa)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(datos.nombre_convenio.as_deref())
        .bind(datos.objeto_convenio.as_deref())
        .bind(datos.tipo_instrumento.as_deref())
        .bind(datos.presupuesto)
        .bind(datos.instancias_tecnicas.as_deref())
        .bind(datos.informe.as_deref())
        .bind(datos.fecha_rige)
        .bind(datos.fecha_vencimiento)
        .bind(datos.cooperante.as_deref())
        .bind(datos.contraparte_externa.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: i32,
        datos: &ActualizarInventario,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE inventario SET
                nombre_convenio = COALESCE($2, nombre_convenio),
                objeto_convenio = COALESCE($3, objeto_convenio),
                tipo_instrumento = COALESCE($4, tipo_instrumento),
                presupuesto = COALESCE($5, presupuesto),
                instancias_tecnicas = COALESCE($6, instancias_tecnicas),
                informe = COALESCE($7, informe),
                fecha_rige = COALESCE($8, fecha_rige),
                fecha_vencimiento = COALESCE($9, fecha_vencimiento),
                documento_pdf = COALESCE($10, documento_pdf)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(datos.nombre_convenio.as_deref())
        .bind(datos.objeto_convenio.as_deref())
        .bind(datos.tipo_instrumento.as_deref())
        .bind(datos.presupuesto)
        .bind(datos.instancias_tecnicas.as_deref())
        .bind(datos.informe.as_deref())
        .bind(datos.fecha_rige)
        .bind(datos.fecha_vencimiento)
        .bind(datos.documento_pdf.as_deref())
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM inventario WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }
}

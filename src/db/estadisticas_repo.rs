// src/db/estadisticas_repo.rs

use sqlx::{Acquire, PgPool, Postgres};

use crate::{common::error::AppError, models::estadisticas::Conteo};

// Datos agregados para los gráficos. Cada resumen corre dentro de una
// transacción para que todos los conteos salgan de la misma foto.
#[derive(Clone)]
pub struct EstadisticasRepository {
    pool: PgPool,
}

pub struct TotalesConvenios {
    pub total_convenios: i64,
    pub total_firmados: i64,
    pub total_cooperantes: i64,
    pub por_fase: Vec<Conteo>,
    pub por_sector: Vec<Conteo>,
}

pub struct TotalesOportunidades {
    pub total_oportunidades: i64,
    pub por_tema: Vec<Conteo>,
    pub por_sector: Vec<Conteo>,
    pub por_poblacion: Vec<Conteo>,
    pub por_socio: Vec<Conteo>,
}

impl EstadisticasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn totales_convenios<'e, A>(
        &self,
        acquirer: A,
    ) -> Result<TotalesConvenios, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = acquirer.begin().await?;

        let total_convenios =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM convenios")
                .fetch_one(&mut *tx)
                .await?;

        let total_firmados =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM convenios WHERE firmado")
                .fetch_one(&mut *tx)
                .await?;

        let total_cooperantes =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT cooperante) FROM convenios")
                .fetch_one(&mut *tx)
                .await?;

        let por_fase = sqlx::query_as::<_, Conteo>(
            r#"
            SELECT fase_actual AS etiqueta, COUNT(*) AS total
            FROM convenios
            GROUP BY fase_actual
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        let por_sector = sqlx::query_as::<_, Conteo>(
            r#"
            SELECT sector AS etiqueta, COUNT(*) AS total
            FROM convenios
            GROUP BY sector
            ORDER BY total DESC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(TotalesConvenios {
            total_convenios,
            total_firmados,
            total_cooperantes,
            por_fase,
            por_sector,
        })
    }

    pub async fn totales_oportunidades<'e, A>(
        &self,
        acquirer: A,
    ) -> Result<TotalesOportunidades, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut tx = acquirer.begin().await?;

        let total_oportunidades =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM oportunidades")
                .fetch_one(&mut *tx)
                .await?;

        let por_tema = Self::conteo_por(&mut tx, "tema").await?;
        let por_sector = Self::conteo_por(&mut tx, "sector").await?;
        let por_poblacion = Self::conteo_por(&mut tx, "poblacion_meta").await?;
        let por_socio = Self::conteo_por(&mut tx, "socio").await?;

        tx.commit().await?;

        Ok(TotalesOportunidades {
            total_oportunidades,
            por_tema,
            por_sector,
            por_poblacion,
            por_socio,
        })
    }

    // `columna` sale de una lista fija de llamadas internas, nunca del usuario.
    async fn conteo_por(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        columna: &str,
    ) -> Result<Vec<Conteo>, AppError> {
        let sql = format!(
            "SELECT {columna} AS etiqueta, COUNT(*) AS total FROM oportunidades GROUP BY {columna} ORDER BY total DESC",
        );
        let conteos = sqlx::query_as::<_, Conteo>(&sql)
            .fetch_all(&mut **tx)
            .await?;
        Ok(conteos)
    }
}

// src/models/estadisticas.rs

use serde::Serialize;
use sqlx::FromRow;

// Conteo genérico de un GROUP BY (sector, tema, población, socio...).
// La etiqueta puede venir NULL cuando la columna no se llenó en el formulario.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Conteo {
    pub etiqueta: Option<String>,
    pub total: i64,
}

/// Conteo de convenios en una fase, con su porcentaje sobre el total y el
/// avance lineal de la fase dentro del proceso (para las barras del tablero).
#[derive(Debug, Clone, Serialize)]
pub struct ConteoFase {
    pub fase: String,
    pub total: i64,
    pub porcentaje: f64,
    pub avance: f64,
}

#[derive(Debug, Serialize)]
pub struct ResumenConvenios {
    pub total_convenios: i64,
    pub total_firmados: i64,
    pub total_cooperantes: i64,
    pub por_fase: Vec<ConteoFase>,
    pub por_sector: Vec<Conteo>,
}

#[derive(Debug, Serialize)]
pub struct ResumenOportunidades {
    pub total_oportunidades: i64,
    pub por_tema: Vec<Conteo>,
    pub por_sector: Vec<Conteo>,
    pub por_poblacion: Vec<Conteo>,
    pub por_socio: Vec<Conteo>,
}

// src/models/oportunidad.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Oportunidad de desarrollo profesional (becas, seminarios, cursos).
// Entidad independiente del flujo de convenios.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Oportunidad {
    pub id: i32,
    pub nombre_oportunidad: String,
    pub objetivo: String,
    pub modalidad: Option<String>,
    pub tipo_oportunidad: Option<String>,
    pub socio: String,
    pub sector: Option<String>,
    pub tema: Option<String>,
    pub poblacion_meta: Option<String>,
    pub despacho: Option<String>,
    pub direccion_envio: Option<String>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub funcionario: Option<String>,
    pub doc_pdf: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OportunidadNueva {
    #[validate(
        required(message = "El campo 'nombre_oportunidad' es obligatorio."),
        length(min = 1, message = "El campo 'nombre_oportunidad' es obligatorio.")
    )]
    pub nombre_oportunidad: Option<String>,

    #[validate(
        required(message = "El campo 'objetivo' es obligatorio."),
        length(min = 1, message = "El campo 'objetivo' es obligatorio.")
    )]
    pub objetivo: Option<String>,

    pub modalidad: Option<String>,
    pub tipo_oportunidad: Option<String>,

    #[validate(
        required(message = "El campo 'socio' es obligatorio."),
        length(min = 1, message = "El campo 'socio' es obligatorio.")
    )]
    pub socio: Option<String>,

    pub sector: Option<String>,
    pub tema: Option<String>,
    pub poblacion_meta: Option<String>,
    pub despacho: Option<String>,
    pub direccion_envio: Option<String>,

    #[validate(required(message = "El campo 'fecha_inicio' es obligatorio."))]
    pub fecha_inicio: Option<NaiveDate>,

    pub fecha_fin: Option<NaiveDate>,
    pub funcionario: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarOportunidad {
    #[validate(required(message = "Falta el campo 'id'."))]
    pub id: Option<i32>,

    pub nombre_oportunidad: Option<String>,
    pub objetivo: Option<String>,
    pub modalidad: Option<String>,
    pub tipo_oportunidad: Option<String>,
    pub socio: Option<String>,
    pub sector: Option<String>,
    pub tema: Option<String>,
    pub poblacion_meta: Option<String>,
    pub despacho: Option<String>,
    pub direccion_envio: Option<String>,
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub funcionario: Option<String>,
    pub doc_pdf: Option<String>,
}

impl ActualizarOportunidad {
    pub fn esta_vacio(&self) -> bool {
        self.nombre_oportunidad.is_none()
            && self.objetivo.is_none()
            && self.modalidad.is_none()
            && self.tipo_oportunidad.is_none()
            && self.socio.is_none()
            && self.sector.is_none()
            && self.tema.is_none()
            && self.poblacion_meta.is_none()
            && self.despacho.is_none()
            && self.direccion_envio.is_none()
            && self.fecha_inicio.is_none()
            && self.fecha_fin.is_none()
            && self.funcionario.is_none()
            && self.doc_pdf.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oportunidad_nueva_exige_sus_cuatro_obligatorios() {
        let payload: OportunidadNueva = serde_json::from_str(
            r#"{"nombre_oportunidad": "Beca OEA", "fecha_inicio": "2025-03-01"}"#,
        )
        .unwrap();
        let errores = payload.validate().unwrap_err();
        assert!(errores.field_errors().contains_key("objetivo"));
        assert!(errores.field_errors().contains_key("socio"));
        assert!(!errores.field_errors().contains_key("fecha_inicio"));
    }
}

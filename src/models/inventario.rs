// src/models/inventario.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Inventario de convenios ya suscritos. Es un archivo independiente del
// flujo de fases: aquí no hay campos derivados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItemInventario {
    pub id: i32,
    pub nombre_convenio: String,
    pub objeto_convenio: Option<String>,
    pub tipo_instrumento: Option<String>,
    pub presupuesto: Option<Decimal>,
    pub instancias_tecnicas: Option<String>,
    pub informe: Option<String>,
    pub fecha_rige: NaiveDate,
    pub fecha_vencimiento: NaiveDate,
    pub cooperante: Option<String>,
    pub contraparte_externa: Option<String>,
    pub documento_pdf: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InventarioNuevo {
    #[validate(
        required(message = "El campo 'nombre_convenio' es obligatorio."),
        length(min = 1, message = "El campo 'nombre_convenio' es obligatorio.")
    )]
    pub nombre_convenio: Option<String>,

    pub objeto_convenio: Option<String>,
    pub tipo_instrumento: Option<String>,
    pub presupuesto: Option<Decimal>,
    pub instancias_tecnicas: Option<String>,
    pub informe: Option<String>,

    #[validate(required(message = "El campo 'fecha_rige' es obligatorio."))]
    pub fecha_rige: Option<NaiveDate>,

    #[validate(required(message = "El campo 'fecha_vencimiento' es obligatorio."))]
    pub fecha_vencimiento: Option<NaiveDate>,

    pub cooperante: Option<String>,
    pub contraparte_externa: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarInventario {
    #[validate(required(message = "Falta el campo 'id'."))]
    pub id: Option<i32>,

    pub nombre_convenio: Option<String>,
    pub objeto_convenio: Option<String>,
    pub tipo_instrumento: Option<String>,
    pub presupuesto: Option<Decimal>,
    pub instancias_tecnicas: Option<String>,
    pub informe: Option<String>,
    pub fecha_rige: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub documento_pdf: Option<String>,
}

impl ActualizarInventario {
    /// True cuando el payload no trae ningún campo actualizable.
    pub fn esta_vacio(&self) -> bool {
        self.nombre_convenio.is_none()
            && self.objeto_convenio.is_none()
            && self.tipo_instrumento.is_none()
            && self.presupuesto.is_none()
            && self.instancias_tecnicas.is_none()
            && self.informe.is_none()
            && self.fecha_rige.is_none()
            && self.fecha_vencimiento.is_none()
            && self.documento_pdf.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventario_nuevo_exige_nombre_y_fechas() {
        let payload: InventarioNuevo =
            serde_json::from_str(r#"{"nombre_convenio": "Convenio BID"}"#).unwrap();
        let errores = payload.validate().unwrap_err();
        assert!(errores.field_errors().contains_key("fecha_rige"));
        assert!(errores.field_errors().contains_key("fecha_vencimiento"));
    }

    #[test]
    fn actualizar_sin_campos_se_detecta() {
        let payload: ActualizarInventario = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert!(payload.esta_vacio());

        let payload: ActualizarInventario =
            serde_json::from_str(r#"{"id": 4, "documento_pdf": ""}"#).unwrap();
        assert!(!payload.esta_vacio()); // cadena vacía cuenta: así se limpia el adjunto
    }
}

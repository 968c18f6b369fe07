// src/models/registro.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// Registro de un paso del proceso de aprobación de un convenio. Cada
// mutación sobre esta tabla obliga a recalcular la fase_actual del
// convenio padre (ver RegistroService).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistroProceso {
    pub id: i32,
    pub convenio_id: i32,
    pub entidad_proponente: Option<String>,
    pub autoridad_ministerial: Option<String>,
    pub funcionario_emisor: Option<String>,
    pub entidad_emisora: Option<String>,
    pub funcionario_receptor: Option<String>,
    pub entidad_receptora: Option<String>,
    pub registro_proceso: Option<String>,
    pub fecha_inicio: Option<NaiveDateTime>,
    pub fecha_final: Option<NaiveDateTime>,
    pub tipo_convenio: Option<String>,
    pub fase_registro: Option<String>,
    pub documento: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistroNuevo {
    #[validate(required(message = "El campo 'convenio_id' es obligatorio."))]
    pub convenio_id: Option<i32>,

    pub entidad_proponente: Option<String>,
    pub autoridad_ministerial: Option<String>,
    pub funcionario_emisor: Option<String>,
    pub entidad_emisora: Option<String>,
    pub funcionario_receptor: Option<String>,
    pub entidad_receptora: Option<String>,
    pub registro_proceso: Option<String>,
    pub fecha_inicio: Option<NaiveDateTime>,
    pub fecha_final: Option<NaiveDateTime>,
    pub tipo_convenio: Option<String>,
    pub fase_registro: Option<String>,
    pub documento: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarRegistro {
    #[validate(required(message = "El campo 'id' es obligatorio."))]
    pub id: Option<i32>,

    pub entidad_proponente: Option<String>,
    pub autoridad_ministerial: Option<String>,
    pub funcionario_emisor: Option<String>,
    pub entidad_emisora: Option<String>,
    pub funcionario_receptor: Option<String>,
    pub entidad_receptora: Option<String>,
    pub registro_proceso: Option<String>,
    pub fecha_inicio: Option<NaiveDateTime>,
    pub fecha_final: Option<NaiveDateTime>,
    pub tipo_convenio: Option<String>,
    pub fase_registro: Option<String>,
    pub documento: Option<String>,
}

// --- Historial ---
// Bitácora manual de eventos de un registro de proceso. Nada se deriva de
// ella; solo se agrega y se borra desde el panel lateral.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventoHistorial {
    pub id: i32,
    pub evento: String,
    pub fecha: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EventoNuevo {
    #[validate(required(message = "El campo 'registro_proceso_id' es obligatorio."))]
    pub registro_proceso_id: Option<i32>,

    #[validate(
        required(message = "El campo 'evento' es obligatorio."),
        length(min = 1, message = "El campo 'evento' es obligatorio.")
    )]
    pub evento: Option<String>,

    #[validate(required(message = "El campo 'fecha' es obligatorio."))]
    pub fecha: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registro_nuevo_solo_exige_el_convenio() {
        let payload: RegistroNuevo =
            serde_json::from_str(r#"{"fase_registro": "Firma"}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: RegistroNuevo = serde_json::from_str(r#"{"convenio_id": 7}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.fase_registro.is_none());
    }

    #[test]
    fn evento_nuevo_exige_los_tres_datos() {
        let payload: EventoNuevo =
            serde_json::from_str(r#"{"registro_proceso_id": 3, "evento": "Documento recibido"}"#)
                .unwrap();
        let errores = payload.validate().unwrap_err();
        assert!(errores.field_errors().contains_key("fecha"));
    }
}

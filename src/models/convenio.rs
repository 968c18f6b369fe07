// src/models/convenio.rs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

// --- Sector ---
// El formulario ofrece un catálogo fijo más la opción "Otro (escribir
// manualmente)". Aquí eso se modela como variante explícita en lugar de
// pisar el campo con texto arbitrario: o es un valor conocido del catálogo
// o es `Otro` con su texto. En el alambre y en la base sigue siendo la
// etiqueta plana de siempre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sector {
    Bilateral,
    SociedadCivil,
    Privado,
    Publico,
    Academia,
    MultilateralRegional,
    MultilateralNacionesUnidas,
    Otro(String),
}

impl Sector {
    const CATALOGO: [(&'static str, Sector); 7] = [
        ("Bilateral", Sector::Bilateral),
        ("Sociedad Civil", Sector::SociedadCivil),
        ("Privado", Sector::Privado),
        ("Público", Sector::Publico),
        ("Academia", Sector::Academia),
        ("Multilateral Regional", Sector::MultilateralRegional),
        ("Multilateral Naciones Unidas", Sector::MultilateralNacionesUnidas),
    ];

    pub fn etiqueta(&self) -> &str {
        match self {
            Sector::Bilateral => "Bilateral",
            Sector::SociedadCivil => "Sociedad Civil",
            Sector::Privado => "Privado",
            Sector::Publico => "Público",
            Sector::Academia => "Academia",
            Sector::MultilateralRegional => "Multilateral Regional",
            Sector::MultilateralNacionesUnidas => "Multilateral Naciones Unidas",
            Sector::Otro(texto) => texto,
        }
    }

    pub fn desde_etiqueta(etiqueta: &str) -> Sector {
        Sector::CATALOGO
            .iter()
            .find(|(nombre, _)| *nombre == etiqueta)
            .map(|(_, sector)| sector.clone())
            .unwrap_or_else(|| Sector::Otro(etiqueta.to_string()))
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.etiqueta())
    }
}

impl Serialize for Sector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.etiqueta())
    }
}

impl<'de> Deserialize<'de> for Sector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let etiqueta = String::deserialize(deserializer)?;
        Ok(Sector::desde_etiqueta(&etiqueta))
    }
}

// --- Convenio ---
// Fila tal como viene de la base. `fase_actual` solo la escribe la rutina
// de recálculo de fase; el usuario no la toca en el flujo normal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Convenio {
    pub id: i32,
    pub cooperante: String,
    pub nombre: String,
    pub sector: String,
    pub fase_actual: String,
    pub firmado: bool,
    pub consecutivo_numerico: i32,
    pub fecha_inicio: Option<NaiveDate>,
}

/// Respuesta de `GET /api/convenios`: los totales conservan las claves
/// camelCase que consumen los tableros.
#[derive(Debug, Serialize)]
pub struct ListaConvenios {
    #[serde(rename = "totalConvenios")]
    pub total_convenios: i64,
    #[serde(rename = "totalCooperantes")]
    pub total_cooperantes: i64,
    pub convenios: Vec<Convenio>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConvenioNuevo {
    #[validate(
        required(message = "El campo 'cooperante' es obligatorio."),
        length(min = 1, message = "El campo 'cooperante' es obligatorio.")
    )]
    pub cooperante: Option<String>,

    #[validate(
        required(message = "El campo 'nombre' es obligatorio."),
        length(min = 1, message = "El campo 'nombre' es obligatorio.")
    )]
    pub nombre: Option<String>,

    #[validate(required(message = "El campo 'sector' es obligatorio."))]
    pub sector: Option<Sector>,

    pub fase_actual: Option<String>,

    #[serde(default)]
    pub firmado: bool,

    // Si no viene, se asigna automáticamente max + 1.
    pub consecutivo_numerico: Option<i32>,

    pub fecha_inicio: Option<NaiveDate>,
}

// Actualización parcial: un campo ausente se deja como está.
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarConvenio {
    #[validate(required(message = "El campo 'id' es obligatorio."))]
    pub id: Option<i32>,

    pub cooperante: Option<String>,
    pub nombre: Option<String>,
    pub sector: Option<Sector>,
    pub fase_actual: Option<String>,
    pub firmado: Option<bool>,
    pub consecutivo_numerico: Option<i32>,
    pub fecha_inicio: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_del_catalogo_viaja_como_su_etiqueta() {
        let sector = Sector::desde_etiqueta("Multilateral Naciones Unidas");
        assert_eq!(sector, Sector::MultilateralNacionesUnidas);
        assert_eq!(
            serde_json::to_string(&sector).unwrap(),
            "\"Multilateral Naciones Unidas\""
        );
    }

    #[test]
    fn sector_fuera_del_catalogo_es_otro_con_su_texto() {
        let sector: Sector = serde_json::from_str("\"Cooperación Descentralizada\"").unwrap();
        assert_eq!(
            sector,
            Sector::Otro("Cooperación Descentralizada".to_string())
        );
        // Y vuelve al alambre tal cual, sin marcador sintético.
        assert_eq!(
            serde_json::to_string(&sector).unwrap(),
            "\"Cooperación Descentralizada\""
        );
    }

    #[test]
    fn convenio_nuevo_exige_los_campos_obligatorios() {
        let payload: ConvenioNuevo = serde_json::from_str(r#"{"nombre": "Convenio X"}"#).unwrap();
        let errores = payload.validate().unwrap_err();
        let errores_por_campo = errores.field_errors();
        let campos: Vec<&str> = errores_por_campo.keys().map(|c| c.as_ref()).collect();
        assert!(campos.contains(&"cooperante"));
        assert!(campos.contains(&"sector"));
        assert!(!campos.contains(&"nombre"));
    }

    #[test]
    fn convenio_nuevo_completo_pasa_validacion() {
        let payload: ConvenioNuevo = serde_json::from_str(
            r#"{"cooperante": "UNICEF", "nombre": "Convenio marco", "sector": "Bilateral"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.consecutivo_numerico.is_none());
    }
}

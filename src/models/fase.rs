// src/models/fase.rs

use serde::{Deserialize, Serialize};

/// Fase asignada a un convenio que todavía no tiene registros de proceso.
pub const FASE_INICIAL: &str = "Negociación";

// Las seis fases del proceso de aprobación de un convenio, en orden.
// OJO: el orden solo se usa para calcular el porcentaje de avance en los
// tableros. No es una máquina de estados: la aplicación no impide saltar
// fases ni retroceder, y en la base pueden existir etiquetas fuera de esta
// lista (se muestran con avance 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fase {
    Negociacion,
    VistoBueno,
    RevisionTecnica,
    AnalisisLegal,
    VerificacionLegal,
    Firma,
}

impl Fase {
    pub const TODAS: [Fase; 6] = [
        Fase::Negociacion,
        Fase::VistoBueno,
        Fase::RevisionTecnica,
        Fase::AnalisisLegal,
        Fase::VerificacionLegal,
        Fase::Firma,
    ];

    /// Etiqueta tal como se guarda en la base y se muestra en pantalla.
    pub fn nombre(&self) -> &'static str {
        match self {
            Fase::Negociacion => "Negociación",
            Fase::VistoBueno => "Visto Bueno",
            Fase::RevisionTecnica => "Revisión Técnica",
            Fase::AnalisisLegal => "Análisis Legal",
            Fase::VerificacionLegal => "Verificación Legal",
            Fase::Firma => "Firma",
        }
    }

    pub fn desde_nombre(nombre: &str) -> Option<Fase> {
        Fase::TODAS.into_iter().find(|f| f.nombre() == nombre)
    }

    /// Posición dentro de la secuencia (0..=5).
    pub fn indice(&self) -> usize {
        Fase::TODAS.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn progreso(&self) -> f64 {
        ((self.indice() + 1) as f64 / Fase::TODAS.len() as f64) * 100.0
    }
}

/// Porcentaje de avance de una etiqueta arbitraria. Una fase desconocida
/// avanza 0, igual que hacía la barra de progreso del tablero.
pub fn progreso_de(nombre: &str) -> f64 {
    Fase::desde_nombre(nombre).map(|f| f.progreso()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn las_fases_mantienen_el_orden_del_proceso() {
        let nombres: Vec<&str> = Fase::TODAS.iter().map(|f| f.nombre()).collect();
        assert_eq!(
            nombres,
            vec![
                "Negociación",
                "Visto Bueno",
                "Revisión Técnica",
                "Análisis Legal",
                "Verificación Legal",
                "Firma",
            ]
        );
    }

    #[test]
    fn progreso_lineal_por_indice() {
        assert_eq!(Fase::Negociacion.progreso(), 100.0 / 6.0);
        assert_eq!(Fase::Firma.progreso(), 100.0);
        assert_eq!(Fase::AnalisisLegal.indice(), 3);
    }

    #[test]
    fn fase_desconocida_no_avanza() {
        assert_eq!(progreso_de("Fase Inventada"), 0.0);
        assert_eq!(progreso_de(""), 0.0);
    }

    #[test]
    fn parseo_de_etiquetas() {
        assert_eq!(Fase::desde_nombre("Firma"), Some(Fase::Firma));
        assert_eq!(Fase::desde_nombre("Negociación"), Some(Fase::Negociacion));
        assert_eq!(Fase::desde_nombre("firma"), None); // sensible a mayúsculas
        assert_eq!(FASE_INICIAL, Fase::Negociacion.nombre());
    }
}

// src/services/estadisticas_service.rs

use crate::{
    common::error::AppError,
    db::EstadisticasRepository,
    models::estadisticas::{Conteo, ConteoFase, ResumenConvenios, ResumenOportunidades},
    models::fase::{progreso_de, Fase},
};

#[derive(Clone)]
pub struct EstadisticasService {
    repo: EstadisticasRepository,
}

/// Arma el conteo por fase en el orden del proceso, con el porcentaje de
/// cada fase sobre el total de convenios. Las etiquetas fuera del catálogo
/// no aparecen en el desglose (igual que en los gráficos).
pub(crate) fn armar_conteo_fases(conteos: &[Conteo], total: i64) -> Vec<ConteoFase> {
    Fase::TODAS
        .iter()
        .map(|fase| {
            let cantidad = conteos
                .iter()
                .find(|c| c.etiqueta.as_deref() == Some(fase.nombre()))
                .map(|c| c.total)
                .unwrap_or(0);
            let porcentaje = if total > 0 {
                (cantidad as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            ConteoFase {
                fase: fase.nombre().to_string(),
                total: cantidad,
                porcentaje,
                avance: progreso_de(fase.nombre()),
            }
        })
        .collect()
}

impl EstadisticasService {
    pub fn new(repo: EstadisticasRepository) -> Self {
        Self { repo }
    }

    pub async fn resumen_convenios(&self) -> Result<ResumenConvenios, AppError> {
        let totales = self.repo.totales_convenios(self.repo.pool()).await?;

        Ok(ResumenConvenios {
            por_fase: armar_conteo_fases(&totales.por_fase, totales.total_convenios),
            total_convenios: totales.total_convenios,
            total_firmados: totales.total_firmados,
            total_cooperantes: totales.total_cooperantes,
            por_sector: totales.por_sector,
        })
    }

    pub async fn resumen_oportunidades(&self) -> Result<ResumenOportunidades, AppError> {
        let totales = self.repo.totales_oportunidades(self.repo.pool()).await?;

        Ok(ResumenOportunidades {
            total_oportunidades: totales.total_oportunidades,
            por_tema: totales.por_tema,
            por_sector: totales.por_sector,
            por_poblacion: totales.por_poblacion,
            por_socio: totales.por_socio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conteo(etiqueta: &str, total: i64) -> Conteo {
        Conteo {
            etiqueta: Some(etiqueta.to_string()),
            total,
        }
    }

    #[test]
    fn el_desglose_respeta_el_orden_del_proceso() {
        let conteos = vec![conteo("Firma", 3), conteo("Negociación", 1)];
        let desglose = armar_conteo_fases(&conteos, 4);

        assert_eq!(desglose.len(), 6);
        assert_eq!(desglose[0].fase, "Negociación");
        assert_eq!(desglose[0].total, 1);
        assert_eq!(desglose[0].porcentaje, 25.0);
        assert_eq!(desglose[5].fase, "Firma");
        assert_eq!(desglose[5].porcentaje, 75.0);
        assert_eq!(desglose[5].avance, 100.0);
        // Fases sin convenios salen en cero, no desaparecen.
        assert_eq!(desglose[1].total, 0);
    }

    #[test]
    fn sin_convenios_no_hay_division_por_cero() {
        let desglose = armar_conteo_fases(&[], 0);
        assert!(desglose.iter().all(|c| c.total == 0 && c.porcentaje == 0.0));
    }

    #[test]
    fn las_fases_desconocidas_no_entran_al_desglose() {
        let conteos = vec![conteo("Fase Inventada", 9), conteo("Firma", 1)];
        let desglose = armar_conteo_fases(&conteos, 10);
        assert!(desglose.iter().all(|c| c.fase != "Fase Inventada"));
        assert_eq!(desglose[5].porcentaje, 10.0);
    }
}

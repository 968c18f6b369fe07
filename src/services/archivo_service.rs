// src/services/archivo_service.rs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::common::error::AppError;

// Maneja el directorio de documentos subidos (PDFs de convenios,
// inventario y oportunidades). Los nombres llevan un token aleatorio,
// así dos subidas del mismo archivo nunca chocan en disco.
#[derive(Clone)]
pub struct ArchivoService {
    directorio: PathBuf,
}

impl ArchivoService {
    pub fn new(directorio: impl Into<PathBuf>) -> Self {
        Self {
            directorio: directorio.into(),
        }
    }

    /// Crea el directorio de subidas si todavía no existe.
    pub async fn preparar(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.directorio).await?;
        Ok(())
    }

    fn extension_de(nombre_original: Option<&str>) -> String {
        nombre_original
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_else(|| ".pdf".to_string())
    }

    /// `documento-{id}-{uuid}{ext}`. El id viene de un campo de formulario,
    /// así que se filtra a un set seguro antes de meterlo en la ruta.
    pub fn nombre_unico(id: &str, nombre_original: Option<&str>) -> String {
        let id_limpio: String = id
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        format!(
            "documento-{}-{}{}",
            id_limpio,
            Uuid::new_v4(),
            Self::extension_de(nombre_original)
        )
    }

    /// Guarda los bytes y devuelve la URL relativa que se persiste en la
    /// fila correspondiente.
    pub async fn guardar(
        &self,
        id: &str,
        nombre_original: Option<&str>,
        datos: &[u8],
    ) -> Result<String, AppError> {
        let nombre = Self::nombre_unico(id, nombre_original);
        fs::write(self.directorio.join(&nombre), datos).await?;
        Ok(format!("/uploads/{nombre}"))
    }

    // Solo se acepta el nombre base: "a/b/c.pdf" y "../c.pdf" terminan en
    // {directorio}/c.pdf.
    fn ruta_segura(&self, nombre: &str) -> Result<PathBuf, AppError> {
        let base = Path::new(nombre)
            .file_name()
            .ok_or_else(|| AppError::BadRequest("Falta el nombre del archivo".to_string()))?;
        Ok(self.directorio.join(base))
    }

    pub async fn eliminar(&self, nombre: &str) -> Result<(), AppError> {
        let ruta = self.ruta_segura(nombre)?;
        match fs::remove_file(&ruta).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::ArchivoNoEncontrado),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn leer(&self, nombre: &str) -> Result<Vec<u8>, AppError> {
        let ruta = self.ruta_segura(nombre)?;
        match fs::read(&ruta).await {
            Ok(datos) => Ok(datos),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::ArchivoNoEncontrado),
            Err(e) => Err(e.into()),
        }
    }

    /// Content-Type según la extensión; lo que no se reconoce baja como
    /// binario genérico.
    pub fn content_type(nombre: &str) -> &'static str {
        match Path::new(nombre)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn el_nombre_conserva_id_y_extension() {
        let nombre = ArchivoService::nombre_unico("42", Some("informe final.PDF"));
        assert!(nombre.starts_with("documento-42-"));
        assert!(nombre.ends_with(".PDF"));

        // Sin nombre original se asume PDF.
        let nombre = ArchivoService::nombre_unico("42", None);
        assert!(nombre.ends_with(".pdf"));
    }

    #[test]
    fn el_id_se_filtra_antes_de_entrar_a_la_ruta() {
        let nombre = ArchivoService::nombre_unico("../7", Some("x.pdf"));
        assert!(nombre.starts_with("documento-7-"));
        assert!(!nombre.contains(".."));
        assert!(!nombre.contains('/'));
    }

    #[tokio::test]
    async fn guardar_y_eliminar_un_documento() {
        let dir = tempdir().unwrap();
        let servicio = ArchivoService::new(dir.path());
        servicio.preparar().await.unwrap();

        let url = servicio.guardar("9", Some("acta.pdf"), b"%PDF-").await.unwrap();
        assert!(url.starts_with("/uploads/documento-9-"));

        let nombre = url.strip_prefix("/uploads/").unwrap();
        assert_eq!(servicio.leer(nombre).await.unwrap(), b"%PDF-");

        servicio.eliminar(nombre).await.unwrap();
        assert!(matches!(
            servicio.leer(nombre).await,
            Err(AppError::ArchivoNoEncontrado)
        ));
    }

    #[tokio::test]
    async fn eliminar_un_archivo_inexistente_es_404() {
        let dir = tempdir().unwrap();
        let servicio = ArchivoService::new(dir.path());
        servicio.preparar().await.unwrap();

        assert!(matches!(
            servicio.eliminar("no-existe.pdf").await,
            Err(AppError::ArchivoNoEncontrado)
        ));
    }

    #[tokio::test]
    async fn el_borrado_ignora_los_directorios_de_la_ruta() {
        let dir = tempdir().unwrap();
        let servicio = ArchivoService::new(dir.path());
        servicio.preparar().await.unwrap();

        let url = servicio.guardar("3", None, b"datos").await.unwrap();
        let nombre = url.strip_prefix("/uploads/").unwrap();

        // Un intento de traversal solo toca el nombre base.
        servicio
            .eliminar(&format!("../../../{nombre}"))
            .await
            .unwrap();
        assert!(matches!(
            servicio.leer(nombre).await,
            Err(AppError::ArchivoNoEncontrado)
        ));
    }

    #[test]
    fn content_type_por_extension() {
        assert_eq!(ArchivoService::content_type("a.pdf"), "application/pdf");
        assert_eq!(ArchivoService::content_type("a.PNG"), "image/png");
        assert_eq!(
            ArchivoService::content_type("a.bin"),
            "application/octet-stream"
        );
    }
}

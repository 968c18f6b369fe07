// src/services/inventario_service.rs

use crate::{
    common::error::AppError,
    db::InventarioRepository,
    models::inventario::{ActualizarInventario, InventarioNuevo, ItemInventario},
};

#[derive(Clone)]
pub struct InventarioService {
    repo: InventarioRepository,
}

impl InventarioService {
    pub fn new(repo: InventarioRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(&self) -> Result<Vec<ItemInventario>, AppError> {
        self.repo.listar(self.repo.pool()).await
    }

    pub async fn crear(&self, datos: &InventarioNuevo) -> Result<ItemInventario, AppError> {
        self.repo.insertar(self.repo.pool(), datos).await
    }

    pub async fn actualizar(&self, id: i32, datos: &ActualizarInventario) -> Result<(), AppError> {
        if datos.esta_vacio() {
            return Err(AppError::BadRequest(
                "No se enviaron campos para actualizar".to_string(),
            ));
        }

        let mut tx = self.repo.pool().begin().await?;

        if !self.repo.existe(&mut *tx, id).await? {
            return Err(AppError::NoEncontrado("Registro no encontrado"));
        }
        self.repo.actualizar(&mut *tx, id, datos).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn eliminar(&self, id: i32) -> Result<(), AppError> {
        let filas = self.repo.eliminar(self.repo.pool(), id).await?;
        if filas == 0 {
            return Err(AppError::NoEncontrado("Registro no encontrado"));
        }
        Ok(())
    }
}

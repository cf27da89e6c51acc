use std::sync::Arc;

use chrono::{DateTime, Utc};
use pedidos_types::domain::pedido::{NovoPedido, Pedido};
use pedidos_types::ports::repository::{Entidade, PedidoRepository, ReferenceLookup};

use super::validation::{verificar_referencias, Referencia};
use crate::errors::AppError;

pub const PEDIDO_NAO_ENCONTRADO: &str = "Pedido não encontrado";
pub const PEDIDO_EXCLUIDO: &str = "Pedido excluído com sucesso";
pub const ERRO_INCLUIR_PEDIDO: &str = "Erro ao incluir pedido";
pub const ERRO_ATUALIZAR_PEDIDO: &str = "Erro ao atualizar pedido";
const ERRO_BUSCAR_PEDIDO: &str = "Erro ao buscar pedido";
const ERRO_LISTAR_PEDIDOS: &str = "Erro ao listar pedidos";
const ERRO_EXCLUIR_PEDIDO: &str = "Erro ao excluir pedido";

pub struct PedidoService<R> {
    repo: Arc<R>,
}

impl<R: PedidoRepository + ReferenceLookup> PedidoService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A missing customer is reported as a generic creation failure (500).
    pub async fn create_pedido(
        &self,
        data: DateTime<Utc>,
        id_cliente: i64,
    ) -> Result<Pedido, AppError> {
        let referencia =
            verificar_referencias(&*self.repo, &[(Entidade::Cliente, id_cliente)])
                .await
                .map_err(|e| AppError::internal(ERRO_INCLUIR_PEDIDO, e))?;
        if let Referencia::NaoEncontrada(entidade, id) = referencia {
            return Err(AppError::internal(
                ERRO_INCLUIR_PEDIDO,
                anyhow::anyhow!("{} {} does not exist", entidade, id),
            ));
        }

        let pedido = self
            .repo
            .create_pedido(NovoPedido::new(data, id_cliente))
            .await
            .map_err(|e| AppError::internal(ERRO_INCLUIR_PEDIDO, e))?;
        tracing::info!(id = pedido.id, id_cliente, "pedido created");
        Ok(pedido)
    }

    pub async fn get_pedido(&self, id: i64) -> Result<Pedido, AppError> {
        match self
            .repo
            .find_pedido(id)
            .await
            .map_err(|e| AppError::internal(ERRO_BUSCAR_PEDIDO, e))?
        {
            Some(p) => Ok(p),
            None => Err(AppError::NotFound(PEDIDO_NAO_ENCONTRADO.into())),
        }
    }

    pub async fn list_pedidos(&self) -> Result<Vec<Pedido>, AppError> {
        self.repo
            .list_pedidos()
            .await
            .map_err(|e| AppError::internal(ERRO_LISTAR_PEDIDOS, e))
    }

    /// An unknown `id_cliente` surfaces from the store's foreign key and is
    /// reported as a generic update failure (500), not as a 404.
    pub async fn update_pedido(
        &self,
        id: i64,
        data: DateTime<Utc>,
        id_cliente: i64,
    ) -> Result<Pedido, AppError> {
        let existing = self
            .repo
            .find_pedido(id)
            .await
            .map_err(|e| AppError::internal(ERRO_ATUALIZAR_PEDIDO, e))?;
        if existing.is_none() {
            return Err(AppError::NotFound(PEDIDO_NAO_ENCONTRADO.into()));
        }

        match self
            .repo
            .update_pedido(id, data, id_cliente)
            .await
            .map_err(|e| AppError::internal(ERRO_ATUALIZAR_PEDIDO, e))?
        {
            Some(p) => {
                tracing::info!(id, id_cliente, "pedido updated");
                Ok(p)
            }
            None => Err(AppError::NotFound(PEDIDO_NAO_ENCONTRADO.into())),
        }
    }

    /// Deleting an unknown id still succeeds.
    pub async fn delete_pedido(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .repo
            .destroy_pedido(id)
            .await
            .map_err(|e| AppError::internal(ERRO_EXCLUIR_PEDIDO, e))?;
        if !deleted {
            tracing::debug!(id, "delete of unknown pedido");
        }
        Ok(())
    }
}

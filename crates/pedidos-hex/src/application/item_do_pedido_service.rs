use std::sync::Arc;

use pedidos_types::domain::item_do_pedido::{
    ItemDoPedido, ItemDoPedidoDetalhado, NovoItemDoPedido,
};
use pedidos_types::ports::repository::{Entidade, RepoError, Repository};

use super::validation::{verificar_referencias, Referencia};
use crate::errors::AppError;

pub const ITEM_NAO_ENCONTRADO: &str = "Item do Pedido não encontrado";
pub const ITEM_EXCLUIDO: &str = "Item do Pedido excluído com sucesso";
pub const PEDIDO_OU_PRODUTO_NAO_ENCONTRADO: &str = "Pedido ou Produto não encontrado";
const ERRO_INCLUIR_ITEM: &str = "Erro ao incluir item do pedido";
const ERRO_BUSCAR_ITEM: &str = "Erro ao buscar item do pedido";
const ERRO_LISTAR_ITENS: &str = "Erro ao listar itens do pedido";
const ERRO_EXCLUIR_ITEM: &str = "Erro ao excluir item do pedido";

pub struct ItemDoPedidoService<R> {
    repo: Arc<R>,
}

impl<R: Repository> ItemDoPedidoService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Both references are checked up front; a missing one is a 404.
    pub async fn create_item(
        &self,
        id_pedido: i64,
        id_produto: i64,
        qtdade: i64,
    ) -> Result<ItemDoPedido, AppError> {
        let referencia = verificar_referencias(
            &*self.repo,
            &[(Entidade::Pedido, id_pedido), (Entidade::Produto, id_produto)],
        )
        .await
        .map_err(|e| AppError::internal(ERRO_INCLUIR_ITEM, e))?;
        if let Referencia::NaoEncontrada(_, _) = referencia {
            return Err(AppError::NotFound(PEDIDO_OU_PRODUTO_NAO_ENCONTRADO.into()));
        }

        let item = self
            .repo
            .create_item(NovoItemDoPedido::new(id_pedido, id_produto, qtdade))
            .await
            .map_err(|e| AppError::internal(ERRO_INCLUIR_ITEM, e))?;
        tracing::info!(id = item.id, id_pedido, id_produto, "item do pedido created");
        Ok(item)
    }

    /// Loads the item with its order, product and the order's customer.
    pub async fn get_item(&self, id: i64) -> Result<ItemDoPedidoDetalhado, AppError> {
        let internal = |e: RepoError| AppError::internal(ERRO_BUSCAR_ITEM, e);

        let item = self
            .repo
            .find_item(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| AppError::NotFound(ITEM_NAO_ENCONTRADO.into()))?;
        let pedido = self.repo.find_pedido(item.id_pedido).await.map_err(internal)?;
        let produto = self
            .repo
            .find_produto(item.id_produto)
            .await
            .map_err(internal)?;
        let cliente = match &pedido {
            Some(p) => self.repo.find_cliente(p.id_cliente).await.map_err(internal)?,
            None => None,
        };

        Ok(ItemDoPedidoDetalhado {
            item,
            cliente,
            produto,
            pedido,
        })
    }

    pub async fn list_itens(&self) -> Result<Vec<ItemDoPedido>, AppError> {
        self.repo
            .list_itens()
            .await
            .map_err(|e| AppError::internal(ERRO_LISTAR_ITENS, e))
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .repo
            .destroy_item(id)
            .await
            .map_err(|e| AppError::internal(ERRO_EXCLUIR_ITEM, e))?;
        if !deleted {
            tracing::debug!(id, "delete of unknown item do pedido");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedidos_repo::memory::InMemoryRepo;
    use pedidos_types::domain::cliente::NovoCliente;
    use pedidos_types::domain::pedido::NovoPedido;
    use pedidos_types::domain::produto::NovoProduto;
    use pedidos_types::domain::timestamp;
    use pedidos_types::ports::repository::{
        ClienteRepository, ItemDoPedidoRepository, PedidoRepository, ProdutoRepository,
    };

    /// Store with cliente 1, pedido 1 and produto 3.
    async fn seeded_repo() -> Arc<InMemoryRepo> {
        let repo = InMemoryRepo::new();
        repo.create_cliente(NovoCliente::new("Ana", "12345678900").with_id(1))
            .await
            .unwrap();
        repo.create_pedido(
            NovoPedido::new(timestamp::parse("2024-08-01T07:11:40.000Z").unwrap(), 1).with_id(1),
        )
        .await
        .unwrap();
        repo.create_produto(NovoProduto::new("Caneta").with_id(3))
            .await
            .unwrap();
        Arc::new(repo)
    }

    #[tokio::test]
    async fn create_echoes_fields() {
        let svc = ItemDoPedidoService::new(seeded_repo().await);
        let item = svc.create_item(1, 3, 3).await.unwrap();
        assert_eq!((item.id_pedido, item.id_produto, item.qtdade), (1, 3, 3));
    }

    #[tokio::test]
    async fn create_with_missing_reference_is_not_found() {
        let svc = ItemDoPedidoService::new(seeded_repo().await);
        for (id_pedido, id_produto) in [(99999, 3), (1, 9999)] {
            let res = svc.create_item(id_pedido, id_produto, 3).await;
            assert!(matches!(
                res,
                Err(AppError::NotFound(m)) if m == PEDIDO_OU_PRODUTO_NAO_ENCONTRADO
            ));
        }
    }

    #[tokio::test]
    async fn get_embeds_related_records() {
        let repo = seeded_repo().await;
        let svc = ItemDoPedidoService::new(repo.clone());
        let item = svc.create_item(1, 3, 2).await.unwrap();

        let detalhado = svc.get_item(item.id).await.unwrap();
        assert_eq!(detalhado.item, item);
        assert_eq!(detalhado.cliente.unwrap().id, 1);
        assert_eq!(detalhado.produto.unwrap().descricao, "Caneta");
        assert_eq!(detalhado.pedido.unwrap().id, 1);
    }

    #[tokio::test]
    async fn get_and_delete_missing_item() {
        let repo = seeded_repo().await;
        let svc = ItemDoPedidoService::new(repo.clone());
        assert!(matches!(
            svc.get_item(999).await,
            Err(AppError::NotFound(m)) if m == ITEM_NAO_ENCONTRADO
        ));

        repo.create_item(NovoItemDoPedido::new(1, 3, 1).with_id(99))
            .await
            .unwrap();
        svc.delete_item(99).await.unwrap();
        assert!(repo.find_item(99).await.unwrap().is_none());
        svc.delete_item(99).await.unwrap();
        assert!(svc.list_itens().await.unwrap().is_empty());
    }
}

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::cliente::{Cliente, NovoCliente};
use crate::domain::item_do_pedido::{ItemDoPedido, NovoItemDoPedido};
use crate::domain::pedido::{NovoPedido, Pedido};
use crate::domain::produto::{NovoProduto, Produto};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),

    /// Foreign-key or primary-key constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Persisted entity kinds, used to address existence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entidade {
    Cliente,
    Produto,
    Pedido,
    ItemDoPedido,
}

impl fmt::Display for Entidade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entidade::Cliente => "cliente",
            Entidade::Produto => "produto",
            Entidade::Pedido => "pedido",
            Entidade::ItemDoPedido => "item do pedido",
        };
        f.write_str(name)
    }
}

#[async_trait]
pub trait ClienteRepository: Send + Sync + 'static {
    async fn create_cliente(&self, cliente: NovoCliente) -> Result<Cliente, RepoError>;
    async fn find_cliente(&self, id: i64) -> Result<Option<Cliente>, RepoError>;
}

#[async_trait]
pub trait ProdutoRepository: Send + Sync + 'static {
    async fn create_produto(&self, produto: NovoProduto) -> Result<Produto, RepoError>;
    async fn find_produto(&self, id: i64) -> Result<Option<Produto>, RepoError>;
    async fn list_produtos(&self) -> Result<Vec<Produto>, RepoError>;
    async fn update_produto(
        &self,
        id: i64,
        descricao: String,
    ) -> Result<Option<Produto>, RepoError>;
    async fn destroy_produto(&self, id: i64) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait PedidoRepository: Send + Sync + 'static {
    async fn create_pedido(&self, pedido: NovoPedido) -> Result<Pedido, RepoError>;
    async fn find_pedido(&self, id: i64) -> Result<Option<Pedido>, RepoError>;
    async fn list_pedidos(&self) -> Result<Vec<Pedido>, RepoError>;
    async fn update_pedido(
        &self,
        id: i64,
        data: DateTime<Utc>,
        id_cliente: i64,
    ) -> Result<Option<Pedido>, RepoError>;
    async fn destroy_pedido(&self, id: i64) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait ItemDoPedidoRepository: Send + Sync + 'static {
    async fn create_item(&self, item: NovoItemDoPedido) -> Result<ItemDoPedido, RepoError>;
    async fn find_item(&self, id: i64) -> Result<Option<ItemDoPedido>, RepoError>;
    async fn list_itens(&self) -> Result<Vec<ItemDoPedido>, RepoError>;
    async fn destroy_item(&self, id: i64) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait ReferenceLookup: Send + Sync + 'static {
    async fn exists(&self, entidade: Entidade, id: i64) -> Result<bool, RepoError>;
}

/// Every port a full data store adapter provides.
pub trait Repository:
    ClienteRepository + ProdutoRepository + PedidoRepository + ItemDoPedidoRepository + ReferenceLookup
{
}

impl<T> Repository for T where
    T: ClienteRepository
        + ProdutoRepository
        + PedidoRepository
        + ItemDoPedidoRepository
        + ReferenceLookup
{
}

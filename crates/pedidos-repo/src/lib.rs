#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pedidos_types::domain::cliente::{Cliente, NovoCliente};
use pedidos_types::domain::item_do_pedido::{ItemDoPedido, NovoItemDoPedido};
use pedidos_types::domain::pedido::{NovoPedido, Pedido};
use pedidos_types::domain::produto::{NovoProduto, Produto};
use pedidos_types::ports::repository::{
    ClienteRepository, Entidade, ItemDoPedidoRepository, PedidoRepository, ProdutoRepository,
    ReferenceLookup, RepoError,
};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub const DEFAULT_DATABASE_URL: &str = "sqlite://pedidos.db";

/// Adapter selected at startup.
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        tracing::info!("using in-memory repository");
        Ok(Repo::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or(DEFAULT_DATABASE_URL);
        tracing::info!(url, "using sqlite repository");
        Ok(Repo::Sqlite(sqlite::SqliteRepo::new(url).await?))
    }

    // With both adapters compiled in, a configured URL selects sqlite.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => {
                tracing::info!(url, "using sqlite repository");
                Ok(Repo::Sqlite(sqlite::SqliteRepo::new(url).await?))
            }
            None => {
                tracing::info!("using in-memory repository");
                Ok(Repo::Memory(memory::InMemoryRepo::new()))
            }
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $repo:ident => $call:expr) => {
        match $self {
            #[cfg(feature = "memory")]
            Repo::Memory($repo) => $call,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite($repo) => $call,
        }
    };
}

#[async_trait]
impl ClienteRepository for Repo {
    async fn create_cliente(&self, cliente: NovoCliente) -> Result<Cliente, RepoError> {
        dispatch!(self, r => r.create_cliente(cliente).await)
    }

    async fn find_cliente(&self, id: i64) -> Result<Option<Cliente>, RepoError> {
        dispatch!(self, r => r.find_cliente(id).await)
    }
}

#[async_trait]
impl ProdutoRepository for Repo {
    async fn create_produto(&self, produto: NovoProduto) -> Result<Produto, RepoError> {
        dispatch!(self, r => r.create_produto(produto).await)
    }

    async fn find_produto(&self, id: i64) -> Result<Option<Produto>, RepoError> {
        dispatch!(self, r => r.find_produto(id).await)
    }

    async fn list_produtos(&self) -> Result<Vec<Produto>, RepoError> {
        dispatch!(self, r => r.list_produtos().await)
    }

    async fn update_produto(
        &self,
        id: i64,
        descricao: String,
    ) -> Result<Option<Produto>, RepoError> {
        dispatch!(self, r => r.update_produto(id, descricao).await)
    }

    async fn destroy_produto(&self, id: i64) -> Result<bool, RepoError> {
        dispatch!(self, r => r.destroy_produto(id).await)
    }
}

#[async_trait]
impl PedidoRepository for Repo {
    async fn create_pedido(&self, pedido: NovoPedido) -> Result<Pedido, RepoError> {
        dispatch!(self, r => r.create_pedido(pedido).await)
    }

    async fn find_pedido(&self, id: i64) -> Result<Option<Pedido>, RepoError> {
        dispatch!(self, r => r.find_pedido(id).await)
    }

    async fn list_pedidos(&self) -> Result<Vec<Pedido>, RepoError> {
        dispatch!(self, r => r.list_pedidos().await)
    }

    async fn update_pedido(
        &self,
        id: i64,
        data: DateTime<Utc>,
        id_cliente: i64,
    ) -> Result<Option<Pedido>, RepoError> {
        dispatch!(self, r => r.update_pedido(id, data, id_cliente).await)
    }

    async fn destroy_pedido(&self, id: i64) -> Result<bool, RepoError> {
        dispatch!(self, r => r.destroy_pedido(id).await)
    }
}

#[async_trait]
impl ItemDoPedidoRepository for Repo {
    async fn create_item(&self, item: NovoItemDoPedido) -> Result<ItemDoPedido, RepoError> {
        dispatch!(self, r => r.create_item(item).await)
    }

    async fn find_item(&self, id: i64) -> Result<Option<ItemDoPedido>, RepoError> {
        dispatch!(self, r => r.find_item(id).await)
    }

    async fn list_itens(&self) -> Result<Vec<ItemDoPedido>, RepoError> {
        dispatch!(self, r => r.list_itens().await)
    }

    async fn destroy_item(&self, id: i64) -> Result<bool, RepoError> {
        dispatch!(self, r => r.destroy_item(id).await)
    }
}

#[async_trait]
impl ReferenceLookup for Repo {
    async fn exists(&self, entidade: Entidade, id: i64) -> Result<bool, RepoError> {
        dispatch!(self, r => r.exists(entidade, id).await)
    }
}

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pedidos_types::domain::cliente::{Cliente, NovoCliente};
use pedidos_types::domain::item_do_pedido::{ItemDoPedido, NovoItemDoPedido};
use pedidos_types::domain::pedido::{NovoPedido, Pedido};
use pedidos_types::domain::produto::{NovoProduto, Produto};
use pedidos_types::ports::repository::{
    ClienteRepository, Entidade, ItemDoPedidoRepository, PedidoRepository, ProdutoRepository,
    ReferenceLookup, RepoError,
};

/// Rows of one entity keyed by primary key, with an auto-increment counter.
struct Table<T> {
    rows: DashMap<i64, T>,
    last_id: AtomicI64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&self, id: Option<i64>, build: impl FnOnce(i64) -> T) -> Result<T, RepoError> {
        let id = match id {
            Some(id) => {
                self.last_id.fetch_max(id, Ordering::SeqCst);
                id
            }
            None => self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        match self.rows.entry(id) {
            Entry::Occupied(_) => Err(RepoError::ConstraintViolation(format!(
                "duplicate primary key {id}"
            ))),
            Entry::Vacant(slot) => {
                let row = build(id);
                slot.insert(row.clone());
                Ok(row)
            }
        }
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).map(|r| r.clone())
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn list(&self) -> Vec<T> {
        let mut rows: Vec<(i64, T)> = self
            .rows
            .iter()
            .map(|kv| (*kv.key(), kv.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn remove(&self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Default)]
struct Tables {
    clientes: Table<Cliente>,
    produtos: Table<Produto>,
    pedidos: Table<Pedido>,
    itens: Table<ItemDoPedido>,
}

/// Process-local store enforcing the same keys and foreign keys as the
/// relational schema. Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    tables: Arc<Tables>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing_reference(entidade: Entidade, id: i64) -> RepoError {
    RepoError::ConstraintViolation(format!("{entidade} {id} does not exist"))
}

fn still_referenced(entidade: Entidade, id: i64) -> RepoError {
    RepoError::ConstraintViolation(format!("{entidade} {id} is still referenced"))
}

#[async_trait]
impl ClienteRepository for InMemoryRepo {
    async fn create_cliente(&self, cliente: NovoCliente) -> Result<Cliente, RepoError> {
        self.tables.clientes.insert(cliente.id, |id| Cliente {
            id,
            nome: cliente.nome,
            cpf: cliente.cpf,
        })
    }

    async fn find_cliente(&self, id: i64) -> Result<Option<Cliente>, RepoError> {
        Ok(self.tables.clientes.get(id))
    }
}

#[async_trait]
impl ProdutoRepository for InMemoryRepo {
    async fn create_produto(&self, produto: NovoProduto) -> Result<Produto, RepoError> {
        let id = produto.id;
        self.tables
            .produtos
            .insert(id, |id| produto.into_produto(id))
    }

    async fn find_produto(&self, id: i64) -> Result<Option<Produto>, RepoError> {
        Ok(self.tables.produtos.get(id))
    }

    async fn list_produtos(&self) -> Result<Vec<Produto>, RepoError> {
        Ok(self.tables.produtos.list())
    }

    async fn update_produto(
        &self,
        id: i64,
        descricao: String,
    ) -> Result<Option<Produto>, RepoError> {
        if let Some(mut v) = self.tables.produtos.rows.get_mut(&id) {
            v.descricao = descricao;
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn destroy_produto(&self, id: i64) -> Result<bool, RepoError> {
        if self
            .tables
            .itens
            .rows
            .iter()
            .any(|kv| kv.value().id_produto == id)
        {
            return Err(still_referenced(Entidade::Produto, id));
        }
        Ok(self.tables.produtos.remove(id))
    }
}

#[async_trait]
impl PedidoRepository for InMemoryRepo {
    async fn create_pedido(&self, pedido: NovoPedido) -> Result<Pedido, RepoError> {
        if !self.tables.clientes.contains(pedido.id_cliente) {
            return Err(missing_reference(Entidade::Cliente, pedido.id_cliente));
        }
        let id = pedido.id;
        self.tables.pedidos.insert(id, |id| pedido.into_pedido(id))
    }

    async fn find_pedido(&self, id: i64) -> Result<Option<Pedido>, RepoError> {
        Ok(self.tables.pedidos.get(id))
    }

    async fn list_pedidos(&self) -> Result<Vec<Pedido>, RepoError> {
        Ok(self.tables.pedidos.list())
    }

    async fn update_pedido(
        &self,
        id: i64,
        data: DateTime<Utc>,
        id_cliente: i64,
    ) -> Result<Option<Pedido>, RepoError> {
        if !self.tables.pedidos.contains(id) {
            return Ok(None);
        }
        if !self.tables.clientes.contains(id_cliente) {
            return Err(missing_reference(Entidade::Cliente, id_cliente));
        }
        if let Some(mut v) = self.tables.pedidos.rows.get_mut(&id) {
            v.update(data, id_cliente);
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn destroy_pedido(&self, id: i64) -> Result<bool, RepoError> {
        if self
            .tables
            .itens
            .rows
            .iter()
            .any(|kv| kv.value().id_pedido == id)
        {
            return Err(still_referenced(Entidade::Pedido, id));
        }
        Ok(self.tables.pedidos.remove(id))
    }
}

#[async_trait]
impl ItemDoPedidoRepository for InMemoryRepo {
    async fn create_item(&self, item: NovoItemDoPedido) -> Result<ItemDoPedido, RepoError> {
        if !self.tables.pedidos.contains(item.id_pedido) {
            return Err(missing_reference(Entidade::Pedido, item.id_pedido));
        }
        if !self.tables.produtos.contains(item.id_produto) {
            return Err(missing_reference(Entidade::Produto, item.id_produto));
        }
        let id = item.id;
        self.tables.itens.insert(id, |id| item.into_item(id))
    }

    async fn find_item(&self, id: i64) -> Result<Option<ItemDoPedido>, RepoError> {
        Ok(self.tables.itens.get(id))
    }

    async fn list_itens(&self) -> Result<Vec<ItemDoPedido>, RepoError> {
        Ok(self.tables.itens.list())
    }

    async fn destroy_item(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.tables.itens.remove(id))
    }
}

#[async_trait]
impl ReferenceLookup for InMemoryRepo {
    async fn exists(&self, entidade: Entidade, id: i64) -> Result<bool, RepoError> {
        let found = match entidade {
            Entidade::Cliente => self.tables.clientes.contains(id),
            Entidade::Produto => self.tables.produtos.contains(id),
            Entidade::Pedido => self.tables.pedidos.contains(id),
            Entidade::ItemDoPedido => self.tables.itens.contains(id),
        };
        Ok(found)
    }
}

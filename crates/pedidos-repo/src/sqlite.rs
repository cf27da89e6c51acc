use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pedidos_types::domain::cliente::{Cliente, NovoCliente};
use pedidos_types::domain::item_do_pedido::{ItemDoPedido, NovoItemDoPedido};
use pedidos_types::domain::pedido::{NovoPedido, Pedido};
use pedidos_types::domain::produto::{NovoProduto, Produto};
use pedidos_types::domain::timestamp;
use pedidos_types::ports::repository::{
    ClienteRepository, Entidade, ItemDoPedidoRepository, PedidoRepository, ProdutoRepository,
    ReferenceLookup, RepoError,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};

const MIGRATIONS: &[&str] = &[
    include_str!("../migrations/0001_create_clientes.sql"),
    include_str!("../migrations/0002_create_produtos.sql"),
    include_str!("../migrations/0003_create_pedidos.sql"),
    include_str!("../migrations/0004_create_itens_do_pedido.sql"),
];

pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbCliente {
    id: i64,
    nome: String,
    cpf: String,
}

impl From<DbCliente> for Cliente {
    fn from(row: DbCliente) -> Self {
        Cliente {
            id: row.id,
            nome: row.nome,
            cpf: row.cpf,
        }
    }
}

#[derive(FromRow)]
struct DbProduto {
    id: i64,
    descricao: String,
}

impl From<DbProduto> for Produto {
    fn from(row: DbProduto) -> Self {
        Produto {
            id: row.id,
            descricao: row.descricao,
        }
    }
}

#[derive(FromRow)]
struct DbPedido {
    id: i64,
    data: String,
    id_cliente: i64,
}

impl DbPedido {
    fn into_pedido(self) -> Result<Pedido, RepoError> {
        let data = timestamp::parse(&self.data).map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(Pedido {
            id: self.id,
            data,
            id_cliente: self.id_cliente,
        })
    }
}

#[derive(FromRow)]
struct DbItemDoPedido {
    id: i64,
    id_pedido: i64,
    id_produto: i64,
    qtdade: i64,
}

impl From<DbItemDoPedido> for ItemDoPedido {
    fn from(row: DbItemDoPedido) -> Self {
        ItemDoPedido {
            id: row.id,
            id_pedido: row.id_pedido,
            id_produto: row.id_produto,
            qtdade: row.qtdade,
        }
    }
}

fn db_error(e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() || db.is_unique_violation() {
            return RepoError::ConstraintViolation(db.message().to_string());
        }
    }
    RepoError::DbError(e.to_string())
}

fn table(entidade: Entidade) -> &'static str {
    match entidade {
        Entidade::Cliente => "clientes",
        Entidade::Produto => "produtos",
        Entidade::Pedido => "pedidos",
        Entidade::ItemDoPedido => "itens_do_pedido",
    }
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` opens its own database, and closing
        // it drops the data. Keep exactly one connection alive forever.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        for ddl in MIGRATIONS {
            sqlx::query(*ddl).execute(&pool).await?;
        }
        tracing::debug!(database_url, "sqlite schema ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl ClienteRepository for SqliteRepo {
    async fn create_cliente(&self, cliente: NovoCliente) -> Result<Cliente, RepoError> {
        let res = sqlx::query("INSERT INTO clientes (id, nome, cpf) VALUES (?, ?, ?)")
            .bind(cliente.id)
            .bind(&cliente.nome)
            .bind(&cliente.cpf)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(Cliente {
            id: res.last_insert_rowid(),
            nome: cliente.nome,
            cpf: cliente.cpf,
        })
    }

    async fn find_cliente(&self, id: i64) -> Result<Option<Cliente>, RepoError> {
        let row: Option<DbCliente> =
            sqlx::query_as("SELECT id, nome, cpf FROM clientes WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(row.map(Cliente::from))
    }
}

#[async_trait]
impl ProdutoRepository for SqliteRepo {
    async fn create_produto(&self, produto: NovoProduto) -> Result<Produto, RepoError> {
        let res = sqlx::query("INSERT INTO produtos (id, descricao) VALUES (?, ?)")
            .bind(produto.id)
            .bind(&produto.descricao)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(produto.into_produto(res.last_insert_rowid()))
    }

    async fn find_produto(&self, id: i64) -> Result<Option<Produto>, RepoError> {
        let row: Option<DbProduto> =
            sqlx::query_as("SELECT id, descricao FROM produtos WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(row.map(Produto::from))
    }

    async fn list_produtos(&self) -> Result<Vec<Produto>, RepoError> {
        let rows: Vec<DbProduto> = sqlx::query_as("SELECT id, descricao FROM produtos ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Produto::from).collect())
    }

    async fn update_produto(
        &self,
        id: i64,
        descricao: String,
    ) -> Result<Option<Produto>, RepoError> {
        let updated = sqlx::query("UPDATE produtos SET descricao = ? WHERE id = ?")
            .bind(descricao)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_produto(id).await
    }

    async fn destroy_produto(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM produtos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl PedidoRepository for SqliteRepo {
    async fn create_pedido(&self, pedido: NovoPedido) -> Result<Pedido, RepoError> {
        let res = sqlx::query("INSERT INTO pedidos (id, data, id_cliente) VALUES (?, ?, ?)")
            .bind(pedido.id)
            .bind(timestamp::format(&pedido.data))
            .bind(pedido.id_cliente)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(pedido.into_pedido(res.last_insert_rowid()))
    }

    async fn find_pedido(&self, id: i64) -> Result<Option<Pedido>, RepoError> {
        let row: Option<DbPedido> =
            sqlx::query_as("SELECT id, data, id_cliente FROM pedidos WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        row.map(|r| r.into_pedido()).transpose()
    }

    async fn list_pedidos(&self) -> Result<Vec<Pedido>, RepoError> {
        let rows: Vec<DbPedido> =
            sqlx::query_as("SELECT id, data, id_cliente FROM pedidos ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;
        rows.into_iter()
            .map(|r| r.into_pedido())
            .collect::<Result<Vec<_>, _>>()
    }

    async fn update_pedido(
        &self,
        id: i64,
        data: DateTime<Utc>,
        id_cliente: i64,
    ) -> Result<Option<Pedido>, RepoError> {
        let updated = sqlx::query("UPDATE pedidos SET data = ?, id_cliente = ? WHERE id = ?")
            .bind(timestamp::format(&data))
            .bind(id_cliente)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_pedido(id).await
    }

    async fn destroy_pedido(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM pedidos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl ItemDoPedidoRepository for SqliteRepo {
    async fn create_item(&self, item: NovoItemDoPedido) -> Result<ItemDoPedido, RepoError> {
        let res = sqlx::query(
            "INSERT INTO itens_do_pedido (id, id_pedido, id_produto, qtdade) VALUES (?, ?, ?, ?)",
        )
        .bind(item.id)
        .bind(item.id_pedido)
        .bind(item.id_produto)
        .bind(item.qtdade)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(item.into_item(res.last_insert_rowid()))
    }

    async fn find_item(&self, id: i64) -> Result<Option<ItemDoPedido>, RepoError> {
        let row: Option<DbItemDoPedido> = sqlx::query_as(
            "SELECT id, id_pedido, id_produto, qtdade FROM itens_do_pedido WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(ItemDoPedido::from))
    }

    async fn list_itens(&self) -> Result<Vec<ItemDoPedido>, RepoError> {
        let rows: Vec<DbItemDoPedido> = sqlx::query_as(
            "SELECT id, id_pedido, id_produto, qtdade FROM itens_do_pedido ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(ItemDoPedido::from).collect())
    }

    async fn destroy_item(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM itens_do_pedido WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl ReferenceLookup for SqliteRepo {
    async fn exists(&self, entidade: Entidade, id: i64) -> Result<bool, RepoError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)",
            table(entidade)
        );
        let found: i64 = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(found != 0)
    }
}

//! Per-test server fixture. Each test owns its store; dropping the fixture
//! stops the server and removes any temporary database, whether the test
//! passed or panicked.

#![allow(dead_code)]

use pedidos_hex::inbound::http::{HttpServer, HttpServerConfig};
use pedidos_repo::memory::InMemoryRepo;
use pedidos_repo::{build_repo, Repo};
use pedidos_types::domain::cliente::NovoCliente;
use pedidos_types::domain::pedido::NovoPedido;
use pedidos_types::domain::produto::NovoProduto;
use pedidos_types::domain::timestamp;
use pedidos_types::ports::repository::Repository;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestApp<R> {
    pub addr: String,
    pub client: reqwest::Client,
    pub repo: R,
    handle: JoinHandle<()>,
    _db_dir: Option<tempfile::TempDir>,
}

impl<R> TestApp<R> {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

impl<R> Drop for TestApp<R> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn start<R: Repository>(repo: R) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(
        repo,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await
    .unwrap();
    let handle = tokio::spawn(async move {
        server.serve(listener).await.expect("server run");
    });
    (format!("http://127.0.0.1:{port}"), handle)
}

/// Cliente 1, pedido 1 (2024-08-01T07:11:40.000Z) and produto 3, mirroring the
/// rows the API expects to find in a fresh database.
pub async fn seed<R: Repository>(repo: &R) {
    repo.create_cliente(NovoCliente::new("Cliente Teste", "12345678900").with_id(1))
        .await
        .unwrap();
    repo.create_pedido(
        NovoPedido::new(timestamp::parse("2024-08-01T07:11:40.000Z").unwrap(), 1).with_id(1),
    )
    .await
    .unwrap();
    repo.create_produto(NovoProduto::new("Produto Teste").with_id(3))
        .await
        .unwrap();
}

/// Server over a seeded in-memory store; the test keeps a handle to the
/// same tables for fixtures and assertions.
pub async fn spawn_app() -> TestApp<InMemoryRepo> {
    let repo = InMemoryRepo::new();
    seed(&repo).await;
    let (addr, handle) = start(repo.clone()).await;
    TestApp {
        addr,
        client: reqwest::Client::new(),
        repo,
        handle,
        _db_dir: None,
    }
}

/// Server over a seeded sqlite database in a temporary directory.
pub async fn spawn_sqlite_app() -> TestApp<()> {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("pedidos.db").display());
    let repo: Repo = build_repo(Some(&url)).await.expect("build repo");
    seed(&repo).await;
    let (addr, handle) = start(repo).await;
    TestApp {
        addr,
        client: reqwest::Client::new(),
        repo: (),
        handle,
        _db_dir: Some(dir),
    }
}

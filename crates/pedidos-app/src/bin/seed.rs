//! Ensures the demo customer and a few products exist.
//!
//! Uses the same `DATABASE_URL` as the server.

use pedidos_hex::config::Config;
use pedidos_repo::{build_repo, Repo};
use pedidos_types::domain::cliente::{Cliente, NovoCliente};
use pedidos_types::domain::produto::NovoProduto;
use pedidos_types::ports::repository::{ClienteRepository, ProdutoRepository};

const PRODUTOS: &[&str] = &["Caderno universitário", "Caneta azul", "Lápis HB"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo: Repo = build_repo(config.database_url.as_deref()).await?;

    let cliente = ensure_cliente(&repo).await?;
    let criados = seed_produtos(&repo).await?;

    println!(
        "Seed completed. Cliente ID: {}, produtos criados: {criados}",
        cliente.id
    );
    Ok(())
}

async fn ensure_cliente(repo: &Repo) -> anyhow::Result<Cliente> {
    if let Some(cliente) = repo.find_cliente(1).await? {
        return Ok(cliente);
    }
    let cliente = repo
        .create_cliente(NovoCliente::new("Cliente Demo", "00000000000").with_id(1))
        .await?;
    tracing::info!(id = cliente.id, "cliente created");
    Ok(cliente)
}

async fn seed_produtos(repo: &Repo) -> anyhow::Result<usize> {
    let existentes = repo.list_produtos().await?;
    let mut criados = 0;
    for descricao in PRODUTOS {
        if existentes.iter().any(|p| p.descricao == *descricao) {
            continue;
        }
        repo.create_produto(NovoProduto::new(*descricao)).await?;
        criados += 1;
    }
    Ok(criados)
}

use pedidos_repo::{build_repo, Repo};
use pedidos_types::ports::repository::{PedidoRepository, ProdutoRepository};

#[tokio::test]
async fn builds_repo_from_database_url() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pedidos-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo: Repo = build_repo(Some(&url)).await.expect("build repo");
    // basic sanity: lists should succeed and be empty
    assert!(repo.list_pedidos().await.expect("list").is_empty());
    assert!(repo.list_produtos().await.expect("list").is_empty());
}

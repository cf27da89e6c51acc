use pedidos_client::{ApiError, PedidosClient};
use pedidos_hex::inbound::http::{HttpServer, HttpServerConfig};
use pedidos_repo::{build_repo, Repo};
use pedidos_types::api::{ItemDoPedidoRequest, PedidoRequest};
use pedidos_types::domain::cliente::NovoCliente;
use pedidos_types::domain::timestamp;
use pedidos_types::ports::repository::ClienteRepository;
use tokio::net::TcpListener;

struct ServerGuard(tokio::task::JoinHandle<()>);

impl Drop for ServerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

// Full stack: typed client -> HTTP -> services -> sqlite file.
#[tokio::test]
async fn client_drives_every_route() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("pedidos.db").display());
    let repo: Repo = build_repo(Some(&url)).await.unwrap();
    let cliente = repo
        .create_cliente(NovoCliente::new("Cliente", "12345678900"))
        .await
        .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(
        repo,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await
    .unwrap();
    let _guard = ServerGuard(tokio::spawn(async move {
        server.serve(listener).await.expect("server run");
    }));

    let client = PedidosClient::new(&format!("http://127.0.0.1:{port}/")).unwrap();

    let produto = client.incluir_produto("Produto de teste").await.unwrap();
    let pedido = client
        .incluir_pedido(&PedidoRequest {
            data: timestamp::parse("2024-08-01T07:11:40.000Z").unwrap(),
            id_cliente: cliente.id,
        })
        .await
        .unwrap();
    let item = client
        .incluir_item_do_pedido(&ItemDoPedidoRequest {
            id_pedido: pedido.id,
            id_produto: produto.id,
            qtdade: 3,
        })
        .await
        .unwrap();

    let detalhado = client.get_item_do_pedido(item.id).await.unwrap();
    assert_eq!(detalhado.pedido, Some(pedido.clone()));
    assert_eq!(detalhado.produto, Some(produto.clone()));
    assert_eq!(detalhado.cliente.map(|c| c.id), Some(cliente.id));

    let nova_data = timestamp::parse("2024-08-19T07:11:40.000Z").unwrap();
    let atualizado = client
        .atualizar_pedido(
            pedido.id,
            &PedidoRequest {
                data: nova_data,
                id_cliente: cliente.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(atualizado.data, nova_data);
    assert_eq!(client.get_pedido(pedido.id).await.unwrap(), atualizado);

    let produto = client
        .atualizar_produto(produto.id, "produto Atualizado")
        .await
        .unwrap();
    assert_eq!(client.listar_produtos().await.unwrap(), vec![produto.clone()]);

    assert_eq!(
        client.excluir_item_do_pedido(item.id).await.unwrap(),
        "Item do Pedido excluído com sucesso"
    );
    assert!(client.listar_itens_do_pedido().await.unwrap().is_empty());
    assert_eq!(
        client.excluir_pedido(pedido.id).await.unwrap(),
        "Pedido excluído com sucesso"
    );
    assert!(client.listar_pedidos().await.unwrap().is_empty());
    assert_eq!(
        client.excluir_produto(produto.id).await.unwrap(),
        "Produto excluído com sucesso"
    );

    let err = client.get_produto(produto.id).await.unwrap_err();
    let api = err.downcast_ref::<ApiError>().expect("api error");
    assert_eq!(api.status.as_u16(), 404);
    assert_eq!(api.message, "Produto não encontrado");
}

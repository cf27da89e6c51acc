use axum::{
    routing::{delete, get, post, put},
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use super::handlers::{itens_do_pedido, pedidos, produtos};
use crate::application::item_do_pedido_service::ItemDoPedidoService;
use crate::application::pedido_service::PedidoService;
use crate::application::produto_service::ProdutoService;
use pedidos_types::ports::repository::Repository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

/// Services shared by every handler; all of them sit on the same store.
pub struct AppState<R> {
    pub pedidos: Arc<PedidoService<R>>,
    pub itens: Arc<ItemDoPedidoService<R>>,
    pub produtos: Arc<ProdutoService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            pedidos: self.pedidos.clone(),
            itens: self.itens.clone(),
            produtos: self.produtos.clone(),
        }
    }
}

impl<R: Repository> AppState<R> {
    pub fn new(repo: R) -> Self {
        let repo = Arc::new(repo);
        Self {
            pedidos: Arc::new(PedidoService::new(repo.clone())),
            itens: Arc::new(ItemDoPedidoService::new(repo.clone())),
            produtos: Arc::new(ProdutoService::new(repo)),
        }
    }
}

#[derive(Clone)]
pub struct HttpServer<R> {
    pub state: AppState<R>,
    pub config: HttpServerConfig,
}

impl<R: Repository> HttpServer<R> {
    pub async fn new(repo: R, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState::new(repo),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        Router::new()
            .route("/health", get(health))
            .route("/incluirPedido", post(pedidos::incluir_pedido::<R>))
            .route("/pedidos/{id}", get(pedidos::get_pedido::<R>))
            .route("/Pedidos", get(pedidos::listar_pedidos::<R>))
            .route("/atualizarPedido/{id}", put(pedidos::atualizar_pedido::<R>))
            .route("/excluirPedido/{id}", delete(pedidos::excluir_pedido::<R>))
            .route(
                "/incluirItemDoPedido",
                post(itens_do_pedido::incluir_item_do_pedido::<R>),
            )
            .route(
                "/itensDoPedido/{id}",
                get(itens_do_pedido::get_item_do_pedido::<R>),
            )
            .route(
                "/itensDoPedido",
                get(itens_do_pedido::listar_itens_do_pedido::<R>),
            )
            .route(
                "/excluirItemDoPedido/{id}",
                delete(itens_do_pedido::excluir_item_do_pedido::<R>),
            )
            .route("/incluirProduto", post(produtos::incluir_produto::<R>))
            .route("/produtos/{id}", get(produtos::get_produto::<R>))
            .route("/produtos", get(produtos::listar_produtos::<R>))
            .route("/atualizarProduto/{id}", put(produtos::atualizar_produto::<R>))
            .route("/excluirProduto/{id}", delete(produtos::excluir_produto::<R>))
            .layer(trace_layer)
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let app = self.router();
        tracing::info!("starting server on {}", listener.local_addr()?);
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pedidos_types::api::{ListaPedidos, Mensagem, PedidoRequest};
use pedidos_types::domain::pedido::Pedido;
use pedidos_types::ports::repository::Repository;

use crate::application::pedido_service::PEDIDO_EXCLUIDO;
use crate::errors::{parse_id, AppError};
use crate::inbound::http::AppState;

pub async fn incluir_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<PedidoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pedido>), AppError> {
    let Json(payload) = payload?;
    let pedido = state
        .pedidos
        .create_pedido(payload.data, payload.id_cliente)
        .await?;
    Ok((StatusCode::CREATED, Json(pedido)))
}

pub async fn get_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Pedido>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.pedidos.get_pedido(id).await?))
}

pub async fn listar_pedidos<R: Repository>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListaPedidos>, AppError> {
    let pedidos = state.pedidos.list_pedidos().await?;
    Ok(Json(ListaPedidos { pedidos }))
}

pub async fn atualizar_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<PedidoRequest>, JsonRejection>,
) -> Result<Json<Pedido>, AppError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let pedido = state
        .pedidos
        .update_pedido(id, payload.data, payload.id_cliente)
        .await?;
    Ok(Json(pedido))
}

pub async fn excluir_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Mensagem>, AppError> {
    let id = parse_id(&id)?;
    state.pedidos.delete_pedido(id).await?;
    Ok(Json(Mensagem::new(PEDIDO_EXCLUIDO)))
}

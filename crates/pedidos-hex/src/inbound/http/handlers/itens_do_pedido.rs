use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pedidos_types::api::{ItemDoPedidoRequest, ItemDoPedidoResposta, ListaItensDoPedido, Mensagem};
use pedidos_types::domain::item_do_pedido::ItemDoPedido;
use pedidos_types::ports::repository::Repository;

use crate::application::item_do_pedido_service::ITEM_EXCLUIDO;
use crate::errors::{parse_id, AppError};
use crate::inbound::http::AppState;

pub async fn incluir_item_do_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<ItemDoPedidoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemDoPedido>), AppError> {
    let Json(payload) = payload?;
    let item = state
        .itens
        .create_item(payload.id_pedido, payload.id_produto, payload.qtdade)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item_do_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<ItemDoPedidoResposta>, AppError> {
    let id = parse_id(&id)?;
    let item_do_pedido = state.itens.get_item(id).await?;
    Ok(Json(ItemDoPedidoResposta { item_do_pedido }))
}

pub async fn listar_itens_do_pedido<R: Repository>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListaItensDoPedido>, AppError> {
    let itens_do_pedido = state.itens.list_itens().await?;
    Ok(Json(ListaItensDoPedido { itens_do_pedido }))
}

pub async fn excluir_item_do_pedido<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Mensagem>, AppError> {
    let id = parse_id(&id)?;
    state.itens.delete_item(id).await?;
    Ok(Json(Mensagem::new(ITEM_EXCLUIDO)))
}

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pedidos_types::api::{ListaProdutos, Mensagem, ProdutoRequest};
use pedidos_types::domain::produto::Produto;
use pedidos_types::ports::repository::Repository;

use crate::application::produto_service::PRODUTO_EXCLUIDO;
use crate::errors::{parse_id, AppError};
use crate::inbound::http::AppState;

pub async fn incluir_produto<R: Repository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<ProdutoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Produto>), AppError> {
    let Json(payload) = payload?;
    let produto = state.produtos.create_produto(payload.descricao).await?;
    Ok((StatusCode::CREATED, Json(produto)))
}

pub async fn get_produto<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Produto>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.produtos.get_produto(id).await?))
}

pub async fn listar_produtos<R: Repository>(
    State(state): State<AppState<R>>,
) -> Result<Json<ListaProdutos>, AppError> {
    let produtos = state.produtos.list_produtos().await?;
    Ok(Json(ListaProdutos { produtos }))
}

pub async fn atualizar_produto<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<ProdutoRequest>, JsonRejection>,
) -> Result<Json<Produto>, AppError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let produto = state
        .produtos
        .update_produto(id, payload.descricao)
        .await?;
    Ok(Json(produto))
}

pub async fn excluir_produto<R: Repository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Mensagem>, AppError> {
    let id = parse_id(&id)?;
    state.produtos.delete_produto(id).await?;
    Ok(Json(Mensagem::new(PRODUTO_EXCLUIDO)))
}

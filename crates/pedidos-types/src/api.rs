//! Request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::item_do_pedido::{ItemDoPedido, ItemDoPedidoDetalhado};
use crate::domain::pedido::Pedido;
use crate::domain::produto::Produto;
use crate::domain::timestamp;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PedidoRequest {
    #[serde(with = "timestamp")]
    pub data: DateTime<Utc>,
    pub id_cliente: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemDoPedidoRequest {
    pub id_pedido: i64,
    pub id_produto: i64,
    pub qtdade: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProdutoRequest {
    pub descricao: String,
}

/// Body of every error response and of delete confirmations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Mensagem {
    pub message: String,
}

impl Mensagem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListaPedidos {
    pub pedidos: Vec<Pedido>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListaProdutos {
    pub produtos: Vec<Produto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListaItensDoPedido {
    pub itens_do_pedido: Vec<ItemDoPedido>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemDoPedidoResposta {
    pub item_do_pedido: ItemDoPedidoDetalhado,
}

use serde::{Deserialize, Serialize};

use super::cliente::Cliente;
use super::pedido::Pedido;
use super::produto::Produto;

/// Order line item linking a `Pedido` to a `Produto`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDoPedido {
    pub id: i64,
    pub id_pedido: i64,
    pub id_produto: i64,
    pub qtdade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoItemDoPedido {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub id_pedido: i64,
    pub id_produto: i64,
    pub qtdade: i64,
}

impl NovoItemDoPedido {
    pub fn new(id_pedido: i64, id_produto: i64, qtdade: i64) -> Self {
        Self {
            id: None,
            id_pedido,
            id_produto,
            qtdade,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_item(self, id: i64) -> ItemDoPedido {
        ItemDoPedido {
            id,
            id_pedido: self.id_pedido,
            id_produto: self.id_produto,
            qtdade: self.qtdade,
        }
    }
}

/// Line item with its order, product and the order's customer embedded.
///
/// A related record missing from the store is rendered as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemDoPedidoDetalhado {
    #[serde(flatten)]
    pub item: ItemDoPedido,
    pub cliente: Option<Cliente>,
    pub produto: Option<Produto>,
    pub pedido: Option<Pedido>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pedido {
    pub id: i64,
    #[serde(with = "timestamp")]
    pub data: DateTime<Utc>,
    pub id_cliente: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoPedido {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(with = "timestamp")]
    pub data: DateTime<Utc>,
    pub id_cliente: i64,
}

impl NovoPedido {
    pub fn new(data: DateTime<Utc>, id_cliente: i64) -> Self {
        Self {
            id: None,
            data,
            id_cliente,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_pedido(self, id: i64) -> Pedido {
        Pedido {
            id,
            data: self.data,
            id_cliente: self.id_cliente,
        }
    }
}

impl Pedido {
    pub fn update(&mut self, data: DateTime<Utc>, id_cliente: i64) {
        self.data = data;
        self.id_cliente = id_cliente;
    }
}

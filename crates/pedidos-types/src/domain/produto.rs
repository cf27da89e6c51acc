use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Produto {
    pub id: i64,
    pub descricao: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoProduto {
    /// Explicit primary key; `None` lets the store assign the next id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub descricao: String,
}

impl NovoProduto {
    pub fn new(descricao: impl Into<String>) -> Self {
        Self {
            id: None,
            descricao: descricao.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_produto(self, id: i64) -> Produto {
        Produto {
            id,
            descricao: self.descricao,
        }
    }
}

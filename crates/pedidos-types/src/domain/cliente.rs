use serde::{Deserialize, Serialize};

/// Customer referenced by orders. The HTTP core only checks that it exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoCliente {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub cpf: String,
}

impl NovoCliente {
    pub fn new(nome: impl Into<String>, cpf: impl Into<String>) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            cpf: cpf.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

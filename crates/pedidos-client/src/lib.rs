use std::time::Duration;

use anyhow::Context;
use pedidos_types::api::{
    ItemDoPedidoRequest, ItemDoPedidoResposta, ListaItensDoPedido, ListaPedidos, ListaProdutos,
    Mensagem, PedidoRequest, ProdutoRequest,
};
use pedidos_types::domain::item_do_pedido::{ItemDoPedido, ItemDoPedidoDetalhado};
use pedidos_types::domain::pedido::Pedido;
use pedidos_types::domain::produto::Produto;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// Non-2xx answer from the API, carrying its `message` body.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Clone)]
pub struct PedidosClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct PedidosClient {
    base: Url,
    client: reqwest::Client,
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> anyhow::Result<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json().await?);
    }
    let message = match res.json::<Mensagem>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };
    tracing::debug!(%status, %message, "api error");
    Err(ApiError { status, message }.into())
}

impl PedidosClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<PedidosClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(PedidosClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn incluir_pedido(&self, req: &PedidoRequest) -> anyhow::Result<Pedido> {
        let res = self
            .client
            .post(self.url("incluirPedido")?)
            .json(req)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn get_pedido(&self, id: i64) -> anyhow::Result<Pedido> {
        let res = self
            .client
            .get(self.url(&format!("pedidos/{id}"))?)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn listar_pedidos(&self) -> anyhow::Result<Vec<Pedido>> {
        let res = self.client.get(self.url("Pedidos")?).send().await?;
        Ok(decode::<ListaPedidos>(res).await?.pedidos)
    }

    pub async fn atualizar_pedido(&self, id: i64, req: &PedidoRequest) -> anyhow::Result<Pedido> {
        let res = self
            .client
            .put(self.url(&format!("atualizarPedido/{id}"))?)
            .json(req)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn excluir_pedido(&self, id: i64) -> anyhow::Result<String> {
        let res = self
            .client
            .delete(self.url(&format!("excluirPedido/{id}"))?)
            .send()
            .await?;
        Ok(decode::<Mensagem>(res).await?.message)
    }

    pub async fn incluir_item_do_pedido(
        &self,
        req: &ItemDoPedidoRequest,
    ) -> anyhow::Result<ItemDoPedido> {
        let res = self
            .client
            .post(self.url("incluirItemDoPedido")?)
            .json(req)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn get_item_do_pedido(&self, id: i64) -> anyhow::Result<ItemDoPedidoDetalhado> {
        let res = self
            .client
            .get(self.url(&format!("itensDoPedido/{id}"))?)
            .send()
            .await?;
        Ok(decode::<ItemDoPedidoResposta>(res).await?.item_do_pedido)
    }

    pub async fn listar_itens_do_pedido(&self) -> anyhow::Result<Vec<ItemDoPedido>> {
        let res = self.client.get(self.url("itensDoPedido")?).send().await?;
        Ok(decode::<ListaItensDoPedido>(res).await?.itens_do_pedido)
    }

    pub async fn excluir_item_do_pedido(&self, id: i64) -> anyhow::Result<String> {
        let res = self
            .client
            .delete(self.url(&format!("excluirItemDoPedido/{id}"))?)
            .send()
            .await?;
        Ok(decode::<Mensagem>(res).await?.message)
    }

    pub async fn incluir_produto(&self, descricao: &str) -> anyhow::Result<Produto> {
        let res = self
            .client
            .post(self.url("incluirProduto")?)
            .json(&ProdutoRequest {
                descricao: descricao.to_string(),
            })
            .send()
            .await?;
        decode(res).await
    }

    pub async fn get_produto(&self, id: i64) -> anyhow::Result<Produto> {
        let res = self
            .client
            .get(self.url(&format!("produtos/{id}"))?)
            .send()
            .await?;
        decode(res).await
    }

    pub async fn listar_produtos(&self) -> anyhow::Result<Vec<Produto>> {
        let res = self.client.get(self.url("produtos")?).send().await?;
        Ok(decode::<ListaProdutos>(res).await?.produtos)
    }

    pub async fn atualizar_produto(&self, id: i64, descricao: &str) -> anyhow::Result<Produto> {
        let res = self
            .client
            .put(self.url(&format!("atualizarProduto/{id}"))?)
            .json(&ProdutoRequest {
                descricao: descricao.to_string(),
            })
            .send()
            .await?;
        decode(res).await
    }

    pub async fn excluir_produto(&self, id: i64) -> anyhow::Result<String> {
        let res = self
            .client
            .delete(self.url(&format!("excluirProduto/{id}"))?)
            .send()
            .await?;
        Ok(decode::<Mensagem>(res).await?.message)
    }
}

impl PedidosClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<PedidosClient> {
        if let Some(client) = self.client {
            return Ok(PedidosClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(PedidosClient {
            base: self.base,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pedidos_types::domain::cliente::Cliente;
    use pedidos_types::domain::timestamp;
    use serde_json::json;

    fn sample_pedido() -> Pedido {
        Pedido {
            id: 1,
            data: timestamp::parse("2024-08-01T07:11:40.000Z").unwrap(),
            id_cliente: 1,
        }
    }

    #[tokio::test]
    async fn incluir_and_get_pedido() {
        let server = MockServer::start();
        let pedido = sample_pedido();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/incluirPedido")
                .json_body(json!({ "data": "2024-08-01T07:11:40.000Z", "id_cliente": 1 }));
            then.status(201).json_body_obj(&pedido);
        });
        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/pedidos/1");
            then.status(200).json_body_obj(&pedido);
        });

        let client = PedidosClient::new(&server.base_url()).unwrap();
        let created = client
            .incluir_pedido(&PedidoRequest {
                data: pedido.data,
                id_cliente: 1,
            })
            .await
            .unwrap();
        assert_eq!(created, pedido);
        assert_eq!(client.get_pedido(1).await.unwrap(), pedido);

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn error_bodies_become_api_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/pedidos/999");
            then.status(404)
                .json_body(json!({ "message": "Pedido não encontrado" }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/incluirItemDoPedido");
            then.status(404)
                .json_body(json!({ "message": "Pedido ou Produto não encontrado" }));
        });

        let client = PedidosClient::new(&server.base_url()).unwrap();
        let err = client.get_pedido(999).await.unwrap_err();
        let api = err.downcast_ref::<ApiError>().expect("api error");
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Pedido não encontrado");

        let err = client
            .incluir_item_do_pedido(&ItemDoPedidoRequest {
                id_pedido: 99999,
                id_produto: 3,
                qtdade: 3,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ApiError>().map(|e| e.message.as_str()),
            Some("Pedido ou Produto não encontrado")
        );
    }

    #[tokio::test]
    async fn unwraps_list_and_item_envelopes() {
        let server = MockServer::start();
        let item = ItemDoPedido {
            id: 1,
            id_pedido: 1,
            id_produto: 3,
            qtdade: 2,
        };
        let detalhado = ItemDoPedidoDetalhado {
            item: item.clone(),
            cliente: Some(Cliente {
                id: 1,
                nome: "Ana".into(),
                cpf: "12345678900".into(),
            }),
            produto: Some(Produto {
                id: 3,
                descricao: "Caneta".into(),
            }),
            pedido: Some(sample_pedido()),
        };

        let pedidos_mock = server.mock(|when, then| {
            when.method(GET).path("/Pedidos");
            then.status(200)
                .json_body_obj(&ListaPedidos { pedidos: vec![sample_pedido()] });
        });
        let itens_mock = server.mock(|when, then| {
            when.method(GET).path("/itensDoPedido");
            then.status(200).json_body(json!({ "itensDoPedido": [item] }));
        });
        let item_mock = server.mock(|when, then| {
            when.method(GET).path("/itensDoPedido/1");
            then.status(200)
                .json_body(json!({ "itemDoPedido": detalhado }));
        });
        let produtos_mock = server.mock(|when, then| {
            when.method(GET).path("/produtos");
            then.status(200).json_body(json!({ "produtos": [] }));
        });

        let client = PedidosClient::new(&server.base_url()).unwrap();
        assert_eq!(client.listar_pedidos().await.unwrap().len(), 1);
        assert_eq!(client.listar_itens_do_pedido().await.unwrap(), vec![item]);
        assert_eq!(client.get_item_do_pedido(1).await.unwrap(), detalhado);
        assert!(client.listar_produtos().await.unwrap().is_empty());

        pedidos_mock.assert();
        itens_mock.assert();
        item_mock.assert();
        produtos_mock.assert();
    }

    #[tokio::test]
    async fn update_and_delete_produto() {
        let server = MockServer::start();
        let update_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PUT)
                .path("/atualizarProduto/5")
                .json_body(json!({ "descricao": "produto Atualizado" }));
            then.status(200)
                .json_body(json!({ "id": 5, "descricao": "produto Atualizado" }));
        });
        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path("/excluirProduto/5");
            then.status(200)
                .json_body(json!({ "message": "Produto excluído com sucesso" }));
        });

        let client = PedidosClient::builder(&server.base_url())
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        let updated = client.atualizar_produto(5, "produto Atualizado").await.unwrap();
        assert_eq!(updated.descricao, "produto Atualizado");
        assert_eq!(
            client.excluir_produto(5).await.unwrap(),
            "Produto excluído com sucesso"
        );

        update_mock.assert();
        delete_mock.assert();
    }
}

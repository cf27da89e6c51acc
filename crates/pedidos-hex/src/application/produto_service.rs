use std::sync::Arc;

use pedidos_types::domain::produto::{NovoProduto, Produto};
use pedidos_types::ports::repository::ProdutoRepository;

use crate::errors::AppError;

pub const PRODUTO_NAO_ENCONTRADO: &str = "Produto não encontrado";
pub const PRODUTO_EXCLUIDO: &str = "Produto excluído com sucesso";
const ERRO_INCLUIR_PRODUTO: &str = "Erro ao incluir produto";
const ERRO_BUSCAR_PRODUTO: &str = "Erro ao buscar produto";
const ERRO_LISTAR_PRODUTOS: &str = "Erro ao listar produtos";
const ERRO_ATUALIZAR_PRODUTO: &str = "Erro ao atualizar produto";
const ERRO_EXCLUIR_PRODUTO: &str = "Erro ao excluir produto";

pub struct ProdutoService<R> {
    repo: Arc<R>,
}

impl<R: ProdutoRepository> ProdutoService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create_produto(&self, descricao: String) -> Result<Produto, AppError> {
        let produto = self
            .repo
            .create_produto(NovoProduto::new(descricao))
            .await
            .map_err(|e| AppError::internal(ERRO_INCLUIR_PRODUTO, e))?;
        tracing::info!(id = produto.id, "produto created");
        Ok(produto)
    }

    pub async fn get_produto(&self, id: i64) -> Result<Produto, AppError> {
        match self
            .repo
            .find_produto(id)
            .await
            .map_err(|e| AppError::internal(ERRO_BUSCAR_PRODUTO, e))?
        {
            Some(p) => Ok(p),
            None => Err(AppError::NotFound(PRODUTO_NAO_ENCONTRADO.into())),
        }
    }

    pub async fn list_produtos(&self) -> Result<Vec<Produto>, AppError> {
        self.repo
            .list_produtos()
            .await
            .map_err(|e| AppError::internal(ERRO_LISTAR_PRODUTOS, e))
    }

    pub async fn update_produto(&self, id: i64, descricao: String) -> Result<Produto, AppError> {
        match self
            .repo
            .update_produto(id, descricao)
            .await
            .map_err(|e| AppError::internal(ERRO_ATUALIZAR_PRODUTO, e))?
        {
            Some(p) => Ok(p),
            None => Err(AppError::NotFound(PRODUTO_NAO_ENCONTRADO.into())),
        }
    }

    pub async fn delete_produto(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .repo
            .destroy_produto(id)
            .await
            .map_err(|e| AppError::internal(ERRO_EXCLUIR_PRODUTO, e))?;
        if !deleted {
            tracing::debug!(id, "delete of unknown produto");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedidos_repo::memory::InMemoryRepo;

    #[tokio::test]
    async fn create_update_and_delete_produto() {
        let svc = ProdutoService::new(Arc::new(InMemoryRepo::new()));
        let produto = svc.create_produto("descricao".into()).await.unwrap();
        assert_eq!(produto.descricao, "descricao");

        let updated = svc
            .update_produto(produto.id, "produto Atualizado".into())
            .await
            .unwrap();
        assert_eq!(updated.descricao, "produto Atualizado");
        assert_eq!(svc.get_produto(produto.id).await.unwrap(), updated);

        svc.delete_produto(produto.id).await.unwrap();
        assert!(matches!(
            svc.get_produto(produto.id).await,
            Err(AppError::NotFound(m)) if m == PRODUTO_NAO_ENCONTRADO
        ));
    }

    #[tokio::test]
    async fn not_found_paths() {
        let svc = ProdutoService::new(Arc::new(InMemoryRepo::new()));
        assert!(matches!(svc.get_produto(999).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            svc.update_produto(999999, "descricao".into()).await,
            Err(AppError::NotFound(_))
        ));
        svc.delete_produto(999).await.unwrap();
    }
}

//! Cross-entity existence checks run before a write.

use pedidos_types::ports::repository::{Entidade, ReferenceLookup, RepoError};

/// Outcome of checking a set of references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Referencia {
    Ok,
    /// The first reference that does not exist.
    NaoEncontrada(Entidade, i64),
}

/// Checks each `(entity, id)` pair in order and reports the first missing one.
///
/// A missing reference is a normal outcome; only store failures are errors.
pub async fn verificar_referencias<R>(
    repo: &R,
    referencias: &[(Entidade, i64)],
) -> Result<Referencia, RepoError>
where
    R: ReferenceLookup + ?Sized,
{
    for &(entidade, id) in referencias {
        if !repo.exists(entidade, id).await? {
            tracing::debug!(%entidade, id, "reference not found");
            return Ok(Referencia::NaoEncontrada(entidade, id));
        }
    }
    Ok(Referencia::Ok)
}

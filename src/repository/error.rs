// ==========================================
// Gestão Metálica - Erros da camada de repositório
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório.
///
/// O armazenamento de entidades é um colaborador externo;
/// falhas dele chegam aqui como `Backend` e sobem intactas
/// até o usuário (sem retry, sem rollback automático).
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("falha no armazenamento externo: {0}")]
    Backend(String),

    #[error("falha de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias de Result da camada de repositório.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

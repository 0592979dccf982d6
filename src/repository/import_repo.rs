// ==========================================
// Gestão Metálica - Traits de repositório
// ==========================================
// Interfaces do armazenamento de entidades externo
// (list/filter/create/bulkCreate/update/delete por
// tipo de registro). Repositório não contém regra
// de negócio, só CRUD.
// ==========================================

use crate::domain::import::ImportBatch;
use crate::domain::item::{ProductionItem, Task};
use crate::domain::profile::MappingProfile;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportRepository - Itens, tarefas e lotes
// ==========================================
// Usado pelo ImportCommitter. As inserções em massa
// são chamadas sequenciais e independentes: não há
// transação atravessando os três lotes.
#[async_trait]
pub trait ImportRepository: Send + Sync {
    /// Insere itens de produção em massa.
    ///
    /// # Retorno
    /// - Ok(usize): quantidade criada
    /// - Err: erro do armazenamento (lote inteiro descartado)
    async fn bulk_create_items(&self, items: Vec<ProductionItem>) -> RepositoryResult<usize>;

    /// Insere tarefas em massa.
    async fn bulk_create_tasks(&self, tasks: Vec<Task>) -> RepositoryResult<usize>;

    /// Registra a auditoria do lote de importação.
    async fn insert_batch(&self, batch: ImportBatch) -> RepositoryResult<()>;

    /// Lotes mais recentes, do mais novo para o mais antigo.
    async fn recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>>;
}

// ==========================================
// ProfileRepository - Perfis de mapeamento
// ==========================================
// O nome do perfil pode repetir; a identidade é o
// profile_id (exclusão sempre por id).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Acrescenta um perfil ao armazenamento.
    async fn save_profile(&self, profile: MappingProfile) -> RepositoryResult<()>;

    /// Todos os perfis salvos.
    async fn list_profiles(&self) -> RepositoryResult<Vec<MappingProfile>>;

    /// Remove um perfil por id.
    ///
    /// # Retorno
    /// - Err(NotFound): id inexistente
    async fn delete_profile(&self, profile_id: &str) -> RepositoryResult<()>;
}

// ==========================================
// Gestão Metálica - Armazenamento em memória
// ==========================================
// Implementação de referência dos repositórios,
// usada em testes e na demonstração de linha de
// comando. O armazenamento real é um serviço
// externo fora do escopo deste repositório.
// ==========================================

use crate::domain::import::ImportBatch;
use crate::domain::item::{ProductionItem, Task};
use crate::domain::profile::MappingProfile;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::import_repo::{ImportRepository, ProfileRepository};
use async_trait::async_trait;
use tokio::sync::Mutex;

// ==========================================
// InMemoryStore
// ==========================================
// Cada coleção atrás do próprio Mutex; uma inserção
// em massa é atômica por coleção, nunca entre
// coleções (mesmo contrato do serviço externo).
#[derive(Default)]
pub struct InMemoryStore {
    items: Mutex<Vec<ProductionItem>>,
    tasks: Mutex<Vec<Task>>,
    batches: Mutex<Vec<ImportBatch>>,
    profiles: Mutex<Vec<MappingProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cópia dos itens gravados (inspeção em testes).
    pub async fn items(&self) -> Vec<ProductionItem> {
        self.items.lock().await.clone()
    }

    /// Cópia das tarefas gravadas.
    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }
}

#[async_trait]
impl ImportRepository for InMemoryStore {
    async fn bulk_create_items(&self, items: Vec<ProductionItem>) -> RepositoryResult<usize> {
        let criados = items.len();
        self.items.lock().await.extend(items);
        Ok(criados)
    }

    async fn bulk_create_tasks(&self, tasks: Vec<Task>) -> RepositoryResult<usize> {
        let criadas = tasks.len();
        self.tasks.lock().await.extend(tasks);
        Ok(criadas)
    }

    async fn insert_batch(&self, batch: ImportBatch) -> RepositoryResult<()> {
        self.batches.lock().await.push(batch);
        Ok(())
    }

    async fn recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let batches = self.batches.lock().await;
        Ok(batches.iter().rev().take(limit).cloned().collect())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn save_profile(&self, profile: MappingProfile) -> RepositoryResult<()> {
        self.profiles.lock().await.push(profile);
        Ok(())
    }

    async fn list_profiles(&self) -> RepositoryResult<Vec<MappingProfile>> {
        Ok(self.profiles.lock().await.clone())
    }

    async fn delete_profile(&self, profile_id: &str) -> RepositoryResult<()> {
        let mut profiles = self.profiles.lock().await;
        let antes = profiles.len();
        profiles.retain(|p| p.profile_id != profile_id);
        if profiles.len() == antes {
            return Err(RepositoryError::NotFound {
                entity: "mapping_profile".to_string(),
                id: profile_id.to_string(),
            });
        }
        Ok(())
    }
}

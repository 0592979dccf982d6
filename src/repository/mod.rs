// ==========================================
// Gestão Metálica - Camada de repositório
// ==========================================
// Acesso a dados atrás de traits assíncronos; o
// armazenamento de entidades real é externo e fica
// fora deste repositório.
// ==========================================

pub mod error;
pub mod import_repo;
pub mod memory;

// Reexporta os repositórios centrais
pub use error::{RepositoryError, RepositoryResult};
pub use import_repo::{ImportRepository, ProfileRepository};
pub use memory::InMemoryStore;

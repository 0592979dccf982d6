// ==========================================
// Gestão Metálica - Biblioteca central
// ==========================================
// Pipeline de importação em massa de itens de produção
// para estruturas metálicas (fabricação e montagem)
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de repositório - acesso a dados
pub mod repository;

// Camada de importação - dados externos
pub mod importer;

// Camada de configuração
pub mod config;

// Sistema de log
pub mod logging;

// ==========================================
// Reexporta os tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{CanonicalField, Etapa, ItemStatus, TransformKind};

// Entidades de domínio
pub use domain::{
    CommitSummary, ImportBatch, MappingProfile, ParsedFile, ProductionItem, Task,
    TransformationRule, ValidationOutcome,
};

// Importação
pub use importer::{
    ColumnMapper, ImportCommitter, ImportError, ImportPipeline, ImportResult,
    MappingProfileStore, PipelineState, RuleSet, TransformationEngine, UniversalReader,
    Validator,
};

// Repositório
pub use repository::{ImportRepository, InMemoryStore, ProfileRepository, RepositoryError};

// Configuração
pub use config::ImportConfig;

// ==========================================
// Constantes
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Gestão Metálica - Importação de Produção";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

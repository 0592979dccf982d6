// ==========================================
// Gestão Metálica - Camada de domínio
// ==========================================
// Entidades, tipos e modelos do pipeline de
// importação. Sem acesso a dados, sem lógica de
// orquestração.
// ==========================================

pub mod import;
pub mod item;
pub mod profile;
pub mod types;

// Reexporta os tipos centrais
pub use import::{
    CanonicalRow, CommitSummary, ImportBatch, InvalidRow, ParsedFile, RawRow, RowWarning,
    ValidRow, ValidationOutcome,
};
pub use item::{ProductionItem, Task};
pub use profile::{FieldMapping, MappingProfile, TransformationRule};
pub use types::{CanonicalField, Etapa, ItemStatus, TransformKind};

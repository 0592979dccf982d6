// ==========================================
// Gestão Metálica - Camada de importação
// ==========================================
// Responsabilidade: ingestão de planilhas externas e
// geração de itens de produção internos
// Suporta: Excel, CSV, TXT delimitado, JSON
// ==========================================

// Declaração de módulos
pub mod column_mapper;
pub mod committer;
pub mod error;
pub mod file_parser;
pub mod pipeline;
pub mod profile_store;
pub mod transformation;
pub mod validator;

// Reexporta os tipos centrais
pub use column_mapper::ColumnMapper;
pub use committer::ImportCommitter;
pub use error::{ImportError, ImportResult};
pub use file_parser::{DelimitedReader, ExcelReader, FormatReader, JsonReader, UniversalReader};
pub use pipeline::{ImportPipeline, PipelineState};
pub use profile_store::MappingProfileStore;
pub use transformation::{FieldValue, RuleSet, TransformationEngine};
pub use validator::Validator;

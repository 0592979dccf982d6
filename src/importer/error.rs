// ==========================================
// Gestão Metálica - Erros do módulo de importação
// ==========================================
// Ferramenta: macro derive do thiserror
// Taxonomia: erros fatais de arquivo abortam o
// assistente; erros de linha ficam no conjunto
// Invalid (não viram ImportError); falha de commit
// sobe com o que já foi persistido.
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erros do pipeline de importação.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Arquivo =====
    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de arquivo não suportado: {0} (aceitos: .xlsx/.xls/.csv/.txt/.json)")]
    UnsupportedFormat(String),

    #[error("Arquivo vazio: nenhuma linha de dados após o cabeçalho")]
    EmptyFile,

    #[error("Falha na leitura do arquivo: {0}")]
    FileRead(String),

    #[error("Falha ao ler planilha Excel: {0}")]
    ExcelParse(String),

    #[error("Falha ao ler arquivo delimitado: {0}")]
    CsvParse(String),

    #[error("Falha ao ler JSON: {0}")]
    JsonParse(String),

    // ===== Mapeamento =====
    #[error("Mapeamento incompleto; vínculos obrigatórios ausentes: {}", .missing.join(", "))]
    MappingIncomplete { missing: Vec<String> },

    // ===== Portão de validação / máquina de estados =====
    #[error("Importação bloqueada: {invalid_rows} linha(s) com erro no lote")]
    GateClosed { invalid_rows: usize },

    #[error("Transição inválida: {action} não é permitida no estado {state}")]
    InvalidTransition { state: String, action: String },

    // ===== Commit =====
    #[error(
        "Falha ao gravar {stage}: {source} (persistidos nesta sessão: {itens_criados} itens, {tarefas_criadas} tarefas)"
    )]
    CommitFailed {
        stage: String,
        itens_criados: usize,
        tarefas_criadas: usize,
        #[source]
        source: RepositoryError,
    },

    // ===== Repasse =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileRead(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParse(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParse(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParse(err.to_string())
    }
}

/// Alias de Result do módulo de importação.
pub type ImportResult<T> = Result<T, ImportError>;

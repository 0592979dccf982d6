// ==========================================
// Gestão Metálica - Modelos do pipeline de importação
// ==========================================
// Produtos intermediários: arquivo parseado, linha
// canônica, resultado de validação e auditoria de
// lote. Vida útil restrita à sessão de importação,
// exceto ImportBatch (persistido).
// ==========================================

use crate::domain::types::Etapa;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Linha bruta: cabeçalho original → valor textual.
/// A ordem das colunas vive em `ParsedFile::headers`.
pub type RawRow = HashMap<String, String>;

// ==========================================
// ParsedFile - Saída do FormatReader
// ==========================================
// Imutável após a leitura; descartado no cancelamento.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// CanonicalRow - Linha canônica validada
// ==========================================
// Registro pronto para virar ProductionItem no commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub codigo: Option<String>,
    pub nome: String,
    pub marca: Option<String>,
    pub peso_unitario: f64,
    pub quantidade: f64,
    pub peso_total: f64, // round(peso_unitario * quantidade, 2)
    pub etapa: Etapa,
    pub responsavel: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim_prevista: Option<String>,
    pub observacoes: Option<String>,
}

// ==========================================
// Resultado de validação
// ==========================================
// Três coleções disjuntas entre valid/invalid; uma
// linha pode aparecer em valid e warnings ao mesmo
// tempo, nunca em valid e invalid.

/// Linha aprovada, com campos derivados calculados.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidRow {
    pub row_number: usize, // 1-based, contando a linha de cabeçalho
    pub record: CanonicalRow,
}

/// Linha reprovada, com a lista completa de erros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidRow {
    pub row_number: usize,
    pub errors: Vec<String>,
}

/// Aviso não bloqueante associado a uma linha.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowWarning {
    pub row_number: usize,
    pub message: String,
}

/// Partição completa de um lote de linhas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: Vec<ValidRow>,
    pub invalid: Vec<InvalidRow>,
    pub warnings: Vec<RowWarning>,
}

impl ValidationOutcome {
    /// Portão de validação: o commit só habilita com zero
    /// linhas inválidas no lote. Avisos nunca bloqueiam.
    pub fn gate_open(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Relatório estruturado (número da linha + mensagens)
    /// exibido antes do portão.
    pub fn report(&self) -> serde_json::Value {
        serde_json::json!({
            "total_validas": self.valid.len(),
            "total_invalidas": self.invalid.len(),
            "total_avisos": self.warnings.len(),
            "commit_habilitado": self.gate_open(),
            "invalidas": self.invalid,
            "avisos": self.warnings,
        })
    }
}

// ==========================================
// ImportBatch - Auditoria de lote
// ==========================================
// Um registro por commit, persistido junto com os itens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String, // UUID
    pub projeto_id: String,
    pub file_name: Option<String>,
    pub etapa: Etapa, // etapa selecionada para a sessão
    pub total_rows: usize,
    pub valid_rows: usize,
    pub warning_rows: usize,
    pub itens_criados: usize,
    pub tarefas_criadas: usize,
    pub itens_espelhados: usize,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

// ==========================================
// CommitSummary - Retorno do commit
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub batch_id: String,
    pub itens_criados: usize,
    pub tarefas_criadas: usize,
    pub itens_espelhados: usize,
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portao_bloqueia_com_invalida() {
        let mut outcome = ValidationOutcome::default();
        assert!(outcome.gate_open());

        outcome.invalid.push(InvalidRow {
            row_number: 3,
            errors: vec!["Quantidade deve ser um número maior que zero".to_string()],
        });
        assert!(!outcome.gate_open());

        // aviso sozinho não bloqueia
        let mut so_aviso = ValidationOutcome::default();
        so_aviso.warnings.push(RowWarning {
            row_number: 2,
            message: "Etapa não reconhecida".to_string(),
        });
        assert!(so_aviso.gate_open());
    }

    #[test]
    fn test_relatorio_estruturado() {
        let mut outcome = ValidationOutcome::default();
        outcome.invalid.push(InvalidRow {
            row_number: 5,
            errors: vec!["Nome é obrigatório".to_string()],
        });

        let relatorio = outcome.report();
        assert_eq!(relatorio["total_invalidas"], 1);
        assert_eq!(relatorio["commit_habilitado"], false);
        assert_eq!(relatorio["invalidas"][0]["row_number"], 5);
    }
}

// ==========================================
// Gestão Metálica - Tipos de domínio
// ==========================================
// Tipos fechados do pipeline de importação:
// etapas de produção, status de item, campos
// canônicos e tipos de transformação.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Etapa de produção (Stage)
// ==========================================
// Duas fases: fabricação (oficina) e montagem (campo).
// Serialização: minúsculas, alinhada ao armazenamento externo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Etapa {
    Fabricacao, // fabricação em oficina
    Montagem,   // montagem em campo
}

impl Etapa {
    pub fn as_str(&self) -> &'static str {
        match self {
            Etapa::Fabricacao => "fabricacao",
            Etapa::Montagem => "montagem",
        }
    }
}

impl fmt::Display for Etapa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Status de item de produção
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pendente,    // aguardando início
    EmAndamento, // em produção
    Concluido,   // finalizado
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Pendente => write!(f, "pendente"),
            ItemStatus::EmAndamento => write!(f, "em_andamento"),
            ItemStatus::Concluido => write!(f, "concluido"),
        }
    }
}

// ==========================================
// Campo canônico (Canonical Field)
// ==========================================
// Atributo lógico fixo de um item de produção,
// independente do cabeçalho do arquivo de origem.
// Todo acesso canônico passa pelo FieldMapping;
// adicionar um campo aqui não toca o file_parser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Codigo,
    Nome,
    Marca,
    PesoUnitario,
    Quantidade,
    Responsavel,
    DataInicio,
    DataFimPrevista,
    Observacoes,
}

impl CanonicalField {
    /// Todos os campos canônicos, na ordem de exibição.
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::Codigo,
        CanonicalField::Nome,
        CanonicalField::Marca,
        CanonicalField::PesoUnitario,
        CanonicalField::Quantidade,
        CanonicalField::Responsavel,
        CanonicalField::DataInicio,
        CanonicalField::DataFimPrevista,
        CanonicalField::Observacoes,
    ];

    /// Identificador estável (chave de mapeamento e serialização).
    pub fn id(&self) -> &'static str {
        match self {
            CanonicalField::Codigo => "codigo",
            CanonicalField::Nome => "nome",
            CanonicalField::Marca => "marca",
            CanonicalField::PesoUnitario => "peso_unitario",
            CanonicalField::Quantidade => "quantidade",
            CanonicalField::Responsavel => "responsavel",
            CanonicalField::DataInicio => "data_inicio",
            CanonicalField::DataFimPrevista => "data_fim_prevista",
            CanonicalField::Observacoes => "observacoes",
        }
    }

    /// Rótulo do modelo canônico de planilha.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::Codigo => "Código",
            CanonicalField::Nome => "Nome",
            CanonicalField::Marca => "Marca",
            CanonicalField::PesoUnitario => "Peso Unitário (kg)",
            CanonicalField::Quantidade => "Quantidade",
            CanonicalField::Responsavel => "Responsável",
            CanonicalField::DataInicio => "Data Início",
            CanonicalField::DataFimPrevista => "Data Fim Prevista",
            CanonicalField::Observacoes => "Observações",
        }
    }

    /// Campos obrigatórios para confirmar o mapeamento.
    pub fn is_required(&self) -> bool {
        matches!(self, CanonicalField::Nome | CanonicalField::Quantidade)
    }

    /// Campos de data (validados no formato YYYY-MM-DD).
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            CanonicalField::DataInicio | CanonicalField::DataFimPrevista
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ==========================================
// Tipo de transformação (Transformation Kind)
// ==========================================
// Regra configurável aplicada ao valor bruto de um
// campo antes da validação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Date,      // reservado: repasse sem reformatação
    Number,    // normalização e arredondamento numérico
    Text,      // trim
    Uppercase, // caixa alta
    Lowercase, // caixa baixa
    Trim,      // trim explícito
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::Date => write!(f, "date"),
            TransformKind::Number => write!(f, "number"),
            TransformKind::Text => write!(f, "text"),
            TransformKind::Uppercase => write!(f, "uppercase"),
            TransformKind::Lowercase => write!(f, "lowercase"),
            TransformKind::Trim => write!(f, "trim"),
        }
    }
}

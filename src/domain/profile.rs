// ==========================================
// Gestão Metálica - Mapeamento e perfis
// ==========================================
// FieldMapping: campo canônico → cabeçalho bruto.
// MappingProfile: preset nomeado e persistido
// (mapeamento + regras + coluna de etapa) para
// reimportar arquivos de formato conhecido.
// ==========================================

use crate::domain::types::{CanonicalField, TransformKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// FieldMapping - Vínculo campo → cabeçalho
// ==========================================
// Campo ausente no mapa = não mapeado. A coluna de
// etapa é rastreada à parte (ColumnMapper), não aqui.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(default)]
    bindings: BTreeMap<CanonicalField, String>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atualiza um único vínculo. `None` (ou cabeçalho em
    /// branco) desfaz o mapeamento do campo.
    pub fn set(&mut self, field: CanonicalField, header: Option<String>) {
        match header {
            Some(h) if !h.trim().is_empty() => {
                self.bindings.insert(field, h.trim().to_string());
            }
            _ => {
                self.bindings.remove(&field);
            }
        }
    }

    /// Cabeçalho bruto vinculado ao campo, se houver.
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.bindings.get(&field).map(|s| s.as_str())
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    /// Campos obrigatórios ainda sem vínculo.
    pub fn missing_required(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|f| f.is_required() && !self.is_mapped(*f))
            .collect()
    }

    /// Detecção automática para o modelo canônico de planilha:
    /// casa cada cabeçalho com o rótulo ou o identificador do
    /// campo, sem diferenciar caixa.
    pub fn auto_detect(headers: &[String]) -> Self {
        let mut mapping = FieldMapping::new();
        for field in CanonicalField::ALL {
            let alvo_label = field.label().to_lowercase();
            let alvo_id = field.id().to_lowercase();
            if let Some(header) = headers.iter().find(|h| {
                let h = h.trim().to_lowercase();
                h == alvo_label || h == alvo_id
            }) {
                mapping.set(field, Some(header.clone()));
            }
        }
        mapping
    }
}

// ==========================================
// TransformationRule - Regra de transformação
// ==========================================
// No máximo uma regra ativa por campo (a última
// adicionada vence; ver importer::transformation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRule {
    pub field: CanonicalField,
    pub kind: TransformKind,

    /// Casas decimais para `number` (padrão: 2).
    #[serde(default)]
    pub decimal_places: Option<u32>,

    /// Formato alvo para `date` (reservado; hoje repasse).
    #[serde(default)]
    pub format: Option<String>,
}

impl TransformationRule {
    pub fn new(field: CanonicalField, kind: TransformKind) -> Self {
        Self {
            field,
            kind,
            decimal_places: None,
            format: None,
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimal_places = Some(decimals);
        self
    }
}

// ==========================================
// MappingProfile - Perfil de mapeamento nomeado
// ==========================================
// Persistido por identidade (o nome pode repetir;
// exclusão é por id). Carregar um perfil re-hidrata
// o estado da sessão sem conferir se os cabeçalhos
// existem no arquivo atual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingProfile {
    pub profile_id: String, // UUID
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub mapping: FieldMapping,
    pub rules: Vec<TransformationRule>,
    pub stage_column: String,
    pub created_at: DateTime<Utc>,
}

// ==========================================
// Gestão Metálica - Motor de transformação
// ==========================================
// Estágio 2 do pipeline: aplica a regra configurada
// de um campo ao valor bruto, antes da validação.
// Nunca falha: entrada malformada degrada para um
// padrão e o Validator é a única autoridade sobre
// aceitar ou não o valor.
// ==========================================

use crate::domain::profile::TransformationRule;
use crate::domain::types::{CanonicalField, TransformKind};

/// Valor após a transformação: texto ou número.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Representação textual do valor transformado.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
        }
    }

    /// Valor numérico, se a regra produziu número.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

// ==========================================
// RuleSet - Regras ativas da sessão
// ==========================================
// No máximo uma regra por campo: adicionar uma
// segunda regra para o mesmo campo substitui a
// anterior (a última adicionada vence).
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<TransformationRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstrói o conjunto a partir de uma lista persistida,
    /// dedupando por campo na ordem de chegada.
    pub fn from_rules(rules: Vec<TransformationRule>) -> Self {
        let mut set = Self::new();
        for rule in rules {
            set.add(rule);
        }
        set
    }

    /// Adiciona (ou substitui) a regra do campo.
    pub fn add(&mut self, rule: TransformationRule) {
        self.rules.retain(|r| r.field != rule.field);
        self.rules.push(rule);
    }

    pub fn remove(&mut self, field: CanonicalField) {
        self.rules.retain(|r| r.field != field);
    }

    pub fn get(&self, field: CanonicalField) -> Option<&TransformationRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    pub fn rules(&self) -> &[TransformationRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ==========================================
// TransformationEngine
// ==========================================
pub struct TransformationEngine;

impl TransformationEngine {
    /// Aplica a regra ao valor bruto.
    ///
    /// - `number`: mantém apenas dígitos, vírgula e ponto;
    ///   vírgula vira ponto; arredonda para `decimal_places`
    ///   (padrão 2); entrada não numérica degrada para 0.
    /// - `text`/`trim`: remove espaços das pontas.
    /// - `uppercase`/`lowercase`: dobra de caixa.
    /// - `date`: repasse (parâmetro de formato reservado).
    /// - sem regra: valor devolvido intacto (o trim de base
    ///   fica a cargo do Validator).
    pub fn apply(&self, value: &str, rule: Option<&TransformationRule>) -> FieldValue {
        let Some(rule) = rule else {
            return FieldValue::Text(value.to_string());
        };

        match rule.kind {
            TransformKind::Number => {
                let decimals = rule.decimal_places.unwrap_or(2);
                FieldValue::Number(Self::to_number(value, decimals))
            }
            TransformKind::Text | TransformKind::Trim => {
                FieldValue::Text(value.trim().to_string())
            }
            TransformKind::Uppercase => FieldValue::Text(value.trim().to_uppercase()),
            TransformKind::Lowercase => FieldValue::Text(value.trim().to_lowercase()),
            TransformKind::Date => FieldValue::Text(value.to_string()),
        }
    }

    fn to_number(value: &str, decimals: u32) -> f64 {
        let limpo: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .collect::<String>()
            .replace(',', ".");

        let parsed = limpo.parse::<f64>().unwrap_or(0.0);
        round_to(parsed, decimals)
    }
}

/// Arredondamento half-up em `decimals` casas.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

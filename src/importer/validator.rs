// ==========================================
// Gestão Metálica - Validador de linhas
// ==========================================
// Estágio 3 do pipeline: calcula campos derivados e
// particiona as linhas em válidas / inválidas / com
// aviso. Dois níveis: erro bloqueia o lote inteiro
// (portão de validação); aviso importa com padrão de
// melhor esforço.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::import::{
    CanonicalRow, InvalidRow, RawRow, RowWarning, ValidRow, ValidationOutcome,
};
use crate::domain::profile::FieldMapping;
use crate::domain::types::{CanonicalField, Etapa};
use crate::importer::transformation::{round_to, FieldValue, RuleSet, TransformationEngine};
use chrono::NaiveDate;
use tracing::debug;

// ==========================================
// Validator
// ==========================================
pub struct Validator {
    config: ImportConfig,
    engine: TransformationEngine,
}

impl Validator {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            engine: TransformationEngine,
        }
    }

    /// Valida o lote completo.
    ///
    /// Número de linha = índice + 2 (linha de cabeçalho
    /// mais contagem humana iniciada em 1).
    pub fn validate(
        &self,
        rows: &[RawRow],
        mapping: &FieldMapping,
        stage_column: &str,
        rules: &RuleSet,
    ) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 2;
            let mut errors: Vec<String> = Vec::new();
            let mut warnings: Vec<String> = Vec::new();

            // 1. Nome (obrigatório)
            let nome = self.resolve_text(row, mapping, rules, CanonicalField::Nome);
            if nome.is_empty() {
                errors.push("Nome é obrigatório".to_string());
            }

            // 2. Quantidade (número > 0)
            let quantidade =
                match self.resolve_number(row, mapping, rules, CanonicalField::Quantidade) {
                    Some(q) if q > 0.0 => q,
                    _ => {
                        errors.push(
                            "Quantidade deve ser um número maior que zero".to_string(),
                        );
                        0.0
                    }
                };

            // 3. Peso unitário (opcional; se presente, número >= 0)
            let peso_unitario = if self.has_value(row, mapping, CanonicalField::PesoUnitario) {
                match self.resolve_number(row, mapping, rules, CanonicalField::PesoUnitario) {
                    Some(p) if p < 0.0 => {
                        errors.push("Peso unitário não pode ser negativo".to_string());
                        0.0
                    }
                    Some(p) => p,
                    None => {
                        errors.push("Peso unitário deve ser um número".to_string());
                        0.0
                    }
                }
            } else {
                0.0
            };

            // 4. Datas (formato canônico; inválida é aviso, não erro)
            let data_inicio =
                self.resolve_date(row, mapping, rules, CanonicalField::DataInicio, &mut warnings);
            let data_fim_prevista = self.resolve_date(
                row,
                mapping,
                rules,
                CanonicalField::DataFimPrevista,
                &mut warnings,
            );

            // 5. Etapa (substring, sem diferenciar caixa)
            let etapa = self.infer_stage(row, stage_column, &mut warnings);

            // 6. Derivação: peso_total
            let peso_total = round_to(
                peso_unitario * quantidade,
                self.config.default_decimal_places,
            );

            for message in warnings {
                outcome.warnings.push(RowWarning {
                    row_number,
                    message,
                });
            }

            if errors.is_empty() {
                outcome.valid.push(ValidRow {
                    row_number,
                    record: CanonicalRow {
                        codigo: self.resolve_optional(row, mapping, rules, CanonicalField::Codigo),
                        nome,
                        marca: self.resolve_optional(row, mapping, rules, CanonicalField::Marca),
                        peso_unitario,
                        quantidade,
                        peso_total,
                        etapa,
                        responsavel: self.resolve_optional(
                            row,
                            mapping,
                            rules,
                            CanonicalField::Responsavel,
                        ),
                        data_inicio,
                        data_fim_prevista,
                        observacoes: self.resolve_optional(
                            row,
                            mapping,
                            rules,
                            CanonicalField::Observacoes,
                        ),
                    },
                });
            } else {
                debug!(row_number, erros = errors.len(), "linha reprovada");
                outcome.invalid.push(InvalidRow { row_number, errors });
            }
        }

        outcome
    }

    /// Valor bruto do campo na linha, via indireção do mapeamento.
    fn raw_value<'a>(
        &self,
        row: &'a RawRow,
        mapping: &FieldMapping,
        field: CanonicalField,
    ) -> &'a str {
        mapping
            .get(field)
            .and_then(|header| row.get(header))
            .map(|v| v.as_str())
            .unwrap_or("")
    }

    fn has_value(&self, row: &RawRow, mapping: &FieldMapping, field: CanonicalField) -> bool {
        !self.raw_value(row, mapping, field).trim().is_empty()
    }

    /// Texto após regra de transformação + trim de base.
    fn resolve_text(
        &self,
        row: &RawRow,
        mapping: &FieldMapping,
        rules: &RuleSet,
        field: CanonicalField,
    ) -> String {
        let raw = self.raw_value(row, mapping, field);
        self.engine
            .apply(raw, rules.get(field))
            .as_text()
            .trim()
            .to_string()
    }

    fn resolve_optional(
        &self,
        row: &RawRow,
        mapping: &FieldMapping,
        rules: &RuleSet,
        field: CanonicalField,
    ) -> Option<String> {
        let texto = self.resolve_text(row, mapping, rules, field);
        if texto.is_empty() {
            None
        } else {
            Some(texto)
        }
    }

    /// Número após regra (se houver) ou parse tolerante do texto:
    /// mantém dígitos, vírgula, ponto e sinal; vírgula vira ponto.
    fn resolve_number(
        &self,
        row: &RawRow,
        mapping: &FieldMapping,
        rules: &RuleSet,
        field: CanonicalField,
    ) -> Option<f64> {
        let raw = self.raw_value(row, mapping, field);
        match self.engine.apply(raw, rules.get(field)) {
            FieldValue::Number(n) => Some(n),
            FieldValue::Text(texto) => parse_loose_number(&texto),
        }
    }

    /// Data no formato canônico; malformada vira aviso e o
    /// valor segue como veio.
    fn resolve_date(
        &self,
        row: &RawRow,
        mapping: &FieldMapping,
        rules: &RuleSet,
        field: CanonicalField,
        warnings: &mut Vec<String>,
    ) -> Option<String> {
        let valor = self.resolve_optional(row, mapping, rules, field)?;
        if NaiveDate::parse_from_str(&valor, &self.config.date_format).is_err() {
            warnings.push(format!(
                "{} inválida: \"{}\" (formato esperado YYYY-MM-DD)",
                field.label(),
                valor
            ));
        }
        Some(valor)
    }

    /// Inferência da etapa por substring no texto da coluna
    /// designada; não reconhecida assume fabricação com aviso.
    fn infer_stage(
        &self,
        row: &RawRow,
        stage_column: &str,
        warnings: &mut Vec<String>,
    ) -> Etapa {
        let texto = row
            .get(stage_column)
            .map(|v| v.to_lowercase())
            .unwrap_or_default();

        if texto.contains(&self.config.montagem_keyword) {
            Etapa::Montagem
        } else if texto.contains(&self.config.fabricacao_keyword) {
            Etapa::Fabricacao
        } else {
            warnings.push("Etapa não reconhecida".to_string());
            Etapa::Fabricacao
        }
    }
}

/// Parse numérico tolerante usado quando não há regra `number`
/// configurada para o campo.
fn parse_loose_number(texto: &str) -> Option<f64> {
    let limpo: String = texto
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect::<String>()
        .replace(',', ".");

    if limpo.is_empty() {
        return None;
    }
    limpo.parse::<f64>().ok()
}

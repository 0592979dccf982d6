// ==========================================
// Gestão Metálica - Mapeador de colunas
// ==========================================
// Estágio 1 do pipeline: vínculo interativo entre
// campos canônicos e cabeçalhos brutos. A progressão
// do assistente é travada até todos os campos
// obrigatórios e a coluna de etapa estarem vinculados.
// Sem efeitos além do estado local da sessão.
// ==========================================

use crate::domain::profile::{FieldMapping, MappingProfile, TransformationRule};
use crate::domain::types::CanonicalField;
use crate::importer::error::{ImportError, ImportResult};

// ==========================================
// ColumnMapper
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    mapping: FieldMapping,
    stage_column: Option<String>,
}

impl ColumnMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atualiza um único vínculo campo → cabeçalho.
    pub fn set_mapping(&mut self, field: CanonicalField, header: Option<String>) {
        self.mapping.set(field, header);
    }

    /// Define a coluna que carrega o texto de etapa,
    /// rastreada à parte do mapeamento canônico.
    pub fn set_stage_column(&mut self, header: Option<String>) {
        self.stage_column = header.and_then(|h| {
            let h = h.trim().to_string();
            if h.is_empty() {
                None
            } else {
                Some(h)
            }
        });
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn stage_column(&self) -> Option<&str> {
        self.stage_column.as_deref()
    }

    /// Re-hidrata o estado a partir de um perfil salvo.
    ///
    /// Não confere se os cabeçalhos referenciados existem no
    /// arquivo atual: perfil defasado produz silenciosamente
    /// campos não mapeados, e o resto do pipeline trata isso
    /// como célula ausente.
    pub fn apply_profile(&mut self, profile: &MappingProfile) -> Vec<TransformationRule> {
        self.mapping = profile.mapping.clone();
        self.stage_column = Some(profile.stage_column.clone());
        profile.rules.clone()
    }

    /// Pré-preenche pelo modelo canônico de planilha,
    /// incluindo a coluna de etapa.
    pub fn auto_detect(&mut self, headers: &[String]) {
        self.mapping = FieldMapping::auto_detect(headers);
        self.stage_column = headers
            .iter()
            .find(|h| h.trim().eq_ignore_ascii_case("etapa"))
            .cloned();
    }

    /// Confirma o mapeamento e libera o próximo estágio.
    ///
    /// # Retorno
    /// - Ok((FieldMapping, coluna de etapa)): tudo vinculado
    /// - Err(MappingIncomplete): nomes dos vínculos ausentes
    pub fn confirm(&self) -> ImportResult<(FieldMapping, String)> {
        let mut missing: Vec<String> = self
            .mapping
            .missing_required()
            .iter()
            .map(|f| f.label().to_string())
            .collect();

        if self.stage_column.is_none() {
            missing.push("Coluna de Etapa".to_string());
        }

        if !missing.is_empty() {
            return Err(ImportError::MappingIncomplete { missing });
        }

        // stage_column é Some aqui pelo teste acima
        let stage = self.stage_column.clone().unwrap_or_default();
        Ok((self.mapping.clone(), stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_confirm_bloqueia_sem_obrigatorios() {
        let mapper = ColumnMapper::new();
        let err = mapper.confirm().unwrap_err();

        match err {
            ImportError::MappingIncomplete { missing } => {
                assert_eq!(missing, vec!["Nome", "Quantidade", "Coluna de Etapa"]);
            }
            outro => panic!("erro inesperado: {outro}"),
        }
    }

    #[test]
    fn test_confirm_com_minimo() {
        let mut mapper = ColumnMapper::new();
        mapper.set_mapping(CanonicalField::Nome, Some("Descrição".to_string()));
        mapper.set_mapping(CanonicalField::Quantidade, Some("Qtd".to_string()));
        mapper.set_stage_column(Some("Fase".to_string()));

        let (mapping, stage) = mapper.confirm().unwrap();
        assert_eq!(mapping.get(CanonicalField::Nome), Some("Descrição"));
        assert_eq!(stage, "Fase");
    }

    #[test]
    fn test_auto_detect_inclui_coluna_etapa() {
        let headers: Vec<String> = ["Nome", "Quantidade", "Etapa"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut mapper = ColumnMapper::new();
        mapper.auto_detect(&headers);

        assert!(mapper.confirm().is_ok());
        assert_eq!(mapper.stage_column(), Some("Etapa"));
    }

    #[test]
    fn test_apply_profile_re_hidrata_sem_conferir_cabecalhos() {
        let mut mapping = FieldMapping::new();
        mapping.set(CanonicalField::Nome, Some("Coluna Que Nao Existe".to_string()));
        mapping.set(CanonicalField::Quantidade, Some("Qtd".to_string()));

        let profile = MappingProfile {
            profile_id: "p1".to_string(),
            name: "antigo".to_string(),
            description: None,
            mapping,
            rules: Vec::new(),
            stage_column: "Etapa".to_string(),
            created_at: Utc::now(),
        };

        let mut mapper = ColumnMapper::new();
        let rules = mapper.apply_profile(&profile);

        assert!(rules.is_empty());
        // o perfil entra como está, mesmo com cabeçalho defasado
        assert_eq!(
            mapper.mapping().get(CanonicalField::Nome),
            Some("Coluna Que Nao Existe")
        );
        assert!(mapper.confirm().is_ok());
    }
}

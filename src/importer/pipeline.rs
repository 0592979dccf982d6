// ==========================================
// Gestão Metálica - Máquina de estados do assistente
// ==========================================
// O assistente de importação como máquina de estados
// explícita, independente de camada de renderização:
// Idle → FileLoaded → Mapped → Validated → Previewed
// → Committing → {Committed | Failed}.
// Cancelamento cooperativo em qualquer estado não
// terminal antes de Committing; descarta todo o
// estado em memória sem efeito persistido.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::import::{CommitSummary, ParsedFile, ValidationOutcome};
use crate::domain::profile::{MappingProfile, TransformationRule};
use crate::domain::types::{CanonicalField, Etapa};
use crate::importer::column_mapper::ColumnMapper;
use crate::importer::committer::ImportCommitter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalReader;
use crate::importer::transformation::RuleSet;
use crate::repository::import_repo::ImportRepository;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// PipelineState
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    FileLoaded,
    Mapped,
    Validated,
    Previewed,
    Committing,
    Committed,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Committed | PipelineState::Failed)
    }

    /// Cancelar é permitido antes de Committing; depois que a
    /// gravação começa não há mais volta.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal() && *self != PipelineState::Committing
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nome = match self {
            PipelineState::Idle => "Idle",
            PipelineState::FileLoaded => "FileLoaded",
            PipelineState::Mapped => "Mapped",
            PipelineState::Validated => "Validated",
            PipelineState::Previewed => "Previewed",
            PipelineState::Committing => "Committing",
            PipelineState::Committed => "Committed",
            PipelineState::Failed => "Failed",
        };
        write!(f, "{nome}")
    }
}

// ==========================================
// ImportPipeline - Sessão de importação
// ==========================================
// Uma sessão por operador; o estado é todo local e
// morre com a sessão, exceto o que o commit grava.
pub struct ImportPipeline {
    state: PipelineState,
    config: ImportConfig,
    mapper: ColumnMapper,
    rules: RuleSet,
    parsed: Option<ParsedFile>,
    outcome: Option<ValidationOutcome>,
    committer: ImportCommitter,
}

impl ImportPipeline {
    pub fn new(config: ImportConfig, repo: Arc<dyn ImportRepository>) -> Self {
        Self {
            state: PipelineState::Idle,
            config,
            mapper: ColumnMapper::new(),
            rules: RuleSet::new(),
            parsed: None,
            outcome: None,
            committer: ImportCommitter::new(repo),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Cabeçalhos do arquivo carregado (para a UI de mapeamento).
    pub fn headers(&self) -> Option<&[String]> {
        self.parsed.as_ref().map(|p| p.headers.as_slice())
    }

    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }

    fn guard(&self, action: &str, allowed: &[PipelineState]) -> ImportResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ImportError::InvalidTransition {
                state: self.state.to_string(),
                action: action.to_string(),
            })
        }
    }

    /// Carrega (ou recarrega) um arquivo. Erro fatal de formato
    /// ou arquivo vazio devolve o assistente ao passo de upload
    /// sem reter estado do arquivo anterior.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> ImportResult<&ParsedFile> {
        self.guard(
            "load_file",
            &[
                PipelineState::Idle,
                PipelineState::FileLoaded,
                PipelineState::Mapped,
                PipelineState::Validated,
                PipelineState::Previewed,
            ],
        )?;

        self.parsed = None;
        self.outcome = None;
        self.state = PipelineState::Idle;

        let parsed = UniversalReader.read(path).map_err(|e| {
            warn!(error = %e, "falha ao carregar arquivo");
            e
        })?;

        info!(
            file = %parsed.file_name,
            rows = parsed.rows.len(),
            headers = parsed.headers.len(),
            "arquivo carregado"
        );
        self.state = PipelineState::FileLoaded;
        // mapeamento e regras sobrevivem ao re-upload; o operador
        // só refaz o que mudou
        Ok(&*self.parsed.insert(parsed))
    }

    /// Atualiza um vínculo campo → cabeçalho.
    pub fn set_mapping(&mut self, field: CanonicalField, header: Option<String>) {
        self.mapper.set_mapping(field, header);
    }

    pub fn set_stage_column(&mut self, header: Option<String>) {
        self.mapper.set_stage_column(header);
    }

    /// Adiciona uma regra de transformação (substitui a regra
    /// anterior do mesmo campo, se houver).
    pub fn add_rule(&mut self, rule: TransformationRule) {
        self.rules.add(rule);
    }

    pub fn remove_rule(&mut self, field: CanonicalField) {
        self.rules.remove(field);
    }

    /// Pré-preenche mapeamento e regras a partir de um perfil salvo.
    pub fn apply_profile(&mut self, profile: &MappingProfile) {
        let rules = self.mapper.apply_profile(profile);
        self.rules = RuleSet::from_rules(rules);
        info!(profile = %profile.name, "perfil aplicado à sessão");
    }

    /// Pré-preenche pelo modelo canônico de planilha.
    pub fn auto_detect_mapping(&mut self) -> ImportResult<()> {
        self.guard(
            "auto_detect_mapping",
            &[PipelineState::FileLoaded, PipelineState::Mapped],
        )?;
        let headers: Vec<String> = self
            .parsed
            .as_ref()
            .map(|p| p.headers.clone())
            .unwrap_or_default();
        self.mapper.auto_detect(&headers);
        Ok(())
    }

    /// Estado atual do mapeador (para salvar perfis e para a UI).
    pub fn mapper(&self) -> &ColumnMapper {
        &self.mapper
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Confirma o mapeamento; só progride com os campos
    /// obrigatórios e a coluna de etapa vinculados. Permitido
    /// também como "voltar e remapear" após a validação (o
    /// resultado anterior é descartado).
    pub fn confirm_mapping(&mut self) -> ImportResult<()> {
        self.guard(
            "confirm_mapping",
            &[
                PipelineState::FileLoaded,
                PipelineState::Mapped,
                PipelineState::Validated,
                PipelineState::Previewed,
            ],
        )?;

        self.mapper.confirm()?;
        self.outcome = None;
        self.state = PipelineState::Mapped;
        Ok(())
    }

    /// Roda o Validator sobre as linhas carregadas.
    pub fn validate(&mut self) -> ImportResult<&ValidationOutcome> {
        self.guard("validate", &[PipelineState::Mapped])?;

        let (mapping, stage_column) = self.mapper.confirm()?;
        let parsed = self
            .parsed
            .as_ref()
            .ok_or(ImportError::EmptyFile)?;

        let validator = crate::importer::validator::Validator::new(self.config.clone());
        let outcome = validator.validate(&parsed.rows, &mapping, &stage_column, &self.rules);

        info!(
            validas = outcome.valid.len(),
            invalidas = outcome.invalid.len(),
            avisos = outcome.warnings.len(),
            "validação concluída"
        );

        self.state = PipelineState::Validated;
        Ok(&*self.outcome.insert(outcome))
    }

    /// Relatório estruturado para revisão humana antes do portão.
    pub fn preview(&mut self) -> ImportResult<serde_json::Value> {
        self.guard("preview", &[PipelineState::Validated, PipelineState::Previewed])?;
        let report = self
            .outcome
            .as_ref()
            .map(|o| o.report())
            .unwrap_or_default();
        self.state = PipelineState::Previewed;
        Ok(report)
    }

    /// Grava o lote. Entra em Committing (sem cancelamento a
    /// partir daqui) e termina em Committed ou Failed.
    pub async fn commit(
        &mut self,
        etapa: Etapa,
        projeto_id: &str,
    ) -> ImportResult<CommitSummary> {
        self.guard("commit", &[PipelineState::Previewed])?;

        let outcome = self
            .outcome
            .take()
            .ok_or(ImportError::GateClosed { invalid_rows: 0 })?;
        if !outcome.gate_open() {
            let invalid_rows = outcome.invalid.len();
            self.outcome = Some(outcome);
            return Err(ImportError::GateClosed { invalid_rows });
        }

        self.state = PipelineState::Committing;
        let file_name = self.parsed.as_ref().map(|p| p.file_name.clone());

        let result = self.committer.commit(&outcome, etapa, projeto_id, file_name).await;
        self.outcome = Some(outcome);
        match result {
            Ok(summary) => {
                self.state = PipelineState::Committed;
                Ok(summary)
            }
            Err(e) => {
                self.state = PipelineState::Failed;
                Err(e)
            }
        }
    }

    /// Cancela a sessão e descarta todo o estado em memória.
    /// Proibido a partir de Committing.
    pub fn cancel(&mut self) -> ImportResult<()> {
        if !self.state.can_cancel() {
            return Err(ImportError::InvalidTransition {
                state: self.state.to_string(),
                action: "cancel".to_string(),
            });
        }

        info!(state = %self.state, "sessão de importação cancelada");
        self.state = PipelineState::Idle;
        self.parsed = None;
        self.outcome = None;
        self.mapper = ColumnMapper::new();
        self.rules = RuleSet::new();
        Ok(())
    }
}

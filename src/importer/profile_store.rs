// ==========================================
// Gestão Metálica - Perfis de mapeamento
// ==========================================
// CRUD de presets nomeados (mapeamento + regras +
// coluna de etapa) sobre o repositório injetado,
// com cache local de sessão. Nada de singleton de
// módulo: o store entra no pipeline por injeção.
// ==========================================

use crate::domain::profile::MappingProfile;
use crate::importer::column_mapper::ColumnMapper;
use crate::importer::error::ImportResult;
use crate::importer::transformation::RuleSet;
use crate::repository::import_repo::ProfileRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// ==========================================
// MappingProfileStore
// ==========================================
pub struct MappingProfileStore {
    repo: Arc<dyn ProfileRepository>,
    cache: Vec<MappingProfile>,
}

impl MappingProfileStore {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self {
            repo,
            cache: Vec::new(),
        }
    }

    /// Recarrega o cache a partir do armazenamento.
    pub async fn refresh(&mut self) -> ImportResult<&[MappingProfile]> {
        self.cache = self.repo.list_profiles().await?;
        Ok(&self.cache)
    }

    /// Perfis conhecidos pela sessão (sem ida ao armazenamento).
    pub fn cached(&self) -> &[MappingProfile] {
        &self.cache
    }

    /// Salva a configuração atual como perfil nomeado.
    ///
    /// O nome não precisa ser único; a identidade é o id gerado.
    pub async fn save(
        &mut self,
        name: &str,
        description: Option<String>,
        mapper: &ColumnMapper,
        rules: &RuleSet,
    ) -> ImportResult<MappingProfile> {
        let (mapping, stage_column) = mapper.confirm()?;

        let profile = MappingProfile {
            profile_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description,
            mapping,
            rules: rules.rules().to_vec(),
            stage_column,
            created_at: Utc::now(),
        };

        self.repo.save_profile(profile.clone()).await?;
        self.cache.push(profile.clone());
        info!(profile_id = %profile.profile_id, name = %profile.name, "perfil de mapeamento salvo");
        Ok(profile)
    }

    /// Exclui por id (a confirmação de ação destrutiva é
    /// responsabilidade de quem chama).
    pub async fn delete(&mut self, profile_id: &str) -> ImportResult<()> {
        self.repo.delete_profile(profile_id).await?;
        self.cache.retain(|p| p.profile_id != profile_id);
        info!(profile_id, "perfil de mapeamento excluído");
        Ok(())
    }

    /// Re-hidrata mapeador e regras a partir de um perfil.
    /// Regras duplicadas de perfis antigos são dedupadas na
    /// reconstrução (a última vence).
    pub fn load(profile: &MappingProfile, mapper: &mut ColumnMapper) -> RuleSet {
        let rules = mapper.apply_profile(profile);
        RuleSet::from_rules(rules)
    }
}

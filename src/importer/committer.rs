// ==========================================
// Gestão Metálica - Gravador de importação
// ==========================================
// Estágio final do pipeline: linhas válidas viram
// registros persistidos. Três inserções em massa,
// estritamente em ordem: itens → tarefas → itens de
// montagem espelhados (regra de espelhamento).
// Sem transação compensatória: falha no meio deixa
// os lotes anteriores gravados e reporta isso.
// ==========================================

use crate::domain::import::{CommitSummary, ImportBatch, ValidRow, ValidationOutcome};
use crate::domain::item::{ProductionItem, Task};
use crate::domain::types::{Etapa, ItemStatus};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::import_repo::ImportRepository;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// ImportCommitter
// ==========================================
pub struct ImportCommitter {
    repo: Arc<dyn ImportRepository>,
}

impl ImportCommitter {
    pub fn new(repo: Arc<dyn ImportRepository>) -> Self {
        Self { repo }
    }

    /// Grava o lote validado no armazenamento externo.
    ///
    /// A etapa é escolhida uma vez por sessão de importação:
    /// apenas as linhas válidas daquela etapa entram. Se a
    /// etapa for fabricação, cada item criado é clonado para
    /// montagem com progresso zerado.
    #[instrument(skip(self, outcome), fields(projeto_id, etapa = %etapa))]
    pub async fn commit(
        &self,
        outcome: &ValidationOutcome,
        etapa: Etapa,
        projeto_id: &str,
        file_name: Option<String>,
    ) -> ImportResult<CommitSummary> {
        // Portão de validação: uma linha malformada bloqueia
        // o lote inteiro, não só a si mesma.
        if !outcome.gate_open() {
            return Err(ImportError::GateClosed {
                invalid_rows: outcome.invalid.len(),
            });
        }

        let start = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, "iniciando gravação do lote");

        let selecionadas: Vec<&ValidRow> = outcome
            .valid
            .iter()
            .filter(|r| r.record.etapa == etapa)
            .collect();

        // === Passo 1: itens de produção ===
        debug!(count = selecionadas.len(), "passo 1: itens de produção");
        let items: Vec<ProductionItem> = selecionadas
            .iter()
            .map(|row| Self::to_item(row, etapa, projeto_id))
            .collect();

        let itens_criados = self
            .repo
            .bulk_create_items(items.clone())
            .await
            .map_err(|e| ImportError::CommitFailed {
                stage: "itens".to_string(),
                itens_criados: 0,
                tarefas_criadas: 0,
                source: e,
            })?;

        // === Passo 2: tarefas companheiras ===
        debug!("passo 2: tarefas companheiras");
        let tasks: Vec<Task> = items.iter().map(Self::to_task).collect();
        let tarefas_criadas = self
            .repo
            .bulk_create_tasks(tasks)
            .await
            .map_err(|e| ImportError::CommitFailed {
                stage: "tarefas".to_string(),
                itens_criados,
                tarefas_criadas: 0,
                source: e,
            })?;

        // === Passo 3: espelhamento fabricação → montagem ===
        let itens_espelhados = if etapa == Etapa::Fabricacao {
            debug!("passo 3: itens de montagem espelhados");
            let espelhos: Vec<ProductionItem> = items
                .iter()
                .map(|item| item.mirror_to_montagem(Uuid::new_v4().to_string()))
                .collect();

            self.repo
                .bulk_create_items(espelhos)
                .await
                .map_err(|e| ImportError::CommitFailed {
                    stage: "itens espelhados de montagem".to_string(),
                    itens_criados,
                    tarefas_criadas,
                    source: e,
                })?
        } else {
            0
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;

        // === Passo 4: auditoria do lote ===
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            projeto_id: projeto_id.to_string(),
            file_name,
            etapa,
            total_rows: outcome.valid.len() + outcome.invalid.len(),
            valid_rows: outcome.valid.len(),
            warning_rows: outcome.warnings.len(),
            itens_criados,
            tarefas_criadas,
            itens_espelhados,
            imported_at: Utc::now(),
            elapsed_ms,
        };
        self.repo
            .insert_batch(batch)
            .await
            .map_err(|e| ImportError::CommitFailed {
                stage: "auditoria do lote".to_string(),
                itens_criados,
                tarefas_criadas,
                source: e,
            })?;

        info!(
            batch_id = %batch_id,
            itens = itens_criados,
            tarefas = tarefas_criadas,
            espelhados = itens_espelhados,
            elapsed_ms,
            "lote gravado"
        );

        Ok(CommitSummary {
            batch_id,
            itens_criados,
            tarefas_criadas,
            itens_espelhados,
            elapsed_ms,
        })
    }

    fn to_item(row: &ValidRow, etapa: Etapa, projeto_id: &str) -> ProductionItem {
        let agora = Utc::now();
        let record = &row.record;
        ProductionItem {
            item_id: Uuid::new_v4().to_string(),
            projeto_id: projeto_id.to_string(),
            codigo: record.codigo.clone(),
            nome: record.nome.clone(),
            marca: record.marca.clone(),
            peso_unitario: record.peso_unitario,
            quantidade: record.quantidade,
            peso_total: record.peso_total,
            etapa,
            responsavel: record.responsavel.clone(),
            data_inicio: record.data_inicio.clone(),
            data_fim_prevista: record.data_fim_prevista.clone(),
            observacoes: record.observacoes.clone(),
            quantidade_produzida: 0.0,
            percentual_conclusao: 0.0,
            status: ItemStatus::Pendente,
            created_at: agora,
            updated_at: agora,
        }
    }

    /// Tarefa companheira: título = nome do item, responsável
    /// e datas espelhados, progresso zero.
    fn to_task(item: &ProductionItem) -> Task {
        Task {
            tarefa_id: Uuid::new_v4().to_string(),
            projeto_id: item.projeto_id.clone(),
            item_id: item.item_id.clone(),
            titulo: item.nome.clone(),
            responsavel: item.responsavel.clone(),
            data_inicio: item.data_inicio.clone(),
            data_fim_prevista: item.data_fim_prevista.clone(),
            progresso: 0.0,
            status: ItemStatus::Pendente,
            created_at: Utc::now(),
        }
    }
}

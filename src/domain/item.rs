// ==========================================
// Gestão Metálica - Entidades persistidas
// ==========================================
// Registros gravados no armazenamento externo pelo
// passo de commit: itens de produção e tarefas
// companheiras. A camada de importação escreve,
// os painéis apenas leem.
// ==========================================

use crate::domain::types::{Etapa, ItemStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionItem - Item de produção
// ==========================================
// Saída canônica do pipeline. Invariante:
// peso_total = round(peso_unitario * quantidade, 2).
// Datas permanecem como texto: data malformada é
// aviso, não erro, e o valor entra "como veio".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionItem {
    // ===== Identificação =====
    pub item_id: String,    // UUID
    pub projeto_id: String, // projeto de destino

    // ===== Dados canônicos =====
    pub codigo: Option<String>,
    pub nome: String,
    pub marca: Option<String>,
    pub peso_unitario: f64, // kg (0.0 se não mapeado)
    pub quantidade: f64,
    pub peso_total: f64, // derivado, 2 casas
    pub etapa: Etapa,
    pub responsavel: Option<String>,
    pub data_inicio: Option<String>,       // YYYY-MM-DD (melhor esforço)
    pub data_fim_prevista: Option<String>, // YYYY-MM-DD (melhor esforço)
    pub observacoes: Option<String>,

    // ===== Padrões de commit =====
    pub quantidade_produzida: f64,  // sempre 0 na criação
    pub percentual_conclusao: f64,  // sempre 0 na criação
    pub status: ItemStatus,         // sempre pendente na criação

    // ===== Auditoria =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductionItem {
    /// Clona o item para a etapa de montagem (regra de espelhamento).
    ///
    /// Código, peso e quantidade idênticos; campos de progresso
    /// zerados; novo identificador.
    pub fn mirror_to_montagem(&self, item_id: String) -> ProductionItem {
        let agora = Utc::now();
        ProductionItem {
            item_id,
            etapa: Etapa::Montagem,
            quantidade_produzida: 0.0,
            percentual_conclusao: 0.0,
            status: ItemStatus::Pendente,
            created_at: agora,
            updated_at: agora,
            ..self.clone()
        }
    }
}

// ==========================================
// Task - Tarefa companheira
// ==========================================
// Uma por item criado: título = nome do item,
// responsável e datas espelhados, progresso 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub tarefa_id: String,  // UUID
    pub projeto_id: String,
    pub item_id: String, // item de produção de origem

    pub titulo: String,
    pub responsavel: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim_prevista: Option<String>,
    pub progresso: f64, // 0..100, sempre 0 na criação
    pub status: ItemStatus,

    pub created_at: DateTime<Utc>,
}

// ==========================================
// Gestão Metálica - Camada de configuração
// ==========================================
// Parâmetros do pipeline de importação, injetados
// nos componentes em vez de constantes espalhadas.
// Sem escrita, sem lógica de negócio.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ImportConfig - Configuração da importação
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Formato canônico de data (única forma aceita).
    pub date_format: String,

    /// Casas decimais padrão da regra `number` e do
    /// peso_total derivado.
    pub default_decimal_places: u32,

    /// Fragmento que identifica a etapa de montagem
    /// (busca por substring, sem diferenciar caixa).
    pub montagem_keyword: String,

    /// Fragmento que identifica a etapa de fabricação.
    pub fabricacao_keyword: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            default_decimal_places: 2,
            montagem_keyword: "montag".to_string(),
            fabricacao_keyword: "fabric".to_string(),
        }
    }
}

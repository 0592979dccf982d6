// ==========================================
// Gestão Metálica - Ponto de entrada
// ==========================================
// Demonstração de linha de comando do pipeline de
// importação: carrega um arquivo, mapeia pelo modelo
// canônico, valida e grava o lote em memória.
// ==========================================

use producao_import::importer::ImportPipeline;
use producao_import::repository::InMemoryStore;
use producao_import::{logging, Etapa, ImportConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o sistema de log
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", producao_import::APP_NAME);
    tracing::info!("Versão: {}", producao_import::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("Uso: producao-import <arquivo.xlsx|csv|txt|json> [projeto_id]");
            std::process::exit(2);
        }
    };
    let projeto_id = args.next().unwrap_or_else(|| "projeto-demo".to_string());

    let repo = Arc::new(InMemoryStore::new());
    let mut pipeline = ImportPipeline::new(ImportConfig::default(), repo.clone());

    // Passo 1: upload
    let parsed = pipeline.load_file(&path)?;
    tracing::info!(
        "Arquivo carregado: {} ({} linhas, {} colunas)",
        parsed.file_name,
        parsed.rows.len(),
        parsed.headers.len()
    );

    // Passo 2: mapeamento pelo modelo canônico
    pipeline.auto_detect_mapping()?;
    pipeline.confirm_mapping()?;

    // Passo 3: validação e prévia
    pipeline.validate()?;
    let report = pipeline.preview()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    // Passo 4: gravação (apenas se o portão estiver aberto)
    if report["commit_habilitado"] == true {
        let summary = pipeline.commit(Etapa::Fabricacao, &projeto_id).await?;
        tracing::info!(
            "Lote {} gravado: {} itens, {} tarefas, {} itens espelhados em {} ms",
            summary.batch_id,
            summary.itens_criados,
            summary.tarefas_criadas,
            summary.itens_espelhados,
            summary.elapsed_ms
        );
    } else {
        tracing::warn!("Gravação bloqueada: corrija as linhas inválidas e importe novamente");
        std::process::exit(1);
    }

    Ok(())
}

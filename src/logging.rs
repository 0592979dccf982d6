// ==========================================
// Inicialização do sistema de log
// ==========================================
// Usa tracing e tracing-subscriber
// Nível configurável por variável de ambiente
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa o sistema de log.
///
/// # Variáveis de ambiente
/// - RUST_LOG: filtro de nível de log (padrão: info)
///   ex.: RUST_LOG=debug ou RUST_LOG=producao_import=trace
///
/// # Exemplo
/// ```no_run
/// use producao_import::logging;
/// logging::init();
/// ```
pub fn init() {
    // Lê o nível da variável de ambiente, padrão info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Configura o formato do log
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Inicializa o log para o ambiente de testes.
///
/// Usa nível mais detalhado para facilitar a depuração.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

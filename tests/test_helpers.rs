// ==========================================
// Utilitários compartilhados de teste
// ==========================================
// Criação de arquivos temporários de importação nos
// formatos suportados.
// ==========================================

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// Grava `contents` num arquivo temporário com a extensão dada
/// (ex.: ".csv", ".txt", ".json").
pub fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("falha ao criar arquivo temporário");
    file.write_all(contents.as_bytes())
        .expect("falha ao escrever arquivo temporário");
    file.flush().expect("falha ao descarregar arquivo temporário");
    file
}

/// Planilha CSV no modelo canônico completo, com `rows`
/// linhas de fabricação bem formadas.
pub fn canonical_csv(rows: usize) -> String {
    let mut out = String::from(
        "Código,Nome,Marca,Peso Unitário (kg),Quantidade,Responsável,Data Início,Data Fim Prevista,Observações,Etapa\n",
    );
    for i in 1..=rows {
        out.push_str(&format!(
            "C-{i:03},Viga {i},M{i},12.5,{i},Equipe A,2026-01-10,2026-02-20,lote piloto,fabricacao\n"
        ));
    }
    out
}

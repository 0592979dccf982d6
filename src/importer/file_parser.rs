// ==========================================
// Gestão Metálica - Leitor de formatos
// ==========================================
// Estágio 0 do pipeline: arquivo → linhas brutas.
// Suporta: Excel (.xlsx/.xls) / CSV (.csv) /
// texto delimitado (.txt) / JSON (.json)
// Sem esquema fixo: cada linha é cabeçalho → texto.
// ==========================================

use crate::domain::import::{ParsedFile, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Leitor de um formato de arquivo de importação.
pub trait FormatReader: Send + Sync {
    /// Lê o arquivo inteiro em linhas brutas mais a lista
    /// ordenada de cabeçalhos descobertos.
    fn read_file(&self, path: &Path) -> ImportResult<ParsedFile>;
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("desconhecido")
        .to_string()
}

/// Linha totalmente em branco é descartada na leitura.
fn is_blank(row: &RawRow) -> bool {
    row.values().all(|v| v.is_empty())
}

// ==========================================
// ExcelReader - Planilhas .xlsx/.xls
// ==========================================
// Primeira aba apenas; célula ausente vira "".
pub struct ExcelReader;

impl FormatReader for ExcelReader {
    fn read_file(&self, path: &Path) -> ImportResult<ParsedFile> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParse("planilha sem abas".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParse(e.to_string()))?;

        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or(ImportError::EmptyFile)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in rows_iter {
            let mut row: RawRow = HashMap::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = data_row
                    .get(idx)
                    .map(|cell| cell.to_string().trim().to_string())
                    .unwrap_or_default();
                row.insert(header.clone(), value);
            }
            if is_blank(&row) {
                continue;
            }
            rows.push(row);
        }

        Ok(ParsedFile {
            file_name: file_name_of(path),
            headers,
            rows,
        })
    }
}

// ==========================================
// DelimitedReader - CSV e texto delimitado
// ==========================================
// .csv usa vírgula; .txt detecta o separador pela
// linha de cabeçalho: tab > ponto e vírgula > tab
// como padrão.
pub struct DelimitedReader {
    delimiter: u8,
}

impl DelimitedReader {
    pub fn csv() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Detecta o separador de um .txt pela linha de cabeçalho.
    pub fn detect(header_line: &str) -> u8 {
        if header_line.contains('\t') {
            b'\t'
        } else if header_line.contains(';') {
            b';'
        } else {
            b'\t'
        }
    }
}

impl FormatReader for DelimitedReader {
    fn read_file(&self, path: &Path) -> ImportResult<ParsedFile> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // linhas com comprimento irregular são aceitas
            .from_reader(contents.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: RawRow = HashMap::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = record.get(idx).unwrap_or("").trim().to_string();
                row.insert(header.clone(), value);
            }
            if is_blank(&row) {
                continue;
            }
            rows.push(row);
        }

        Ok(ParsedFile {
            file_name: file_name_of(path),
            headers,
            rows,
        })
    }
}

// ==========================================
// JsonReader - Arquivos .json
// ==========================================
// Valor raiz: array de objetos, ou objeto cujos
// valores formam a sequência de linhas.
pub struct JsonReader;

impl JsonReader {
    fn value_to_text(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.trim().to_string(),
            outro => outro.to_string(),
        }
    }
}

impl FormatReader for JsonReader {
    fn read_file(&self, path: &Path) -> ImportResult<ParsedFile> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&contents)?;

        let entries: Vec<Value> = match root {
            Value::Array(itens) => itens,
            Value::Object(mapa) => mapa.into_iter().map(|(_, v)| v).collect(),
            _ => {
                return Err(ImportError::JsonParse(
                    "valor raiz deve ser array ou objeto".to_string(),
                ))
            }
        };

        let mut headers: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for entry in &entries {
            let obj = entry.as_object().ok_or_else(|| {
                ImportError::JsonParse("cada linha deve ser um objeto".to_string())
            })?;

            let mut row: RawRow = HashMap::new();
            for (key, value) in obj {
                let key = key.trim().to_string();
                if !headers.contains(&key) {
                    headers.push(key.clone());
                }
                row.insert(key, Self::value_to_text(value));
            }
            if is_blank(&row) {
                continue;
            }
            rows.push(row);
        }

        Ok(ParsedFile {
            file_name: file_name_of(path),
            headers,
            rows,
        })
    }
}

// ==========================================
// UniversalReader - Despacho por extensão
// ==========================================
// Ponto de entrada do pipeline. Extensão desconhecida
// e arquivo sem linhas de dados são falhas fatais:
// abortam o assistente antes de qualquer mapeamento.
pub struct UniversalReader;

impl UniversalReader {
    pub fn read<P: AsRef<Path>>(&self, path: P) -> ImportResult<ParsedFile> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parsed = match ext.as_str() {
            "xlsx" | "xls" => ExcelReader.read_file(path)?,
            "csv" => DelimitedReader::csv().read_file(path)?,
            "txt" => {
                let contents = std::fs::read_to_string(path)?;
                let header_line = contents.lines().next().unwrap_or("");
                let delimiter = DelimitedReader::detect(header_line);
                DelimitedReader::with_delimiter(delimiter).read_file(path)?
            }
            "json" => JsonReader.read_file(path)?,
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        };

        if parsed.rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(ext).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_csv_basico() {
        let file = temp_with(".csv", "Nome,Quantidade\nViga X,5\nColuna Y,2\n");
        let parsed = UniversalReader.read(file.path()).unwrap();

        assert_eq!(parsed.headers, vec!["Nome", "Quantidade"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].get("Nome"), Some(&"Viga X".to_string()));
        assert_eq!(parsed.rows[1].get("Quantidade"), Some(&"2".to_string()));
    }

    #[test]
    fn test_csv_pula_linha_em_branco() {
        let file = temp_with(".csv", "Nome,Quantidade\nViga X,5\n,\nColuna Y,2\n");
        let parsed = UniversalReader.read(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
    }

    #[test]
    fn test_csv_celula_ausente_vira_vazio() {
        let file = temp_with(".csv", "Nome,Quantidade,Marca\nViga X,5\n");
        let parsed = UniversalReader.read(file.path()).unwrap();
        assert_eq!(parsed.rows[0].get("Marca"), Some(&"".to_string()));
    }

    #[test]
    fn test_txt_detecta_tab() {
        let file = temp_with(".txt", "Nome\tQuantidade\nViga X\t10,5\n");
        let parsed = UniversalReader.read(file.path()).unwrap();
        assert_eq!(parsed.headers, vec!["Nome", "Quantidade"]);
        assert_eq!(parsed.rows[0].get("Quantidade"), Some(&"10,5".to_string()));
    }

    #[test]
    fn test_txt_detecta_ponto_e_virgula() {
        let file = temp_with(".txt", "Nome;Quantidade\nViga X;3\n");
        let parsed = UniversalReader.read(file.path()).unwrap();
        assert_eq!(parsed.rows[0].get("Quantidade"), Some(&"3".to_string()));
    }

    #[test]
    fn test_json_array_de_objetos() {
        let file = temp_with(
            ".json",
            r#"[{"Nome": "Viga X", "Quantidade": 5}, {"Nome": "Coluna Y", "Quantidade": "2"}]"#,
        );
        let parsed = UniversalReader.read(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].get("Quantidade"), Some(&"5".to_string()));
        assert_eq!(parsed.rows[1].get("Quantidade"), Some(&"2".to_string()));
    }

    #[test]
    fn test_json_objeto_usa_valores_como_linhas() {
        let file = temp_with(
            ".json",
            r#"{"a": {"Nome": "Viga X", "Quantidade": 5}, "b": {"Nome": "Coluna Y", "Quantidade": 2}}"#,
        );
        let parsed = UniversalReader.read(file.path()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
    }

    #[test]
    fn test_extensao_nao_suportada() {
        let file = temp_with(".pdf", "qualquer coisa");
        let result = UniversalReader.read(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_arquivo_so_com_cabecalho() {
        let file = temp_with(".csv", "Nome,Quantidade\n");
        let result = UniversalReader.read(file.path());
        assert!(matches!(result, Err(ImportError::EmptyFile)));
    }

    #[test]
    fn test_arquivo_inexistente() {
        let result = DelimitedReader::csv().read_file(Path::new("nao_existe.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}

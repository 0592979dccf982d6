// ==========================================
// Teste de integração do pipeline de importação
// ==========================================
// Objetivo: exercitar o assistente completo por cima
// dos formatos suportados, do upload à prévia.
// ==========================================

mod test_helpers;

use producao_import::domain::types::{CanonicalField, TransformKind};
use producao_import::domain::TransformationRule;
use producao_import::importer::{ImportError, ImportPipeline, PipelineState};
use producao_import::repository::InMemoryStore;
use producao_import::{logging, ImportConfig};
use std::sync::Arc;

fn new_pipeline() -> ImportPipeline {
    ImportPipeline::new(ImportConfig::default(), Arc::new(InMemoryStore::new()))
}

#[tokio::test]
async fn test_modelo_canonico_mapeia_sem_ajuste_manual() {
    logging::init_test();

    let file = test_helpers::write_temp(".csv", &test_helpers::canonical_csv(4));
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();

    // O modelo canônico deve ser reconhecido coluna a coluna
    pipe.auto_detect_mapping().unwrap();
    for field in CanonicalField::ALL {
        assert!(
            pipe.mapper().mapping().is_mapped(field),
            "campo {:?} deveria ser detectado",
            field
        );
    }

    pipe.confirm_mapping().unwrap();
    let outcome = pipe.validate().unwrap();
    assert_eq!(outcome.valid.len(), 4);
    assert!(outcome.invalid.is_empty());
    assert!(outcome.warnings.is_empty());
}

#[tokio::test]
async fn test_campo_derivado_peso_total() {
    logging::init_test();

    let file = test_helpers::write_temp(
        ".csv",
        "nome,peso unitário (kg),quantidade,etapa\n\
         Viga A,12.345,3,fabricacao\n\
         Viga B,0.1,7,fabricacao\n",
    );
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();
    pipe.auto_detect_mapping().unwrap();
    pipe.confirm_mapping().unwrap();

    let outcome = pipe.validate().unwrap();
    assert_eq!(outcome.valid.len(), 2);
    // round(12.345 * 3, 2) = 37.04 (arredondamento half-up do f64::round)
    assert_eq!(outcome.valid[0].record.peso_total, 37.04);
    assert_eq!(outcome.valid[1].record.peso_total, 0.7);
}

#[tokio::test]
async fn test_cenario_csv_minimo() {
    logging::init_test();

    let file = test_helpers::write_temp(".csv", "nome,quantidade,etapa\nViga X,5,fabricacao\n");
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();
    pipe.auto_detect_mapping().unwrap();
    pipe.confirm_mapping().unwrap();

    let outcome = pipe.validate().unwrap();
    assert_eq!(outcome.valid.len(), 1);
    let record = &outcome.valid[0].record;
    assert_eq!(record.nome, "Viga X");
    assert_eq!(record.quantidade, 5.0);
    // peso unitário ausente vira 0 e o derivado acompanha
    assert_eq!(record.peso_unitario, 0.0);
    assert_eq!(record.peso_total, 0.0);
}

#[tokio::test]
async fn test_txt_tabulado_com_regra_numerica() {
    logging::init_test();

    let file = test_helpers::write_temp(
        ".txt",
        "nome\tpeso unitário (kg)\tquantidade\tetapa\nViga Y\t10,5\t2\tfabricacao\n",
    );
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();
    pipe.auto_detect_mapping().unwrap();
    pipe.add_rule(
        TransformationRule::new(CanonicalField::PesoUnitario, TransformKind::Number)
            .with_decimals(1),
    );
    pipe.confirm_mapping().unwrap();

    let outcome = pipe.validate().unwrap();
    assert_eq!(outcome.valid.len(), 1);
    // vírgula decimal normalizada pela regra numérica
    assert_eq!(outcome.valid[0].record.peso_unitario, 10.5);
    assert_eq!(outcome.valid[0].record.peso_total, 21.0);
}

#[tokio::test]
async fn test_json_com_linhas_invalidas_fecha_o_portao() {
    logging::init_test();

    let file = test_helpers::write_temp(
        ".json",
        r#"[
            {"nome": "Viga A", "quantidade": "3", "etapa": "fabricacao"},
            {"nome": "", "quantidade": "3", "etapa": "fabricacao"},
            {"nome": "Viga C", "quantidade": "-1", "etapa": "fabricacao"}
        ]"#,
    );
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();
    pipe.auto_detect_mapping().unwrap();
    pipe.confirm_mapping().unwrap();

    let outcome = pipe.validate().unwrap();
    assert_eq!(outcome.valid.len(), 1);
    assert_eq!(outcome.invalid.len(), 2);
    // numeração 1-based contando o cabeçalho: primeira linha de dados = 2
    assert_eq!(outcome.invalid[0].row_number, 3);
    assert_eq!(outcome.invalid[0].errors, vec!["Nome é obrigatório"]);
    assert_eq!(
        outcome.invalid[1].errors,
        vec!["Quantidade deve ser um número maior que zero"]
    );

    let report = pipe.preview().unwrap();
    assert_eq!(report["commit_habilitado"], false);
    assert_eq!(report["total_invalidas"], 2);
}

#[tokio::test]
async fn test_avisos_nao_bloqueiam_commit() {
    logging::init_test();

    let file = test_helpers::write_temp(
        ".csv",
        "nome,quantidade,data início,etapa\nViga A,2,2026/01/10,corte\n",
    );
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();
    pipe.auto_detect_mapping().unwrap();
    pipe.confirm_mapping().unwrap();

    let outcome = pipe.validate().unwrap();
    assert_eq!(outcome.valid.len(), 1);
    assert!(outcome.invalid.is_empty());
    // data malformada + etapa desconhecida = dois avisos
    assert_eq!(outcome.warnings.len(), 2);
    assert!(outcome.gate_open());
}

#[tokio::test]
async fn test_mapeamento_incompleto_nao_avanca() {
    logging::init_test();

    let file = test_helpers::write_temp(".csv", "col_a,col_b\nx,y\n");
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();
    pipe.auto_detect_mapping().unwrap();

    let result = pipe.confirm_mapping();
    match result {
        Err(ImportError::MappingIncomplete { missing }) => {
            assert!(missing.contains(&"Nome".to_string()));
            assert!(missing.contains(&"Quantidade".to_string()));
            assert!(missing.contains(&"Coluna de Etapa".to_string()));
        }
        other => panic!("esperava MappingIncomplete, veio {other:?}"),
    }
    assert_eq!(pipe.state(), PipelineState::FileLoaded);
}

#[tokio::test]
async fn test_validar_antes_de_mapear_e_transicao_invalida() {
    logging::init_test();

    let file = test_helpers::write_temp(".csv", &test_helpers::canonical_csv(1));
    let mut pipe = new_pipeline();
    pipe.load_file(file.path()).unwrap();

    let result = pipe.validate();
    assert!(matches!(
        result,
        Err(ImportError::InvalidTransition { .. })
    ));
}

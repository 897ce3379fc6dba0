//! End-to-end checks: files on disk -> loaded tables -> dashboard charts

use std::fs;
use std::path::Path;

use aero_dashboard::{
    DashboardKind, DataConfig, DatasetError, Datasets, MapSettings, Trace, generate_summary,
    update_dashboard,
};

const OCCURRENCES: &str = "\
codigo_ocorrencia;ocorrencia_classificacao;ocorrencia_latitude;ocorrencia_longitude;ocorrencia_cidade;ocorrencia_uf;ocorrencia_pais
45331;ACIDENTE;-23.4356;-46.4731;GUARULHOS;SP;BRASIL
45332;INCIDENTE GRAVE;***;-47.0;CAMPINAS;SP;BRASIL
45333;INCIDENTE;-22.8099;-43.2505;RIO DE JANEIRO;RJ;BRASIL
45334;ACIDENTE;;;MANAUS;AM;BRASIL
45335;INCIDENTE;-3.0386;not-a-number;MANAUS;AM;BRASIL
";

const RECOMMENDATIONS: &str = "\
codigo_ocorrencia4;recomendacao_numero;recomendacao_status;recomendacao_destinatario_sigla
45331;A-001/CENIPA/2020;CUMPRIDA;ANAC
45331;A-002/CENIPA/2020;AGUARDANDO RESPOSTA;ANAC
45333;A-010/CENIPA/2021;CUMPRIDA;DECEA
";

const FACTORS: &str = "\
codigo_ocorrencia3;fator_nome;fator_aspecto;fator_area
45331;JULGAMENTO DE PILOTAGEM;DESEMPENHO DO SER HUMANO;FATOR OPERACIONAL
45331;SUPERVISÃO GERENCIAL;ORGANIZACIONAL;FATOR OPERACIONAL
45333;JULGAMENTO DE PILOTAGEM;DESEMPENHO DO SER HUMANO;FATOR HUMANO
45334;APLICAÇÃO DE COMANDOS;DESEMPENHO DO SER HUMANO;
";

fn write_fixture(dir: &Path) -> DataConfig {
    fs::write(dir.join("ocorrencia_clean.csv"), OCCURRENCES).unwrap();
    fs::write(dir.join("recomendacao_clean.csv"), RECOMMENDATIONS).unwrap();
    fs::write(dir.join("fator_contribuinte_clean.csv"), FACTORS).unwrap();
    DataConfig {
        dir: Some(dir.to_path_buf()),
        ..DataConfig::default()
    }
}

fn bar_total(trace: &Trace) -> usize {
    match trace {
        Trace::Bar(bar) => bar.y.iter().sum(),
        Trace::Pie(pie) => pie.values.iter().sum(),
        Trace::Scattermapbox(map) => map.lat.len(),
    }
}

#[test]
fn test_load_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let datasets = Datasets::load(&write_fixture(dir.path())).unwrap();

    assert_eq!(datasets.occurrences.len(), 5);
    assert_eq!(datasets.recommendations.len(), 3);
    assert_eq!(datasets.factors.len(), 4);
    assert_eq!(datasets.unmapped_occurrences(), 3);
}

#[test]
fn test_each_selection_yields_two_charts() {
    let dir = tempfile::tempdir().unwrap();
    let datasets = Datasets::load(&write_fixture(dir.path())).unwrap();
    let map = MapSettings::default();

    let expected = [
        (
            DashboardKind::Occurrences,
            ["Mapa de Ocorrências", "Ocorrências por Estado"],
        ),
        (
            DashboardKind::Recommendations,
            [
                "Status das Recomendações",
                "Recomendações por Destinatário",
            ],
        ),
        (
            DashboardKind::Factors,
            [
                "Fatores Contribuintes Mais Frequentes",
                "Distribuição por Área Afetada",
            ],
        ),
    ];

    for (kind, titles) in expected {
        let content = update_dashboard(kind, &datasets, &map);
        assert_eq!(content.charts.len(), 2, "{}", kind);
        assert_eq!(content.titles(), titles.to_vec(), "{}", kind);
    }
}

#[test]
fn test_counts_sum_to_row_totals() {
    let dir = tempfile::tempdir().unwrap();
    let datasets = Datasets::load(&write_fixture(dir.path())).unwrap();
    let map = MapSettings::default();

    let occurrences = update_dashboard(DashboardKind::Occurrences, &datasets, &map);
    assert_eq!(bar_total(&occurrences.charts[1].data[0]), 5);

    let recommendations = update_dashboard(DashboardKind::Recommendations, &datasets, &map);
    for chart in &recommendations.charts {
        assert_eq!(bar_total(&chart.data[0]), 3);
    }

    let factors = update_dashboard(DashboardKind::Factors, &datasets, &map);
    for chart in &factors.charts {
        assert_eq!(bar_total(&chart.data[0]), 4);
    }
}

#[test]
fn test_malformed_coordinates_excluded_from_map() {
    let dir = tempfile::tempdir().unwrap();
    let datasets = Datasets::load(&write_fixture(dir.path())).unwrap();

    let content = update_dashboard(
        DashboardKind::Occurrences,
        &datasets,
        &MapSettings::default(),
    );
    let plotted: usize = content.charts[0].data.iter().map(bar_total).sum();
    assert_eq!(plotted, 2);

    let names: Vec<&str> = content.charts[0]
        .data
        .iter()
        .filter_map(|trace| match trace {
            Trace::Scattermapbox(map) => Some(map.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["ACIDENTE", "INCIDENTE"]);
}

#[test]
fn test_dashboard_serializes_for_plotly() {
    let dir = tempfile::tempdir().unwrap();
    let datasets = Datasets::load(&write_fixture(dir.path())).unwrap();

    let content = update_dashboard(DashboardKind::Factors, &datasets, &MapSettings::default());
    let json = serde_json::to_value(&content).unwrap();

    assert_eq!(json["value"], "fatores");
    assert_eq!(json["charts"][0]["data"][0]["type"], "bar");
    assert_eq!(
        json["charts"][0]["data"][0]["x"][0],
        "JULGAMENTO DE PILOTAGEM"
    );
    assert_eq!(json["charts"][1]["data"][0]["type"], "pie");
}

#[test]
fn test_summary_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let datasets = Datasets::load(&write_fixture(dir.path())).unwrap();

    let mut output = Vec::new();
    generate_summary(&datasets, 5, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("Ocorrências Aeronáuticas (5 registros)"));
    assert!(text.contains("2 pontos, 3 sem coordenadas válidas"));
    assert!(text.contains("DECEA"));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path());
    fs::remove_file(dir.path().join("recomendacao_clean.csv")).unwrap();

    match Datasets::load(&config) {
        Err(DatasetError::Open { path, .. }) => {
            assert!(path.ends_with("recomendacao_clean.csv"))
        }
        other => panic!("expected open error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_custom_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("o.csv"),
        "ocorrencia_classificacao,ocorrencia_uf\nACIDENTE,SP\n",
    )
    .unwrap();
    fs::write(dir.path().join("r.csv"), "recomendacao_status\nCUMPRIDA\n").unwrap();
    fs::write(dir.path().join("f.csv"), "fator_nome\nATITUDE\n").unwrap();

    let config = DataConfig {
        dir: Some(dir.path().to_path_buf()),
        occurrences: "o.csv".into(),
        recommendations: "r.csv".into(),
        factors: "f.csv".into(),
        delimiter: ",".to_string(),
    };
    let datasets = Datasets::load(&config).unwrap();

    assert_eq!(datasets.occurrences[0].state.as_deref(), Some("SP"));
    assert_eq!(datasets.unmapped_occurrences(), 1);
}

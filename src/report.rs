//! Plain-text summary of the dashboards
//!
//! Prints the same category tables the charts are built from, for use
//! without a browser (`--summary`).

use std::io::{self, Write};

use crate::aggregate::{CategoryCounts, value_counts};
use crate::dashboard::{DashboardKind, PAGE_TITLE};
use crate::dataset::{Datasets, text};

/// Generate a summary of all three dashboards
///
/// `top` limits the number of categories listed per table; the remaining
/// categories are folded into a single "others" line.
pub fn generate_summary<W: Write>(
    datasets: &Datasets,
    top: usize,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(writer, "{}", PAGE_TITLE)?;
    writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(writer)?;

    for kind in DashboardKind::ALL {
        write_dashboard(datasets, kind, top, writer)?;
    }

    Ok(())
}

fn write_dashboard<W: Write>(
    datasets: &Datasets,
    kind: DashboardKind,
    top: usize,
    writer: &mut W,
) -> io::Result<()> {
    match kind {
        DashboardKind::Occurrences => {
            let rows = datasets.occurrences.len();
            let unmapped = datasets.unmapped_occurrences();
            writeln!(writer, "{} ({} registros)", kind.label(), rows)?;
            writeln!(
                writer,
                "  Mapa de Ocorrências: {} pontos, {} sem coordenadas válidas",
                rows - unmapped,
                unmapped
            )?;
            let by_class =
                value_counts(datasets.occurrences.iter().map(|o| text(&o.classification)));
            write_counts(writer, "Classificação", &by_class, top)?;
            let by_state = value_counts(datasets.occurrences.iter().map(|o| text(&o.state)));
            write_counts(writer, "Ocorrências por Estado", &by_state, top)?;
        }
        DashboardKind::Recommendations => {
            writeln!(
                writer,
                "{} ({} registros)",
                kind.label(),
                datasets.recommendations.len()
            )?;
            let by_status = value_counts(datasets.recommendations.iter().map(|r| text(&r.status)));
            write_counts(writer, "Status das Recomendações", &by_status, top)?;
            let by_recipient =
                value_counts(datasets.recommendations.iter().map(|r| text(&r.recipient)));
            write_counts(writer, "Recomendações por Destinatário", &by_recipient, top)?;
        }
        DashboardKind::Factors => {
            writeln!(
                writer,
                "{} ({} registros)",
                kind.label(),
                datasets.factors.len()
            )?;
            let by_name = value_counts(datasets.factors.iter().map(|f| text(&f.name)));
            write_counts(writer, "Fatores Contribuintes Mais Frequentes", &by_name, top)?;
            let by_area = value_counts(datasets.factors.iter().map(|f| text(&f.area)));
            write_counts(writer, "Distribuição por Área Afetada", &by_area, top)?;
        }
    }

    writeln!(writer)?;
    Ok(())
}

fn write_counts<W: Write>(
    writer: &mut W,
    heading: &str,
    counts: &CategoryCounts,
    top: usize,
) -> io::Result<()> {
    writeln!(writer, "  {}:", heading)?;

    if counts.is_empty() {
        writeln!(writer, "    (sem dados)")?;
        return Ok(());
    }

    let total = counts.total();
    let shown = counts.top(top);
    let width = shown
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(40);

    for entry in shown {
        writeln!(
            writer,
            "    {:<width$}  {:>6}  {:>5.1}%",
            truncate_label(&entry.label, 40),
            entry.count,
            percentage(entry.count, total),
            width = width
        )?;
    }

    let rest: usize = counts.entries()[shown.len()..]
        .iter()
        .map(|e| e.count)
        .sum();
    if rest > 0 {
        writeln!(
            writer,
            "    ... {} outras categorias: {} ({:.1}%)",
            counts.len() - shown.len(),
            rest,
            percentage(rest, total)
        )?;
    }

    Ok(())
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ContributingFactor, Occurrence};

    #[test]
    fn test_generate_summary_empty() {
        let datasets = Datasets::default();
        let mut output = Vec::new();

        let result = generate_summary(&datasets, 10, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains(PAGE_TITLE));
        for kind in DashboardKind::ALL {
            assert!(output_str.contains(kind.label()));
        }
        assert!(output_str.contains("(sem dados)"));
    }

    #[test]
    fn test_generate_summary_folds_rest() {
        let factors = ["A", "A", "A", "B", "B", "C", "D"]
            .iter()
            .map(|name| ContributingFactor {
                name: Some(name.to_string()),
                area: None,
            })
            .collect();
        let datasets = Datasets {
            factors,
            ..Datasets::default()
        };

        let mut output = Vec::new();
        generate_summary(&datasets, 2, &mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("Fatores Contribuintes (7 registros)"));
        assert!(output_str.contains("... 2 outras categorias: 2 (28.6%)"));
    }

    #[test]
    fn test_generate_summary_reports_unmapped() {
        let datasets = Datasets {
            occurrences: vec![
                Occurrence {
                    latitude: Some(-10.0),
                    longitude: Some(-50.0),
                    ..Occurrence::default()
                },
                Occurrence::default(),
            ],
            ..Datasets::default()
        };

        let mut output = Vec::new();
        generate_summary(&datasets, 10, &mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();

        assert!(output_str.contains("1 pontos, 1 sem coordenadas válidas"));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("curto", 10), "curto");
        assert_eq!(truncate_label("FATOR OPERACIONAL", 10), "FATOR O...");
    }
}

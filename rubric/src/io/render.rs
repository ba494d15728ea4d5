//! Markdown rendering of a rubric as a criterion/indicator/level table.

use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::document::RubricDocument;

const RUBRIC_TEMPLATE: &str = include_str!("templates/rubric.md");

/// One table row: criterion label (blank after the first indicator of a
/// criterion, mirroring a row-spanned cell), indicator label, one cell per
/// level in scale order.
#[derive(Debug, Clone, Serialize)]
struct Row {
    criterion: String,
    indicator: String,
    cells: Vec<String>,
}

/// Template engine wrapper around minijinja.
struct RenderEngine {
    env: Environment<'static>,
}

impl RenderEngine {
    fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("rubric", RUBRIC_TEMPLATE)
            .expect("rubric template should be valid");
        Self { env }
    }

    fn render(&self, document: &RubricDocument, rows: &[Row]) -> Result<String> {
        let template = self.env.get_template("rubric")?;
        let rendered = template.render(context! {
            code => document.code,
            description => document.description,
            levels => document.structure.levels,
            rows => rows,
        })?;
        Ok(rendered)
    }
}

/// Render `document` as a markdown table.
///
/// Missing descriptors render as empty cells; the table stays rectangular
/// even for partially filled documents.
pub fn render_markdown(document: &RubricDocument) -> Result<String> {
    let mut rows = Vec::new();
    for criterion in &document.structure.criteria {
        for (iidx, indicator) in criterion.indicators.iter().enumerate() {
            let cells = document
                .structure
                .levels
                .iter()
                .map(|level| sanitize_cell(indicator.descriptor(level).unwrap_or_default()))
                .collect();
            rows.push(Row {
                criterion: if iidx == 0 {
                    sanitize_cell(&criterion.name)
                } else {
                    String::new()
                },
                indicator: format!("{}. {}", indicator.order, sanitize_cell(&indicator.name)),
                cells,
            });
        }
    }
    RenderEngine::new().render(document, &rows)
}

/// Keep cell text on one table row: newlines collapse to spaces, pipes are
/// escaped.
fn sanitize_cell(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_document;

    #[test]
    fn renders_header_and_one_row_per_indicator() {
        let rendered = render_markdown(&sample_document()).expect("render");
        assert!(rendered.starts_with("# RA-1: Comunicación efectiva"));
        assert!(rendered.contains("| Criterio de desempeño | Indicador de desempeño | Low | High |"));
        assert!(rendered.contains("| Comunicación | 1. Claridad | Poco claro | Muy claro |"));
        // second indicator of the same criterion gets a blank criterion cell
        assert!(rendered.contains("|  | 2. Escucha | No escucha | Escucha activa |"));
    }

    #[test]
    fn missing_descriptors_render_as_empty_cells() {
        let mut document = sample_document();
        document.structure.criteria[0].indicators[0]
            .descriptors
            .remove("high");
        let rendered = render_markdown(&document).expect("render");
        assert!(rendered.contains("| Comunicación | 1. Claridad | Poco claro |  |"));
    }

    #[test]
    fn cell_text_is_kept_on_one_row() {
        let mut document = sample_document();
        document.structure.criteria[0].name = "Con|pipe\ny salto".to_string();
        let rendered = render_markdown(&document).expect("render");
        assert!(rendered.contains("Con\\|pipe y salto"));
    }
}

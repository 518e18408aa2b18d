use std::path::Path;

use tracing::debug;

use super::ReportError;

/// A parsed line of the final summary narrative
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeBlock {
    /// Section heading (bold markers stripped)
    Heading(String),
    /// Indented bullet item (marker stripped)
    Bullet(String),
    /// Body paragraph
    Paragraph(String),
}

/// Splits the final summary into renderable narrative blocks.
///
/// A line starting with a bold marker or containing a colon becomes a
/// heading; a line starting with a bullet marker becomes a bullet item; any
/// other non-blank line is a body paragraph. Blank lines are discarded.
pub fn parse_narrative(summary: &str) -> Vec<NarrativeBlock> {
    let mut blocks = Vec::new();

    for raw in summary.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("**") || line.contains(':') {
            blocks.push(NarrativeBlock::Heading(line.replace("**", "")));
        } else if let Some(item) = strip_bullet(line) {
            blocks.push(NarrativeBlock::Bullet(item.to_string()));
        } else {
            blocks.push(NarrativeBlock::Paragraph(line.to_string()));
        }
    }

    blocks
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .map(str::trim)
}

/// A chart ready to be embedded in the report document
#[derive(Debug, Clone)]
pub struct EmbeddedChart {
    /// Section title shown above the chart
    pub title: String,
    /// The SVG markup of the rendered chart
    pub svg: String,
}

/// Renders the report document: the narrative blocks followed by the charts,
/// in the order given, as one self-contained paginated HTML file.
pub fn render_report(
    summary_text: &str,
    charts: &[EmbeddedChart],
    out_path: &Path,
) -> Result<(), ReportError> {
    let blocks = parse_narrative(summary_text);

    let mut body = String::new();
    let mut in_list = false;
    for block in &blocks {
        if in_list && !matches!(block, NarrativeBlock::Bullet(_)) {
            body.push_str("    </ul>\n");
            in_list = false;
        }
        match block {
            NarrativeBlock::Bullet(item) => {
                if !in_list {
                    body.push_str("    <ul>\n");
                    in_list = true;
                }
                body.push_str(&format!("      <li>{}</li>\n", escape_html(item)));
            }
            NarrativeBlock::Heading(text) => {
                body.push_str(&format!("    <h2>{}</h2>\n", escape_html(text)));
            }
            NarrativeBlock::Paragraph(text) => {
                body.push_str(&format!("    <p>{}</p>\n", escape_html(text)));
            }
        }
    }
    if in_list {
        body.push_str("    </ul>\n");
    }

    for chart in charts {
        body.push_str(&format!(
            "    <section class=\"chart\">\n      <h2>{}</h2>\n      {}\n    </section>\n",
            escape_html(&chart.title),
            chart.svg
        ));
    }

    let document = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Comprehensive Contract Analysis Report</title>
    <style>
      body {{ font-family: Georgia, "Times New Roman", serif; max-width: 52rem; margin: 2rem auto; line-height: 1.5; }}
      h1 {{ font-size: 1.6rem; border-bottom: 2px solid #333; padding-bottom: 0.4rem; }}
      h2 {{ font-size: 1.15rem; margin-top: 1.4rem; }}
      ul {{ margin: 0.3rem 0 0.8rem 1.5rem; }}
      section.chart {{ page-break-inside: avoid; margin-top: 1.5rem; }}
      section.chart svg {{ max-width: 100%; height: auto; }}
      @media print {{ section.chart {{ break-inside: avoid; }} }}
    </style>
  </head>
  <body>
    <h1>Comprehensive Contract Analysis Report</h1>
{}  </body>
</html>
"#,
        body
    );

    std::fs::write(out_path, document)?;
    debug!(
        blocks = blocks.len(),
        charts = charts.len(),
        "Rendered report to {}",
        out_path.display()
    );
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

//! HTML report generation.
//!
//! Resolves the `{{PLACEHOLDER}}` markers of a template (the built-in default
//! or a custom file via `[report] template_path`) with a view selector, one
//! inline SVG chart per view, and summary tables, then writes a single
//! self-contained `.html` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::analysis::{Analysis, Panel};
use crate::domain::error::ClimtrendError;
use crate::domain::view::{available_views, View};
use crate::ports::report_port::ReportPort;

use tables::escape_html;

fn view_id(view: &View) -> String {
    format!("view-{}", chart_svg::view_slug(view.kind))
}

fn view_panels<'a>(analysis: &'a Analysis, view: &View) -> Vec<&'a Panel> {
    view.panels
        .iter()
        .filter_map(|&kind| analysis.panel(kind))
        .collect()
}

fn render_view_selector(views: &[View]) -> String {
    let mut output = String::from("<select id=\"view-select\">\n");
    for (i, view) in views.iter().enumerate() {
        output.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            view_id(view),
            if i == 0 { " selected" } else { "" },
            escape_html(view.kind.label())
        ));
    }
    output.push_str("</select>\n");
    output
}

fn render_views(analysis: &Analysis, views: &[View]) -> String {
    let mut output = String::new();
    for (i, view) in views.iter().enumerate() {
        let panels = view_panels(analysis, view);
        output.push_str(&format!(
            "<section class=\"view\" id=\"{}\"{}>\n<h2>{}</h2>\n{}\n{}</section>\n",
            view_id(view),
            if i == 0 { "" } else { " hidden" },
            escape_html(&view.title),
            chart_svg::generate_view_svg(view.kind, &panels),
            tables::render_legend(&panels)
        ));
    }
    output
}

/// Resolve all `{{PLACEHOLDER}}`s in `template` for the given analysis.
pub fn resolve(template: &str, analysis: &Analysis) -> String {
    let views = available_views(analysis);
    let title = format!("Climate Regression Report: {}", analysis.city);

    template
        .replace("{{TITLE}}", &escape_html(&title))
        .replace("{{VIEW_SELECTOR}}", &render_view_selector(&views))
        .replace("{{VIEWS}}", &render_views(analysis, &views))
        .replace("{{MODEL_TABLE}}", &tables::render_model_table(analysis))
        .replace("{{SKIPPED_PANELS}}", &tables::render_skipped(&analysis.skipped))
        .replace("{{YEARLY_TABLE}}", &tables::render_yearly_table(&analysis.yearly))
}

pub struct HtmlReportAdapter {
    template: Option<String>,
}

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self { template: None }
    }

    pub fn with_template(template: String) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn from_template_file(path: &Path) -> Result<Self, ClimtrendError> {
        Ok(Self::with_template(fs::read_to_string(path)?))
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for HtmlReportAdapter {
    fn write(&self, analysis: &Analysis, output_path: &Path) -> Result<(), ClimtrendError> {
        let template = self
            .template
            .as_deref()
            .unwrap_or(default_template::template());
        let html = resolve(template, analysis);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, html)?;

        info!(path = %output_path.display(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{run_analysis, AnalysisSettings, PanelKind, SkippedPanel};
    use crate::domain::sample::{AtmosphereRecord, Sample};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_analysis() -> Analysis {
        let daily: Vec<Sample> = [(2000, 7.0), (2001, 7.6), (2002, 7.3), (2003, 8.2)]
            .iter()
            .map(|&(y, v)| Sample::new(NaiveDate::from_ymd_opt(y, 3, 1).unwrap(), v))
            .collect();
        let atmosphere = vec![
            AtmosphereRecord {
                temperature: -4.0,
                nitrogen_dioxide: 27.0,
                ozone: 20.0,
            },
            AtmosphereRecord {
                temperature: 8.0,
                nitrogen_dioxide: 19.0,
                ozone: 28.0,
            },
            AtmosphereRecord {
                temperature: 21.0,
                nitrogen_dioxide: 13.0,
                ozone: 39.0,
            },
        ];
        run_analysis(&daily, &atmosphere, &AnalysisSettings::default()).unwrap()
    }

    #[test]
    fn resolve_fills_every_placeholder() {
        let html = resolve(default_template::template(), &sample_analysis());
        assert!(!html.contains("{{"));
        assert!(html.contains("Climate Regression Report: Toronto"));
    }

    #[test]
    fn one_option_and_section_per_view() {
        let html = resolve(default_template::template(), &sample_analysis());
        assert_eq!(html.matches("<option").count(), 7);
        assert_eq!(html.matches("<section class=\"view\"").count(), 7);
        assert_eq!(html.matches("<svg").count(), 7);
        assert_eq!(html.matches(" hidden>").count(), 6);
        assert!(html.contains("<option value=\"view-year-vs-temperature\" selected>"));
    }

    #[test]
    fn skipped_panels_shrink_the_menu() {
        let mut analysis = sample_analysis();
        analysis
            .panels
            .retain(|p| p.kind == PanelKind::TemperatureNitrogenDioxide);
        analysis.skipped.push(SkippedPanel {
            kind: PanelKind::TemperatureOzone,
            reason: "y-coordinates have no variance".into(),
        });

        let html = resolve(default_template::template(), &analysis);
        assert_eq!(html.matches("<option").count(), 2);
        assert!(html.contains("Skipped Panels"));
    }

    #[test]
    fn custom_template_is_used() {
        let adapter = HtmlReportAdapter::with_template("<p>{{TITLE}}</p>{{MODEL_TABLE}}".into());
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.html");

        adapter.write(&sample_analysis(), &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<p>Climate Regression Report: Toronto</p>"));
        assert!(contents.contains("<table class=\"models\">"));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deep/report.html");

        HtmlReportAdapter::new()
            .write(&sample_analysis(), &path)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<!DOCTYPE html>"));
        assert!(contents.contains("Year vs Predicted Ozone Concentration in Toronto"));
    }

    #[test]
    fn missing_template_file_is_io_error() {
        let err = HtmlReportAdapter::from_template_file(Path::new("/nonexistent/t.html"))
            .err()
            .unwrap();
        assert!(matches!(err, ClimtrendError::Io(_)));
    }
}

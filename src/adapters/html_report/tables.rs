//! HTML fragments for the report:
//! - model summary table (one row per fitted panel)
//! - per-view legend with rounded model parameters
//! - skipped panel list
//! - yearly temperature table

use crate::adapters::html_report::chart_svg::legend_colors;
use crate::domain::aggregate::YearlyAggregate;
use crate::domain::analysis::{Analysis, Panel, SkippedPanel};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_model_table(analysis: &Analysis) -> String {
    let mut output = String::from(
        "<table class=\"models\">\n<thead><tr><th>Panel</th><th>n</th><th>Slope</th>\
         <th>Y-intercept</th><th>Correlation</th><th>R^2</th></tr></thead>\n<tbody>\n",
    );
    for panel in &analysis.panels {
        let m = &panel.model;
        output.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td></tr>\n",
            escape_html(panel.kind.label()),
            panel.series.len(),
            m.slope,
            m.intercept,
            m.correlation,
            m.r_squared
        ));
    }
    output.push_str("</tbody>\n</table>\n");
    output
}

/// Legend for one view; entry `i` uses the colours of the `i`th overlaid panel.
pub fn render_legend(panels: &[&Panel]) -> String {
    let mut output = String::from("<ul class=\"legend\">\n");
    for (i, panel) in panels.iter().enumerate() {
        let (fill, stroke) = legend_colors(i);
        let m = &panel.model;
        output.push_str(&format!(
            "<li><span class=\"swatch\" style=\"background:{fill}\"></span>{}\
             <span class=\"swatch line\" style=\"background:{stroke}\"></span>{}: \
             Slope: {:.3}, Y-intercept: {:.3}, Correlation: {:.3}, R^2: {:.3}</li>\n",
            escape_html(panel.kind.label()),
            escape_html(panel.kind.line_label()),
            m.slope,
            m.intercept,
            m.correlation,
            m.r_squared
        ));
    }
    output.push_str("</ul>\n");
    output
}

pub fn render_skipped(skipped: &[SkippedPanel]) -> String {
    if skipped.is_empty() {
        return String::new();
    }
    let mut output = String::from("<h2>Skipped Panels</h2>\n<ul class=\"skipped\">\n");
    for s in skipped {
        output.push_str(&format!(
            "<li><strong>{}</strong>: {}</li>\n",
            escape_html(s.kind.label()),
            escape_html(&s.reason)
        ));
    }
    output.push_str("</ul>\n");
    output
}

pub fn render_yearly_table(yearly: &[YearlyAggregate]) -> String {
    if yearly.is_empty() {
        return "<p>No yearly data.</p>\n".to_string();
    }
    let mut output = String::from(
        "<table class=\"yearly\">\n<thead><tr><th>Year</th><th>Mean Temperature (Celsius)</th>\
         <th>Days</th></tr></thead>\n<tbody>\n",
    );
    for y in yearly {
        output.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td><td>{}</td></tr>\n",
            y.year, y.mean_value, y.sample_count
        ));
    }
    output.push_str("</tbody>\n</table>\n");
    output
}

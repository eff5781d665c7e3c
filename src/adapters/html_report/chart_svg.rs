//! Inline SVG scatter charts with regression lines.

use crate::adapters::html_report::tables::escape_html;
use crate::domain::analysis::Panel;
use crate::domain::view::ViewKind;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 400.0;
const PADDING_LEFT: f64 = 70.0;
const PADDING_RIGHT: f64 = 20.0;
const PADDING_TOP: f64 = 20.0;
const PADDING_BOTTOM: f64 = 55.0;
const TICKS: usize = 5;

/// (point fill, line stroke) per overlaid panel.
const PALETTE: [(&str, &str); 2] = [("#2563eb", "#1e3a8a"), ("#f97316", "#9a3412")];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, v: f64) {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// Widens degenerate or empty extents so scaling never divides by zero.
    fn padded(self) -> Self {
        if self.min > self.max {
            return Self { min: 0.0, max: 1.0 };
        }
        if self.min == self.max {
            return Self {
                min: self.min - 1.0,
                max: self.max + 1.0,
            };
        }
        let margin = (self.max - self.min) * 0.05;
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }
}

struct Frame {
    x: Extent,
    y: Extent,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - PADDING_LEFT - PADDING_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - PADDING_TOP - PADDING_BOTTOM
    }

    fn px(&self, x: f64) -> f64 {
        PADDING_LEFT + (x - self.x.min) / self.x.span() * Self::plot_width()
    }

    fn py(&self, y: f64) -> f64 {
        HEIGHT - PADDING_BOTTOM - (y - self.y.min) / self.y.span() * Self::plot_height()
    }
}

fn frame_for(panels: &[&Panel]) -> Frame {
    let mut x = Extent::empty();
    let mut y = Extent::empty();
    for panel in panels {
        for (px, py) in panel.series.points() {
            x.include(px);
            y.include(py);
        }
        for (lx, ly) in panel.line_endpoints() {
            x.include(lx);
            y.include(ly);
        }
    }
    Frame {
        x: x.padded(),
        y: y.padded(),
    }
}

fn format_tick(value: f64, span: f64) -> String {
    if span >= 50.0 {
        format!("{:.0}", value)
    } else if span >= 5.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn render_axes(out: &mut String, frame: &Frame, x_title: &str, y_title: &str) {
    let left = PADDING_LEFT;
    let right = WIDTH - PADDING_RIGHT;
    let top = PADDING_TOP;
    let bottom = HEIGHT - PADDING_BOTTOM;

    out.push_str(&format!(
        r##"<line x1="{left:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="#374151" stroke-width="1"/>"##
    ));
    out.push_str(&format!(
        r##"<line x1="{left:.1}" y1="{top:.1}" x2="{left:.1}" y2="{bottom:.1}" stroke="#374151" stroke-width="1"/>"##
    ));

    for i in 0..=TICKS {
        let t = i as f64 / TICKS as f64;

        let xv = frame.x.min + t * frame.x.span();
        let xp = frame.px(xv);
        out.push_str(&format!(
            r##"<line x1="{xp:.1}" y1="{bottom:.1}" x2="{xp:.1}" y2="{:.1}" stroke="#374151"/><text x="{xp:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"##,
            bottom + 5.0,
            bottom + 18.0,
            format_tick(xv, frame.x.span())
        ));

        let yv = frame.y.min + t * frame.y.span();
        let yp = frame.py(yv);
        out.push_str(&format!(
            r##"<line x1="{:.1}" y1="{yp:.1}" x2="{left:.1}" y2="{yp:.1}" stroke="#374151"/><text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"##,
            left - 5.0,
            left - 8.0,
            yp + 4.0,
            format_tick(yv, frame.y.span())
        ));
    }

    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
        left + Frame::plot_width() / 2.0,
        HEIGHT - 12.0,
        escape_html(x_title)
    ));
    out.push_str(&format!(
        r#"<text x="16" y="{:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 16 {:.1})">{}</text>"#,
        top + Frame::plot_height() / 2.0,
        top + Frame::plot_height() / 2.0,
        escape_html(y_title)
    ));
}

fn render_panel(out: &mut String, frame: &Frame, panel: &Panel, colors: (&str, &str)) {
    let (fill, stroke) = colors;
    out.push_str(&format!(
        r#"<g class="scatter" data-panel="{}">"#,
        panel.kind.slug()
    ));
    for (x, y) in panel.series.points() {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        out.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{fill}" fill-opacity="0.7"/>"#,
            frame.px(x),
            frame.py(y)
        ));
    }
    out.push_str("</g>");

    let [(x0, y0), (x1, y1)] = panel.line_endpoints();
    if [x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        out.push_str(&format!(
            r#"<line class="regression" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{stroke}" stroke-width="2"/>"#,
            frame.px(x0),
            frame.py(y0),
            frame.px(x1),
            frame.py(y1)
        ));
    }
}

/// Renders every panel of a view overlaid on shared axes.
///
/// Returns an empty string when `panels` is empty.
pub fn generate_view_svg(view: ViewKind, panels: &[&Panel]) -> String {
    if panels.is_empty() {
        return String::new();
    }

    let frame = frame_for(panels);
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}">"#
    );
    out.push_str(&format!(
        r#"<clipPath id="plot-{slug}"><rect x="{PADDING_LEFT:.1}" y="{PADDING_TOP:.1}" width="{:.1}" height="{:.1}"/></clipPath>"#,
        Frame::plot_width(),
        Frame::plot_height(),
        slug = view_slug(view)
    ));
    render_axes(&mut out, &frame, view.x_axis_title(), view.y_axis_title());

    out.push_str(&format!(r#"<g clip-path="url(#plot-{})">"#, view_slug(view)));
    for (i, panel) in panels.iter().enumerate() {
        render_panel(&mut out, &frame, panel, PALETTE[i % PALETTE.len()]);
    }
    out.push_str("</g></svg>");
    out
}

/// Legend entries matching the colours used by [`generate_view_svg`].
pub fn legend_colors(index: usize) -> (&'static str, &'static str) {
    PALETTE[index % PALETTE.len()]
}

pub fn view_slug(view: ViewKind) -> String {
    view.label().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{AxisRange, PanelKind};
    use crate::domain::regression::RegressionModel;
    use crate::domain::series::CoordinateSeries;

    fn panel(kind: PanelKind, xs: Vec<f64>, ys: Vec<f64>) -> Panel {
        Panel {
            kind,
            series: CoordinateSeries::new(xs, ys).unwrap(),
            model: RegressionModel {
                slope: 0.02,
                intercept: -32.0,
                correlation: 0.8,
                r_squared: 0.64,
            },
            line_range: AxisRange::new(1920.0, 2150.0),
        }
    }

    #[test]
    fn empty_view_renders_nothing() {
        assert_eq!(generate_view_svg(ViewKind::YearTemperature, &[]), "");
    }

    #[test]
    fn one_circle_per_point_and_one_line() {
        let p = panel(
            PanelKind::YearTemperature,
            vec![1990.0, 2000.0, 2010.0],
            vec![7.5, 8.0, 8.3],
        );
        let svg = generate_view_svg(ViewKind::YearTemperature, &[&p]);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches(r#"class="regression""#).count(), 1);
        assert!(svg.contains("Average Temperature (Celsius)"));
    }

    #[test]
    fn overlaid_panels_use_distinct_colors() {
        let a = panel(PanelKind::YearNitrogenDioxide, vec![2000.0, 2001.0], vec![20.0, 19.0]);
        let b = panel(PanelKind::YearOzone, vec![2000.0, 2001.0], vec![30.0, 31.0]);
        let svg = generate_view_svg(ViewKind::YearConcentrations, &[&a, &b]);

        assert!(svg.contains(PALETTE[0].0));
        assert!(svg.contains(PALETTE[1].0));
        assert!(svg.contains(r#"data-panel="year-no2""#));
        assert!(svg.contains(r#"data-panel="year-o3""#));
        assert!(svg.contains("Predicted Concentration (ppb)"));
    }

    #[test]
    fn non_finite_points_are_not_drawn() {
        let p = panel(
            PanelKind::YearTemperature,
            vec![1990.0, f64::NAN, 2010.0],
            vec![7.5, 8.0, 8.3],
        );
        let svg = generate_view_svg(ViewKind::YearTemperature, &[&p]);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn degenerate_extent_is_widened() {
        let e = Extent { min: 3.0, max: 3.0 }.padded();
        assert_eq!(e, Extent { min: 2.0, max: 4.0 });
        let e = Extent::empty().padded();
        assert_eq!(e, Extent { min: 0.0, max: 1.0 });
    }

    #[test]
    fn slug_is_lowercase_dashed() {
        assert_eq!(view_slug(ViewKind::YearConcentrations), "year-vs-concentrations");
    }
}

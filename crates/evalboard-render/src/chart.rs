//! Win-probability chart to SVG
//!
//! Plots both probability traces over the turn-pair index on a single
//! 0..1 axis. The traces carry direct end labels so the reader never
//! depends on color alone to tell the sides apart.

use std::fmt::Write;

use crate::theme;

const WIDTH: f64 = 420.0;
const HEIGHT: f64 = 220.0;
const MARGIN_LEFT: f64 = 34.0;
const MARGIN_RIGHT: f64 = 58.0;
const MARGIN_TOP: f64 = 14.0;
const MARGIN_BOTTOM: f64 = 26.0;

const PLOT_WIDTH: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

/// Render both probability traces as a standalone SVG document
///
/// Returns `None` while no turn pair has completed; callers surface
/// that as "no chart yet" rather than an empty frame.
pub fn render_chart(white: &[f64], black: &[f64]) -> Option<String> {
    let points = white.len().min(black.len());
    if points == 0 {
        return None;
    }

    let mut svg = String::with_capacity(4 * 1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}">"#
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="{}"/>"#,
        theme::CHART_SURFACE
    );

    // Axis frame and the three reference lines.
    for (value, label) in [(0.0, "0"), (0.5, "0.5"), (1.0, "1")] {
        let y = y_at(value);
        let dash = if value == 0.5 { r#" stroke-dasharray="4 4""# } else { "" };
        let _ = write!(
            svg,
            r#"<line x1="{MARGIN_LEFT}" y1="{y}" x2="{:.1}" y2="{y}" stroke="{}" stroke-width="1"{dash}/>"#,
            MARGIN_LEFT + PLOT_WIDTH,
            theme::CHART_GRID
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" fill="{}">{label}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            theme::CHART_TEXT
        );
    }

    trace(&mut svg, white, points, theme::WHITE_TRACE, "White");
    trace(&mut svg, black, points, theme::BLACK_TRACE, "Black");

    // X axis caption.
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="{}">turn</text>"#,
        MARGIN_LEFT + PLOT_WIDTH / 2.0,
        HEIGHT - 8.0,
        theme::CHART_TEXT
    );

    svg.push_str("</svg>");
    Some(svg)
}

/// One polyline trace with per-point markers and an end label
fn trace(svg: &mut String, values: &[f64], points: usize, color: &str, label: &str) {
    let coords: Vec<(f64, f64)> = values
        .iter()
        .take(points)
        .enumerate()
        .map(|(i, &p)| (x_at(i, points), y_at(p.clamp(0.0, 1.0))))
        .collect();

    if coords.len() > 1 {
        let path: String = coords
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            r#"<polyline points="{path}" fill="none" stroke="{color}" stroke-width="2"/>"#
        );
    }

    for (x, y) in &coords {
        let _ = write!(
            svg,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#
        );
    }

    if let Some((x, y)) = coords.last() {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="11" fill="{}">{label}</text>"#,
            x + 8.0,
            y + 4.0,
            theme::CHART_TEXT
        );
    }
}

fn x_at(index: usize, points: usize) -> f64 {
    if points <= 1 {
        return MARGIN_LEFT + PLOT_WIDTH / 2.0;
    }
    MARGIN_LEFT + PLOT_WIDTH * index as f64 / (points - 1) as f64
}

fn y_at(probability: f64) -> f64 {
    MARGIN_TOP + PLOT_HEIGHT * (1.0 - probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_has_no_chart() {
        assert!(render_chart(&[], &[]).is_none());
    }

    #[test]
    fn test_single_pair_renders_markers_without_lines() {
        let svg = render_chart(&[0.6], &[0.4]).expect("one pair is plottable");
        assert!(!svg.contains("<polyline"), "one point draws no line");
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(">White<"));
        assert!(svg.contains(">Black<"));
    }

    #[test]
    fn test_two_traces_with_markers_per_entry() {
        let white = [0.5, 0.62, 0.58, 0.91];
        let black = [0.5, 0.38, 0.42, 0.09];
        let svg = render_chart(&white, &black).unwrap();

        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 8);
        assert!(svg.contains("stroke-dasharray"), "midline is dashed");
    }

    #[test]
    fn test_probability_maps_to_vertical_position() {
        // Higher probability sits higher on the chart (smaller y).
        assert!(y_at(1.0) < y_at(0.5));
        assert!(y_at(0.5) < y_at(0.0));
        assert_eq!(y_at(1.0), MARGIN_TOP);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let svg = render_chart(&[1.5], &[-0.5]).unwrap();
        // Clamped to the plot edges rather than escaping the frame.
        assert!(svg.contains(&format!(r#"cy="{:.1}""#, MARGIN_TOP)));
        assert!(svg.contains(&format!(r#"cy="{:.1}""#, MARGIN_TOP + PLOT_HEIGHT)));
    }
}

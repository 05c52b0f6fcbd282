use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{Rect, pos2, vec2};
use log::info;

use crate::geometry::{
    PROGRESS_RADIUS_FACTOR, ProgressArc, WEDGE_RADIUS_FACTOR, iteration_connectors, layout_nodes,
    phase_wedges, progress_fraction, ring_radius,
};
use crate::style::{self, hex};
use crate::timeline::Timeline;
use crate::util::{format_percent, format_weeks, iteration_label};

const NODE_RADIUS: f32 = 22.0;

/// Renders the wheel as a standalone SVG document.
pub fn render_svg(timeline: &Timeline, width: f32, height: f32) -> Result<String, fmt::Error> {
    let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(width, height));
    let center = rect.center();
    let radius = ring_radius(rect);
    let nodes = layout_nodes(
        &timeline.phases,
        &timeline.allocations(),
        timeline.current_phase,
        &timeline.iterations,
        rect,
    );

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        hex(style::BACKGROUND)
    )?;

    for wedge in phase_wedges(&nodes, center, radius * WEDGE_RADIUS_FACTOR) {
        let Some(node) = nodes.get(wedge.index) else {
            continue;
        };
        let color = hex(node.phase_type.style().color);
        let stroke_width = if node.is_active { 3.0 } else { 1.0 };
        writeln!(
            svg,
            r#"  <path d="{}" fill="{color}" fill-opacity="0.35" stroke="{color}" stroke-width="{stroke_width}"/>"#,
            wedge.to_svg_path()
        )?;
    }

    writeln!(
        svg,
        r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="2"/>"#,
        center.x,
        center.y,
        radius,
        hex(style::RING)
    )?;

    let fraction = progress_fraction(&timeline.phases, timeline.current_phase);
    if let Some(arc) = ProgressArc::new(fraction, center, radius * PROGRESS_RADIUS_FACTOR) {
        writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="6" stroke-linecap="round"/>"#,
            arc.to_svg_path(),
            hex(style::PROGRESS)
        )?;
    }

    for connector in iteration_connectors(&nodes, &timeline.iterations, center) {
        writeln!(
            svg,
            r#"  <path d="{}" data-order="{}" fill="none" stroke="{}" stroke-width="2" stroke-dasharray="6 4"/>"#,
            connector.to_svg_path(),
            connector.order,
            hex(style::CONNECTOR)
        )?;
    }

    for node in &nodes {
        let Some(phase) = timeline.phases.get(node.index) else {
            continue;
        };
        let phase_style = node.phase_type.style();
        let ring = if node.is_complete {
            hex(style::COMPLETE)
        } else {
            hex(style::BACKGROUND)
        };
        writeln!(
            svg,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{NODE_RADIUS}" fill="{}" stroke="{ring}" stroke-width="3"/>"#,
            node.position.x,
            node.position.y,
            hex(phase_style.color)
        )?;
        writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" font-size="16">{}</text>"#,
            node.position.x,
            node.position.y,
            phase_style.glyph
        )?;
        writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{}" font-size="12">{} · {}</text>"#,
            node.position.x,
            node.position.y + NODE_RADIUS + 14.0,
            hex(style::TEXT),
            html_escape::encode_text(&phase.name),
            format_percent(node.allocation)
        )?;
    }

    writeln!(
        svg,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{}" font-size="18">{}</text>"#,
        center.x,
        center.y,
        hex(style::TEXT),
        format_weeks(timeline.total_duration)
    )?;
    if let Some(label) = iteration_label(timeline.iterations.len()) {
        writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{}" font-size="12">{label}</text>"#,
            center.x,
            center.y + 20.0,
            hex(style::MUTED_TEXT)
        )?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

pub fn export_svg(timeline: &Timeline, path: &Path, width: f32, height: f32) -> Result<()> {
    let document = render_svg(timeline, width, height).context("failed to render SVG")?;
    fs::write(path, document)
        .with_context(|| format!("failed to write SVG to {}", path.display()))?;
    info!("exported timeline wheel to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::sample_timeline;

    #[test]
    fn one_wedge_per_phase_and_one_connector_per_pair() {
        let timeline = sample_timeline();
        let svg = render_svg(&timeline, 600.0, 600.0).expect("svg renders");
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("fill-opacity=\"0.35\"").count(), timeline.phases.len());
        assert_eq!(svg.matches("stroke-dasharray").count(), 2);
        assert!(svg.contains("2 iterations"));
    }

    #[test]
    fn no_iteration_text_without_history() {
        let mut timeline = sample_timeline();
        timeline.iterations.clear();
        let svg = render_svg(&timeline, 600.0, 600.0).expect("svg renders");
        assert!(!svg.contains("stroke-dasharray"));
        assert!(!svg.contains("iteration"));
    }

    #[test]
    fn names_are_escaped() {
        let mut timeline = sample_timeline();
        timeline.phases[0].name = "R&D <fast>".to_owned();
        let svg = render_svg(&timeline, 600.0, 600.0).expect("svg renders");
        assert!(svg.contains("R&amp;D &lt;fast&gt;"));
    }

    #[test]
    fn centre_label_matches_viewer_week_format() {
        let mut timeline = sample_timeline();
        timeline.total_duration = 1.0;
        let svg = render_svg(&timeline, 600.0, 600.0).expect("svg renders");
        assert!(svg.contains(">1 week</text>"));

        timeline.total_duration = 22.0 / 3.0;
        let svg = render_svg(&timeline, 600.0, 600.0).expect("svg renders");
        assert!(svg.contains(">7.3 weeks</text>"));
        assert!(!svg.contains("7.333"));
    }

    #[test]
    fn empty_timeline_still_renders_a_document() {
        let timeline = Timeline {
            phases: Vec::new(),
            iterations: Vec::new(),
            current_phase: 0,
            total_duration: 0.0,
        };
        let svg = render_svg(&timeline, 300.0, 200.0).expect("svg renders");
        assert!(!svg.contains("<path"));
        assert!(svg.contains("0 weeks"));
    }
}

use std::collections::HashSet;

use eframe::egui::Pos2;

use crate::timeline::{IterationEvent, Phase};

use super::layout::{PhaseNode, START_ANGLE_DEG, point_on_circle};

pub const WEDGE_RADIUS_FACTOR: f32 = 1.25;
pub const PROGRESS_RADIUS_FACTOR: f32 = 1.36;
/// How far a connector's control point is pulled from the chord midpoint
/// toward the centre.
pub const CONNECTOR_PULL: f32 = 0.3;
const ARC_STEP_DEG: f32 = 4.0;
const FULL_TURN_EPSILON: f32 = 1e-3;

fn svg_point(point: Pos2) -> String {
    format!("{:.2} {:.2}", point.x, point.y)
}

/// Points along a clockwise arc, one every few degrees, endpoints included.
pub fn arc_points(center: Pos2, radius: f32, start_deg: f32, sweep_deg: f32) -> Vec<Pos2> {
    let segments = ((sweep_deg.abs() / ARC_STEP_DEG).ceil() as usize).max(1);
    (0..=segments)
        .map(|step| {
            let t = step as f32 / segments as f32;
            point_on_circle(center, radius, start_deg + sweep_deg * t)
        })
        .collect()
}

fn full_circle_path(center: Pos2, radius: f32, start_deg: f32) -> String {
    let start = point_on_circle(center, radius, start_deg);
    let opposite = point_on_circle(center, radius, start_deg + 180.0);
    format!(
        "M {} A {radius:.2} {radius:.2} 0 1 1 {} A {radius:.2} {radius:.2} 0 1 1 {}",
        svg_point(start),
        svg_point(opposite),
        svg_point(start)
    )
}

/// Share of phases up to and including the current one that are complete,
/// measured against the whole timeline.
pub fn progress_fraction(phases: &[Phase], current_phase: usize) -> f32 {
    if phases.is_empty() {
        return 0.0;
    }

    let completed = phases
        .iter()
        .take(current_phase.saturating_add(1))
        .filter(|phase| phase.is_complete())
        .count();
    completed as f32 / phases.len() as f32
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressArc {
    pub fraction: f32,
    pub center: Pos2,
    pub radius: f32,
    pub start: Pos2,
    pub end: Pos2,
}

impl ProgressArc {
    pub fn new(fraction: f32, center: Pos2, radius: f32) -> Option<Self> {
        if fraction.is_nan() || fraction <= 0.0 {
            return None;
        }

        let fraction = fraction.min(1.0);
        Some(Self {
            fraction,
            center,
            radius,
            start: point_on_circle(center, radius, START_ANGLE_DEG),
            end: point_on_circle(center, radius, START_ANGLE_DEG + fraction * 360.0),
        })
    }

    pub fn sweep(&self) -> f32 {
        self.fraction * 360.0
    }

    pub fn large_arc(&self) -> bool {
        self.fraction > 0.5
    }

    pub fn to_svg_path(&self) -> String {
        if self.sweep() >= 360.0 - FULL_TURN_EPSILON {
            return full_circle_path(self.center, self.radius, START_ANGLE_DEG);
        }

        format!(
            "M {} A {r:.2} {r:.2} 0 {} 1 {}",
            svg_point(self.start),
            u8::from(self.large_arc()),
            svg_point(self.end),
            r = self.radius
        )
    }

    pub fn points(&self) -> Vec<Pos2> {
        arc_points(self.center, self.radius, START_ANGLE_DEG, self.sweep())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    /// Position of the first history event for this pair.
    pub order: usize,
    pub start: Pos2,
    pub control: Pos2,
    pub end: Pos2,
}

impl Connector {
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} Q {} {}",
            svg_point(self.start),
            svg_point(self.control),
            svg_point(self.end)
        )
    }

    /// Samples the quadratic curve at `segments + 1` evenly spaced parameters.
    pub fn curve_points(&self, segments: usize) -> Vec<Pos2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|step| {
                let t = step as f32 / segments as f32;
                let u = 1.0 - t;
                let x = u * u * self.start.x + 2.0 * u * t * self.control.x + t * t * self.end.x;
                let y = u * u * self.start.y + 2.0 * u * t * self.control.y + t * t * self.end.y;
                Pos2::new(x, y)
            })
            .collect()
    }
}

pub fn control_point(start: Pos2, end: Pos2, center: Pos2) -> Pos2 {
    let mid = start + (end - start) * 0.5;
    mid + (center - mid) * CONNECTOR_PULL
}

/// One connector per unordered pair of phases named in the history; later
/// events for an already connected pair are dropped.
pub fn iteration_connectors(
    nodes: &[PhaseNode],
    history: &[IterationEvent],
    center: Pos2,
) -> Vec<Connector> {
    let mut seen = HashSet::new();
    let mut connectors = Vec::new();

    for (order, event) in history.iter().enumerate() {
        let from = nodes.iter().find(|node| node.phase_type == event.from);
        let to = nodes.iter().find(|node| node.phase_type == event.to);
        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };
        if from.index == to.index {
            continue;
        }

        let key = (from.index.min(to.index), from.index.max(to.index));
        if !seen.insert(key) {
            continue;
        }

        connectors.push(Connector {
            from: from.index,
            to: to.index,
            order,
            start: from.position,
            control: control_point(from.position, to.position, center),
            end: to.position,
        });
    }

    connectors
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wedge {
    pub index: usize,
    pub center: Pos2,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl Wedge {
    pub fn for_node(node: &PhaseNode, center: Pos2, radius: f32) -> Self {
        let half_span = node.allocation * 180.0;
        Self {
            index: node.index,
            center,
            radius,
            start_angle: node.angle - half_span,
            end_angle: node.angle + half_span,
        }
    }

    pub fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn to_svg_path(&self) -> String {
        if self.sweep() >= 360.0 - FULL_TURN_EPSILON {
            return format!("{} Z", full_circle_path(self.center, self.radius, self.start_angle));
        }

        let start = point_on_circle(self.center, self.radius, self.start_angle);
        let end = point_on_circle(self.center, self.radius, self.end_angle);
        format!(
            "M {} L {} A {r:.2} {r:.2} 0 {} 1 {} Z",
            svg_point(self.center),
            svg_point(start),
            u8::from(self.sweep() > 180.0),
            svg_point(end),
            r = self.radius
        )
    }

    /// Rim of the slice, from the start edge to the end edge.
    pub fn rim(&self) -> Vec<Pos2> {
        arc_points(self.center, self.radius, self.start_angle, self.sweep())
    }
}

pub fn phase_wedges(nodes: &[PhaseNode], center: Pos2, radius: f32) -> Vec<Wedge> {
    nodes
        .iter()
        .map(|node| Wedge::for_node(node, center, radius))
        .collect()
}

use eframe::egui::{Pos2, Rect, vec2};

use crate::timeline::{IterationEvent, Phase, PhaseType};

pub const START_ANGLE_DEG: f32 = -90.0;
pub const RING_RADIUS_FACTOR: f32 = 0.35;

pub fn ring_radius(rect: Rect) -> f32 {
    rect.size().min_elem().max(0.0) * RING_RADIUS_FACTOR
}

pub fn point_on_circle(center: Pos2, radius: f32, angle_deg: f32) -> Pos2 {
    let radians = angle_deg.to_radians();
    center + vec2(radians.cos(), radians.sin()) * radius
}

/// Maps any angle into the `[-90, 270)` window the layout walks through.
pub fn normalize_angle(angle_deg: f32) -> f32 {
    (angle_deg - START_ANGLE_DEG).rem_euclid(360.0) + START_ANGLE_DEG
}

/// Per-frame placement of one phase on the wheel.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseNode {
    pub index: usize,
    pub phase_type: PhaseType,
    pub allocation: f32,
    pub start_angle: f32,
    pub span: f32,
    pub angle: f32,
    pub position: Pos2,
    pub is_active: bool,
    pub is_complete: bool,
    pub has_iterations: bool,
}

impl PhaseNode {
    pub fn end_angle(&self) -> f32 {
        self.start_angle + self.span
    }

    pub fn contains_angle(&self, angle_deg: f32) -> bool {
        let angle = normalize_angle(angle_deg);
        angle >= self.start_angle && angle < self.end_angle()
    }
}

/// Lays phases out clockwise from the top of the circle. `allocations`
/// overrides the stored phase allocations where present, so a drag in
/// progress can be previewed without touching the timeline.
pub fn layout_nodes(
    phases: &[Phase],
    allocations: &[f32],
    current_phase: usize,
    history: &[IterationEvent],
    rect: Rect,
) -> Vec<PhaseNode> {
    let center = rect.center();
    let radius = ring_radius(rect);
    let mut cursor = START_ANGLE_DEG;

    phases
        .iter()
        .enumerate()
        .map(|(index, phase)| {
            let allocation = allocations.get(index).copied().unwrap_or(phase.allocation);
            let span = allocation * 360.0;
            let start_angle = cursor;
            let angle = start_angle + span / 2.0;
            cursor += span;

            PhaseNode {
                index,
                phase_type: phase.phase_type,
                allocation,
                start_angle,
                span,
                angle,
                position: point_on_circle(center, radius, angle),
                is_active: index == current_phase,
                is_complete: phase.is_complete(),
                has_iterations: history.iter().any(|event| event.touches(phase.phase_type)),
            }
        })
        .collect()
}

/// Returns the phase under `pointer`: node circles win, then the wedge whose
/// angular span contains the pointer within `outer_radius`.
pub fn phase_at(
    nodes: &[PhaseNode],
    center: Pos2,
    pointer: Pos2,
    outer_radius: f32,
    node_radius: f32,
) -> Option<usize> {
    let on_node = nodes
        .iter()
        .map(|node| (node.index, node.position.distance(pointer)))
        .filter(|(_, distance)| *distance <= node_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index);
    if on_node.is_some() {
        return on_node;
    }

    let offset = pointer - center;
    if offset.length() > outer_radius {
        return None;
    }

    let angle = offset.y.atan2(offset.x).to_degrees();
    nodes
        .iter()
        .find(|node| node.contains_angle(angle))
        .map(|node| node.index)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryHandle {
    /// Index of the phase before the boundary; dragging moves time between
    /// `boundary` and `boundary + 1`.
    pub boundary: usize,
    pub position: Pos2,
}

pub fn boundary_handles(nodes: &[PhaseNode], center: Pos2, radius: f32) -> Vec<BoundaryHandle> {
    nodes
        .windows(2)
        .map(|pair| BoundaryHandle {
            boundary: pair[0].index,
            position: point_on_circle(center, radius, pair[0].end_angle()),
        })
        .collect()
}

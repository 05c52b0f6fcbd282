use eframe::egui::epaint::Mesh;
use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Rect, Sense, Shape, Stroke, Ui, vec2,
};
use log::debug;

use crate::geometry::{
    PROGRESS_RADIUS_FACTOR, PhaseNode, ProgressArc, WEDGE_RADIUS_FACTOR, Wedge, adjust_boundary,
    boundary_handles, iteration_connectors, layout_nodes, phase_at, phase_wedges,
    progress_fraction, ring_radius,
};
use crate::style::{self, blend_color, with_alpha};
use crate::timeline::Timeline;
use crate::util::{format_percent, format_weeks, iteration_label};

const NODE_RADIUS: f32 = 22.0;
const HANDLE_RADIUS: f32 = 7.0;
const CONNECTOR_SEGMENTS: usize = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        boundary: usize,
    },
}

/// What happened on the wheel this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WheelResponse {
    pub clicked_phase: Option<usize>,
    /// Set once a boundary drag finishes; the list sums to 1.
    pub allocations_changed: Option<Vec<f32>>,
}

pub struct PhaseWheel {
    allocations: Vec<f32>,
    adjustable: bool,
    hovered: Option<usize>,
    drag: DragState,
}

impl PhaseWheel {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            allocations: timeline.allocations(),
            adjustable: true,
            hovered: None,
            drag: DragState::Idle,
        }
    }

    pub fn set_adjustable(&mut self, adjustable: bool) {
        self.adjustable = adjustable;
        if !adjustable {
            self.drag = DragState::Idle;
        }
    }

    pub fn allocations(&self) -> &[f32] {
        &self.allocations
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Takes the timeline's allocations unless a drag is in progress.
    pub fn sync(&mut self, timeline: &Timeline) {
        if self.drag == DragState::Idle {
            self.allocations = timeline.allocations();
        }
    }

    pub fn begin_drag(&mut self, boundary: usize) {
        if self.adjustable {
            self.drag = DragState::Dragging { boundary };
        }
    }

    /// Applies one frame of boundary movement. Returns whether the local
    /// allocations changed.
    pub fn drag_boundary(&mut self, boundary: usize, pixel_delta: f32, drawing_width: f32) -> bool {
        if !self.adjustable || pixel_delta == 0.0 {
            return false;
        }

        match adjust_boundary(&self.allocations, boundary, pixel_delta, drawing_width) {
            Some(adjusted) => {
                self.allocations = adjusted;
                true
            }
            None => false,
        }
    }

    /// Ends the current drag and hands back the list to report, if any.
    pub fn end_drag(&mut self) -> Option<Vec<f32>> {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { boundary } => {
                debug!("boundary {boundary} released: {:?}", self.allocations);
                Some(self.allocations.clone())
            }
            DragState::Idle => None,
        }
    }

    pub fn show(&mut self, ui: &mut Ui, timeline: &Timeline) -> WheelResponse {
        self.sync(timeline);

        let mut output = WheelResponse::default();
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, style::BACKGROUND);

        let nodes = layout_nodes(
            &timeline.phases,
            &self.allocations,
            timeline.current_phase,
            &timeline.iterations,
            rect,
        );
        if nodes.is_empty() {
            self.hovered = None;
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "This timeline has no phases.",
                FontId::proportional(16.0),
                style::MUTED_TEXT,
            );
            return output;
        }

        let center = rect.center();
        let radius = ring_radius(rect);
        let wedge_radius = radius * WEDGE_RADIUS_FACTOR;

        if self.drag == DragState::Idle {
            self.hovered = response
                .hover_pos()
                .and_then(|pointer| phase_at(&nodes, center, pointer, wedge_radius, NODE_RADIUS));
        }

        for wedge in phase_wedges(&nodes, center, wedge_radius) {
            let Some(node) = nodes.get(wedge.index) else {
                continue;
            };
            let hover_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("phase-hover", wedge.index)),
                self.hovered == Some(wedge.index),
            );
            let color = node.phase_type.style().color;
            let fill = with_alpha(color, (70.0 + hover_mix * 60.0) as u8);
            painter.add(Shape::mesh(wedge_mesh(&wedge, fill)));

            let border_width = if node.is_active { 3.0 } else { 1.0 };
            let mut outline = vec![wedge.center];
            outline.extend(wedge.rim());
            painter.add(Shape::closed_line(outline, Stroke::new(border_width, color)));
        }

        painter.circle_stroke(center, radius, Stroke::new(2.0, style::RING));

        let fraction = progress_fraction(&timeline.phases, timeline.current_phase);
        if let Some(arc) = ProgressArc::new(fraction, center, radius * PROGRESS_RADIUS_FACTOR) {
            painter.add(Shape::line(arc.points(), Stroke::new(6.0, style::PROGRESS)));
        }

        for connector in iteration_connectors(&nodes, &timeline.iterations, center) {
            painter.extend(Shape::dashed_line(
                &connector.curve_points(CONNECTOR_SEGMENTS),
                Stroke::new(2.0, with_alpha(style::CONNECTOR, 200)),
                6.0,
                4.0,
            ));
        }

        for node in &nodes {
            Self::draw_node(&painter, node, timeline);
        }

        painter.text(
            center,
            Align2::CENTER_CENTER,
            format_weeks(timeline.total_duration),
            FontId::proportional(20.0),
            style::TEXT,
        );
        if let Some(label) = iteration_label(timeline.iterations.len()) {
            painter.text(
                center + vec2(0.0, 22.0),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(12.0),
                style::MUTED_TEXT,
            );
        }

        if self.adjustable {
            self.handle_boundaries(ui, &painter, &nodes, rect, &mut output);
        }

        if self.hovered.is_some() && self.drag == DragState::Idle {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if response.clicked()
            && let Some(index) = self.hovered
        {
            output.clicked_phase = Some(index);
        }

        if let Some(index) = self.hovered
            && let Some(phase) = timeline.phases.get(index)
        {
            let allocation = self.allocations.get(index).copied().unwrap_or(phase.allocation);
            let panel_text = format!(
                "{}  |  {}  |  {}  |  {}",
                phase.name,
                format_percent(allocation),
                format_weeks(timeline.weeks_for(allocation)),
                phase.description
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if matches!(self.drag, DragState::Dragging { .. }) {
            Self::draw_drag_banner(&painter, rect);
        }

        output
    }

    fn handle_boundaries(
        &mut self,
        ui: &Ui,
        painter: &Painter,
        nodes: &[PhaseNode],
        rect: Rect,
        output: &mut WheelResponse,
    ) {
        let wedge_radius = ring_radius(rect) * WEDGE_RADIUS_FACTOR;
        for handle in boundary_handles(nodes, rect.center(), wedge_radius) {
            let hit_rect = Rect::from_center_size(handle.position, vec2(1.0, 1.0) * HANDLE_RADIUS * 3.0);
            let response = ui.interact(
                hit_rect,
                ui.make_persistent_id(("phase-boundary", handle.boundary)),
                Sense::drag(),
            );

            if response.drag_started() {
                debug!("dragging boundary {}", handle.boundary);
                self.begin_drag(handle.boundary);
            }
            if response.dragged() {
                ui.output_mut(|output| {
                    output.cursor_icon = egui::CursorIcon::Grabbing;
                });
                self.drag_boundary(handle.boundary, response.drag_delta().x, rect.width());
                ui.ctx().request_repaint();
            }
            if response.drag_stopped()
                && let Some(allocations) = self.end_drag()
            {
                output.allocations_changed = Some(allocations);
            }

            let active = response.hovered() || response.dragged();
            let fill = if active {
                style::TEXT
            } else {
                blend_color(style::RING, style::TEXT, 0.45)
            };
            painter.circle_filled(handle.position, HANDLE_RADIUS, fill);
            painter.circle_stroke(
                handle.position,
                HANDLE_RADIUS,
                Stroke::new(1.5, style::BACKGROUND),
            );
        }
    }

    fn draw_node(painter: &Painter, node: &PhaseNode, timeline: &Timeline) {
        let phase_style = node.phase_type.style();
        painter.circle_filled(node.position, NODE_RADIUS, phase_style.color);

        let ring = if node.is_complete {
            style::COMPLETE
        } else {
            style::BACKGROUND
        };
        painter.circle_stroke(node.position, NODE_RADIUS, Stroke::new(3.0, ring));
        if node.is_active {
            painter.circle_stroke(
                node.position,
                NODE_RADIUS + 5.0,
                Stroke::new(1.5, style::PROGRESS),
            );
        }
        if node.has_iterations {
            painter.circle_filled(
                node.position + vec2(NODE_RADIUS * 0.72, -NODE_RADIUS * 0.72),
                4.5,
                style::CONNECTOR,
            );
        }

        painter.text(
            node.position,
            Align2::CENTER_CENTER,
            phase_style.glyph,
            FontId::proportional(17.0),
            Color32::WHITE,
        );

        if let Some(phase) = timeline.phases.get(node.index) {
            painter.text(
                node.position + vec2(0.0, NODE_RADIUS + 6.0),
                Align2::CENTER_TOP,
                format!("{}  {}", phase.name, format_percent(node.allocation)),
                FontId::proportional(12.0),
                style::TEXT,
            );
        }
    }

    fn draw_drag_banner(painter: &Painter, rect: Rect) {
        let banner = Rect::from_center_size(
            rect.center_bottom() - vec2(0.0, 28.0),
            vec2(rect.width().min(420.0), 30.0),
        );
        painter.rect_filled(banner, 6.0, with_alpha(style::RING, 230));
        painter.text(
            banner.center(),
            Align2::CENTER_CENTER,
            "Drag left or right to move time between neighbouring phases",
            FontId::proportional(13.0),
            style::TEXT,
        );
    }
}

fn wedge_mesh(wedge: &Wedge, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(wedge.center, color);
    for point in wedge.rim() {
        mesh.colored_vertex(point, color);
    }

    let rim_end = mesh.vertices.len() as u32 - 1;
    for index in 1..rim_end {
        mesh.add_triangle(0, index, index + 1);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use eframe::egui::Pos2;

    use super::*;
    use crate::timeline::sample_timeline;

    #[test]
    fn drag_moves_time_between_neighbours_and_reports_on_release() {
        let timeline = sample_timeline();
        let mut wheel = PhaseWheel::new(&timeline);

        wheel.begin_drag(0);
        assert_eq!(wheel.drag_state(), DragState::Dragging { boundary: 0 });
        assert!(wheel.drag_boundary(0, 50.0, 500.0));

        let allocations = wheel.end_drag().expect("drag reports allocations");
        assert_eq!(wheel.drag_state(), DragState::Idle);
        assert!(allocations[0] > timeline.phases[0].allocation);
        assert!(allocations[1] < timeline.phases[1].allocation);
        assert!((allocations.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn last_boundary_does_not_move() {
        let timeline = sample_timeline();
        let mut wheel = PhaseWheel::new(&timeline);
        let last = timeline.phases.len() - 1;
        assert!(!wheel.drag_boundary(last, 40.0, 500.0));
        assert_eq!(wheel.allocations(), timeline.allocations().as_slice());
    }

    #[test]
    fn locked_wheel_ignores_drags() {
        let timeline = sample_timeline();
        let mut wheel = PhaseWheel::new(&timeline);
        wheel.set_adjustable(false);

        wheel.begin_drag(0);
        assert_eq!(wheel.drag_state(), DragState::Idle);
        assert!(!wheel.drag_boundary(0, 40.0, 500.0));
        assert_eq!(wheel.end_drag(), None);
    }

    #[test]
    fn sync_is_deferred_while_dragging() {
        let mut timeline = sample_timeline();
        let mut wheel = PhaseWheel::new(&timeline);
        wheel.begin_drag(1);
        wheel.drag_boundary(1, -30.0, 300.0);
        let dragged = wheel.allocations().to_vec();

        timeline.set_allocations(&[0.25, 0.25, 0.25, 0.25]);
        wheel.sync(&timeline);
        assert_eq!(wheel.allocations(), dragged.as_slice());

        wheel.end_drag();
        wheel.sync(&timeline);
        assert_eq!(wheel.allocations(), &[0.25, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn mesh_fans_out_from_the_centre() {
        let wedge = Wedge {
            index: 0,
            center: Pos2::new(0.0, 0.0),
            radius: 10.0,
            start_angle: 0.0,
            end_angle: 90.0,
        };
        let mesh = wedge_mesh(&wedge, Color32::WHITE);
        let rim_points = wedge.rim().len();
        assert_eq!(mesh.vertices.len(), rim_points + 1);
        assert_eq!(mesh.indices.len(), (rim_points - 1) * 3);
    }
}

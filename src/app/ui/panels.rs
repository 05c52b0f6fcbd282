use eframe::egui::{self, Align, Context, Layout};

use crate::geometry::progress_fraction;
use crate::util::{format_percent, format_weeks};

use super::super::ViewModel;
use super::super::wheel::DragState;

impl ViewModel {
    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("phase-wheel");
                    ui.separator();
                    ui.label(format!("source: {source}"));
                    ui.label(format!("phases: {}", self.timeline.phases.len()));
                    ui.label(format!(
                        "duration: {}",
                        format_weeks(self.timeline.total_duration)
                    ));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload timeline"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let fraction =
                            progress_fraction(&self.timeline.phases, self.timeline.current_phase);
                        ui.label(format!("progress: {}", format_percent(fraction)));
                        if let DragState::Dragging { boundary } = self.wheel.drag_state() {
                            ui.label(format!("adjusting boundary {}", boundary + 1));
                        }
                        if let Some(status) = &self.status {
                            ui.label(status.as_str());
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = self.wheel.show(ui, &self.timeline);
                self.handle_wheel_response(response);
            });
    }
}

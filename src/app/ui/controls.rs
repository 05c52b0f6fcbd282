use std::path::Path;

use eframe::egui::{self, RichText, Ui};
use log::{error, info};

use crate::svg::export_svg;
use crate::timeline::PhaseType;
use crate::util::{format_percent, format_weeks};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Timeline Controls");
        ui.separator();
        ui.add_space(4.0);

        if ui
            .checkbox(&mut self.adjustable, "Allow allocation dragging")
            .on_hover_text("Drag the handles between phases to move time between neighbours.")
            .changed()
        {
            self.wheel.set_adjustable(self.adjustable);
        }

        ui.separator();
        self.draw_current_phase_picker(ui);

        ui.separator();
        ui.label(RichText::new("Time allocation").strong());
        egui::Grid::new("allocation_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for (index, phase) in self.timeline.phases.iter().enumerate() {
                    let allocation = self
                        .wheel
                        .allocations()
                        .get(index)
                        .copied()
                        .unwrap_or(phase.allocation);
                    ui.label(
                        RichText::new(format!("{} {}", phase.phase_type.style().glyph, phase.name))
                            .color(phase.phase_type.style().color),
                    );
                    ui.label(format_percent(allocation));
                    ui.label(format_weeks(self.timeline.weeks_for(allocation)));
                    ui.end_row();
                }
            });

        let changed = self.timeline.allocations() != self.loaded_allocations;
        if ui
            .add_enabled(changed, egui::Button::new("Reset allocations"))
            .clicked()
        {
            self.timeline.set_allocations(&self.loaded_allocations);
            info!("time allocations reset to loaded values");
            self.status = Some("Allocations reset".to_owned());
        }

        ui.separator();
        ui.label(RichText::new("Export").strong());
        ui.horizontal(|ui| {
            ui.label("SVG file");
            ui.text_edit_singleline(&mut self.export_path);
        });
        if ui.button("Export SVG").clicked() {
            self.export();
        }

        ui.separator();
        ui.label(RichText::new("Legend").strong());
        for phase_type in PhaseType::ALL {
            let phase_style = phase_type.style();
            ui.label(
                RichText::new(format!("{}  {}", phase_style.glyph, phase_type.label()))
                    .color(phase_style.color),
            );
        }
        ui.label("Dashed curves link phases that were revisited.");
    }

    fn draw_current_phase_picker(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Current phase").strong());
        let count = self.timeline.phases.len();
        if count == 0 {
            ui.label("No phases loaded.");
            return;
        }

        let shown = self.timeline.current_phase.min(count - 1);
        let mut current = shown;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(current > 0, egui::Button::new("Previous"))
                .clicked()
            {
                current -= 1;
            }
            if ui
                .add_enabled(current + 1 < count, egui::Button::new("Next"))
                .clicked()
            {
                current += 1;
            }
        });
        ui.add(egui::Slider::new(&mut current, 0..=count - 1).text("index"));

        if current != shown {
            self.timeline.current_phase = current;
            if let Some(phase) = self.timeline.current() {
                info!("current phase set to {current} ({})", phase.name);
            }
        }
    }

    fn export(&mut self) {
        let (width, height) = self.export_size;
        let path = Path::new(self.export_path.trim());
        match export_svg(&self.timeline, path, width, height) {
            Ok(()) => {
                self.status = Some(format!("Exported {}", path.display()));
            }
            Err(export_error) => {
                error!("{export_error:#}");
                self.status = Some(format!("Export failed: {export_error}"));
            }
        }
    }
}

use eframe::egui::{self, RichText, Ui};

use crate::util::{format_percent, format_weeks};

use super::super::ViewModel;

fn draw_list(ui: &mut Ui, title: &str, items: &[String], needed: usize) {
    let heading = format!("{title} ({}/{needed})", items.len().min(needed));
    let color = if items.len() >= needed {
        crate::style::COMPLETE
    } else {
        crate::style::MUTED_TEXT
    };
    ui.label(RichText::new(heading).strong().color(color));
    if items.is_empty() {
        ui.label("None yet.");
    }
    for item in items {
        ui.label(format!("- {item}"));
    }
    ui.add_space(4.0);
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Phase Details");
        ui.add_space(6.0);

        let Some(index) = self.selected else {
            ui.label("Click a phase on the wheel to see its details.");
            return;
        };

        let Some(phase) = self.timeline.phases.get(index) else {
            ui.label("Selected phase no longer exists in this timeline.");
            return;
        };

        let phase_style = phase.phase_type.style();
        ui.label(
            RichText::new(format!("{}  {}", phase_style.glyph, phase.name))
                .strong()
                .size(18.0)
                .color(phase_style.color),
        );
        ui.small(phase.phase_type.label());
        if !phase.description.is_empty() {
            ui.add_space(4.0);
            ui.label(phase.description.as_str());
        }

        ui.add_space(6.0);
        if !phase.duration.is_empty() {
            ui.label(format!("Planned duration: {}", phase.duration));
        }
        ui.label(format!(
            "Allocation: {} ({})",
            format_percent(phase.allocation),
            format_weeks(self.timeline.weeks_for(phase.allocation))
        ));

        let mut flags = Vec::new();
        if index == self.timeline.current_phase {
            flags.push("current");
        }
        flags.push(if phase.is_complete() {
            "complete"
        } else {
            "in progress"
        });
        let iterations = self
            .timeline
            .iterations
            .iter()
            .filter(|event| event.touches(phase.phase_type))
            .count();
        ui.label(format!("Status: {}", flags.join(", ")));
        if iterations > 0 {
            ui.label(format!("Revisited in {iterations} iteration events"));
        }

        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("phase_details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                draw_list(ui, "Objectives", &phase.objectives, 2);
                draw_list(ui, "Activities", &phase.activities, 2);
                draw_list(ui, "Deliverables", &phase.deliverables, 1);
            });
    }
}

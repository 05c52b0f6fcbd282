use eframe::egui::Color32;

use crate::timeline::PhaseType;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseStyle {
    pub color: Color32,
    pub glyph: &'static str,
}

pub const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub const RING: Color32 = Color32::from_rgb(52, 60, 72);
pub const PROGRESS: Color32 = Color32::from_rgb(245, 206, 93);
pub const CONNECTOR: Color32 = Color32::from_rgb(241, 146, 94);
pub const COMPLETE: Color32 = Color32::from_rgb(110, 214, 140);
pub const TEXT: Color32 = Color32::from_gray(238);
pub const MUTED_TEXT: Color32 = Color32::from_gray(160);

impl PhaseType {
    pub fn style(self) -> PhaseStyle {
        match self {
            Self::Analyze => PhaseStyle {
                color: Color32::from_rgb(74, 144, 226),
                glyph: "🔍",
            },
            Self::Brainstorm => PhaseStyle {
                color: Color32::from_rgb(240, 173, 78),
                glyph: "💡",
            },
            Self::Prototype => PhaseStyle {
                color: Color32::from_rgb(80, 190, 150),
                glyph: "🔧",
            },
            Self::Evaluate => PhaseStyle {
                color: Color32::from_rgb(160, 120, 230),
                glyph: "📊",
            },
        }
    }
}

pub fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_phase_type_has_a_distinct_style() {
        let colors = PhaseType::ALL
            .iter()
            .map(|phase_type| hex(phase_type.style().color))
            .collect::<HashSet<_>>();
        let glyphs = PhaseType::ALL
            .iter()
            .map(|phase_type| phase_type.style().glyph)
            .collect::<HashSet<_>>();
        assert_eq!(colors.len(), PhaseType::ALL.len());
        assert_eq!(glyphs.len(), PhaseType::ALL.len());
    }

    #[test]
    fn hex_is_lowercase_rgb() {
        assert_eq!(hex(Color32::from_rgb(255, 16, 0)), "#ff1000");
    }

    #[test]
    fn blend_endpoints_return_inputs() {
        let base = Color32::from_rgb(10, 20, 30);
        let overlay = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend_color(base, overlay, 0.0), base);
        assert_eq!(blend_color(base, overlay, 1.0), overlay);
    }
}

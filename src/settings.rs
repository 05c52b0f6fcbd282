use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use crate::timeline::{
    Timeline, TimelineError, check_current_phase, load_timeline, sample_timeline,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Timeline JSON file; the built-in sample is used when omitted.
    #[arg(long)]
    timeline: Option<PathBuf>,

    /// Override the timeline's current phase index.
    #[arg(long)]
    current_phase: Option<usize>,

    /// Override the total project duration, in weeks.
    #[arg(long)]
    total_duration: Option<f32>,

    /// Disable drag-to-adjust time allocation.
    #[arg(long)]
    locked: bool,

    /// Write the wheel to an SVG file and exit without opening a window.
    #[arg(long)]
    export_svg: Option<PathBuf>,

    /// SVG export width in pixels.
    #[arg(long, default_value_t = 720.0)]
    width: f32,

    /// SVG export height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub timeline_path: Option<PathBuf>,
    pub current_phase: Option<usize>,
    pub total_duration: Option<f32>,
    pub adjustable: bool,
    pub export_path: Option<PathBuf>,
    pub export_size: (f32, f32),
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            timeline_path: args.timeline,
            current_phase: args.current_phase,
            total_duration: args.total_duration,
            adjustable: !args.locked,
            export_path: args.export_svg,
            export_size: (args.width.max(1.0), args.height.max(1.0)),
        }
    }
}

impl Settings {
    pub fn source_label(&self) -> String {
        self.timeline_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in sample".to_owned())
    }

    /// Reads the configured timeline and applies command-line overrides.
    pub fn load_timeline(&self) -> Result<Timeline> {
        let mut timeline = match &self.timeline_path {
            Some(path) => load_timeline(path)?,
            None => sample_timeline(),
        };

        if let Err(error) = self.apply_overrides(&mut timeline) {
            warn!("{error}; no phase will be shown as active");
        }

        info!(
            "loaded {} phases from {}",
            timeline.phases.len(),
            self.source_label()
        );
        Ok(timeline)
    }

    /// Applies the command-line overrides, then re-checks the current phase
    /// since an override can point past the last phase.
    pub fn apply_overrides(&self, timeline: &mut Timeline) -> Result<(), TimelineError> {
        if let Some(current_phase) = self.current_phase {
            timeline.current_phase = current_phase;
        }
        if let Some(total_duration) = self.total_duration {
            timeline.total_duration = total_duration;
        }
        check_current_phase(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_sample_and_allow_adjustment() {
        let settings = Settings::from(Args::parse_from(["phase-wheel"]));
        assert!(settings.adjustable);
        assert_eq!(settings.timeline_path, None);
        assert_eq!(settings.export_size, (720.0, 720.0));
        assert_eq!(settings.source_label(), "built-in sample");
    }

    #[test]
    fn overrides_apply_to_loaded_timeline() {
        let settings = Settings::from(Args::parse_from([
            "phase-wheel",
            "--current-phase",
            "0",
            "--total-duration",
            "20",
            "--locked",
        ]));
        assert!(!settings.adjustable);

        let timeline = settings.load_timeline().expect("sample loads");
        assert_eq!(timeline.current_phase, 0);
        assert!((timeline.total_duration - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_current_phase_override_is_flagged() {
        let settings = Settings::from(Args::parse_from(["phase-wheel", "--current-phase", "9"]));
        let mut timeline = sample_timeline();
        assert_eq!(
            settings.apply_overrides(&mut timeline),
            Err(TimelineError::CurrentPhaseOutOfRange {
                current: 9,
                count: 4
            })
        );
        assert_eq!(timeline.current_phase, 9);

        let timeline = settings.load_timeline().expect("out-of-range phase is not fatal");
        assert_eq!(timeline.current_phase, 9);
        assert!(timeline.current().is_none());
    }

    #[test]
    fn in_range_override_passes_the_phase_check() {
        let settings = Settings::from(Args::parse_from(["phase-wheel", "--current-phase", "3"]));
        let mut timeline = sample_timeline();
        assert_eq!(settings.apply_overrides(&mut timeline), Ok(()));
    }

    #[test]
    fn export_size_flags_have_help_text() {
        use clap::CommandFactory;

        let help = Args::command().render_help().to_string();
        assert!(help.contains("SVG export width in pixels"));
        assert!(help.contains("SVG export height in pixels"));
    }

    #[test]
    fn missing_file_is_reported() {
        let settings = Settings::from(Args::parse_from([
            "phase-wheel",
            "--timeline",
            "/nonexistent/phase-wheel/timeline.json",
        ]));
        let error = settings.load_timeline().expect_err("missing file fails");
        assert!(error.to_string().contains("failed to read timeline file"));
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use thiserror::Error;

use crate::geometry::normalize_allocations;

use super::model::Timeline;

const ALLOCATION_SUM_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Error, PartialEq)]
pub enum TimelineError {
    #[error("phase {index} ({name}) has invalid allocation {value}")]
    InvalidAllocation {
        index: usize,
        name: String,
        value: f32,
    },
    #[error("current phase {current} is out of range for {count} phases")]
    CurrentPhaseOutOfRange { current: usize, count: usize },
}

pub fn load_timeline(path: &Path) -> Result<Timeline> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline file {}", path.display()))?;
    parse_timeline(&raw).with_context(|| format!("invalid timeline file {}", path.display()))
}

pub fn parse_timeline(raw: &str) -> Result<Timeline> {
    let mut timeline: Timeline = serde_json::from_str(raw).context("invalid timeline JSON")?;
    check_allocations(&timeline)?;

    let sum = timeline.phases.iter().map(|phase| phase.allocation).sum::<f32>();
    if !timeline.phases.is_empty() && (sum - 1.0).abs() > ALLOCATION_SUM_TOLERANCE {
        warn!("phase allocations sum to {sum:.3}, normalizing");
        let mut allocations = timeline.allocations();
        normalize_allocations(&mut allocations);
        timeline.set_allocations(&allocations);
    }

    if let Err(error) = check_current_phase(&timeline) {
        warn!("{error}; no phase will be shown as active");
    }

    debug!(
        "parsed timeline with {} phases and {} iteration events",
        timeline.phases.len(),
        timeline.iterations.len()
    );
    Ok(timeline)
}

pub(super) fn check_allocations(timeline: &Timeline) -> Result<(), TimelineError> {
    for (index, phase) in timeline.phases.iter().enumerate() {
        if !phase.allocation.is_finite() || phase.allocation < 0.0 {
            return Err(TimelineError::InvalidAllocation {
                index,
                name: phase.name.clone(),
                value: phase.allocation,
            });
        }
    }
    Ok(())
}

pub fn check_current_phase(timeline: &Timeline) -> Result<(), TimelineError> {
    if timeline.current_phase >= timeline.phases.len() {
        return Err(TimelineError::CurrentPhaseOutOfRange {
            current: timeline.current_phase,
            count: timeline.phases.len(),
        });
    }
    Ok(())
}

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseType {
    Analyze,
    Brainstorm,
    Prototype,
    Evaluate,
}

impl PhaseType {
    pub const ALL: [Self; 4] = [
        Self::Analyze,
        Self::Brainstorm,
        Self::Prototype,
        Self::Evaluate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Analyze => "Analyze",
            Self::Brainstorm => "Brainstorm",
            Self::Prototype => "Prototype",
            Self::Evaluate => "Evaluate",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(rename = "type")]
    pub phase_type: PhaseType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    pub allocation: f32,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

impl Phase {
    /// A phase counts as complete once it has at least two objectives, two
    /// activities and one deliverable.
    pub fn is_complete(&self) -> bool {
        self.objectives.len() >= 2 && self.activities.len() >= 2 && !self.deliverables.is_empty()
    }
}

/// A recorded transition back to a previously visited phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct IterationEvent {
    pub from: PhaseType,
    pub to: PhaseType,
}

impl IterationEvent {
    pub fn touches(&self, phase_type: PhaseType) -> bool {
        self.from == phase_type || self.to == phase_type
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub iterations: Vec<IterationEvent>,
    #[serde(default)]
    pub current_phase: usize,
    #[serde(default)]
    pub total_duration: f32,
}

impl Timeline {
    pub fn allocations(&self) -> Vec<f32> {
        self.phases.iter().map(|phase| phase.allocation).collect()
    }

    pub fn set_allocations(&mut self, allocations: &[f32]) {
        for (phase, allocation) in self.phases.iter_mut().zip(allocations) {
            phase.allocation = *allocation;
        }
    }

    pub fn current(&self) -> Option<&Phase> {
        self.phases.get(self.current_phase)
    }

    /// Weeks of the total duration that a phase's allocation stands for.
    pub fn weeks_for(&self, allocation: f32) -> f32 {
        self.total_duration * allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(objectives: usize, activities: usize, deliverables: usize) -> Phase {
        Phase {
            phase_type: PhaseType::Analyze,
            name: "Analyze".to_owned(),
            description: String::new(),
            duration: String::new(),
            allocation: 0.25,
            objectives: vec!["o".to_owned(); objectives],
            activities: vec!["a".to_owned(); activities],
            deliverables: vec!["d".to_owned(); deliverables],
        }
    }

    #[test]
    fn completion_requires_two_objectives_two_activities_one_deliverable() {
        assert!(phase(2, 2, 1).is_complete());
        assert!(!phase(1, 2, 1).is_complete());
        assert!(!phase(2, 1, 1).is_complete());
        assert!(!phase(2, 2, 0).is_complete());
        assert!(phase(5, 3, 4).is_complete());
    }

    #[test]
    fn iteration_event_touches_both_ends() {
        let event = IterationEvent {
            from: PhaseType::Prototype,
            to: PhaseType::Brainstorm,
        };
        assert!(event.touches(PhaseType::Prototype));
        assert!(event.touches(PhaseType::Brainstorm));
        assert!(!event.touches(PhaseType::Evaluate));
    }

    #[test]
    fn set_allocations_ignores_extra_entries() {
        let mut timeline = Timeline {
            phases: vec![phase(0, 0, 0), phase(0, 0, 0)],
            iterations: Vec::new(),
            current_phase: 0,
            total_duration: 10.0,
        };
        timeline.set_allocations(&[0.4, 0.6, 0.9]);
        assert_eq!(timeline.allocations(), vec![0.4, 0.6]);
        assert!((timeline.weeks_for(0.4) - 4.0).abs() < 1e-6);
    }
}

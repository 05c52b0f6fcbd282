use super::model::{IterationEvent, Phase, PhaseType, Timeline};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

pub fn sample_timeline() -> Timeline {
    Timeline {
        phases: vec![
            Phase {
                phase_type: PhaseType::Analyze,
                name: "Analyze".to_owned(),
                description: "Understand the problem space, the audience and the constraints."
                    .to_owned(),
                duration: "2-3 weeks".to_owned(),
                allocation: 0.25,
                objectives: strings(&["Map user needs", "Define success criteria"]),
                activities: strings(&["Stakeholder interviews", "Competitive review"]),
                deliverables: strings(&["Problem brief"]),
            },
            Phase {
                phase_type: PhaseType::Brainstorm,
                name: "Brainstorm".to_owned(),
                description: "Generate a wide range of directions before narrowing down."
                    .to_owned(),
                duration: "1-2 weeks".to_owned(),
                allocation: 0.2,
                objectives: strings(&["Explore divergent ideas", "Pick three concepts"]),
                activities: strings(&["Sketching sessions", "Mood boards"]),
                deliverables: strings(&["Concept shortlist"]),
            },
            Phase {
                phase_type: PhaseType::Prototype,
                name: "Prototype".to_owned(),
                description: "Turn the strongest concepts into something people can try."
                    .to_owned(),
                duration: "3-4 weeks".to_owned(),
                allocation: 0.35,
                objectives: strings(&["Build a testable version"]),
                activities: strings(&["Wireframes", "Clickable mockups"]),
                deliverables: Vec::new(),
            },
            Phase {
                phase_type: PhaseType::Evaluate,
                name: "Evaluate".to_owned(),
                description: "Test with real users and decide what ships.".to_owned(),
                duration: "1-2 weeks".to_owned(),
                allocation: 0.2,
                objectives: Vec::new(),
                activities: Vec::new(),
                deliverables: Vec::new(),
            },
        ],
        iterations: vec![
            IterationEvent {
                from: PhaseType::Prototype,
                to: PhaseType::Brainstorm,
            },
            IterationEvent {
                from: PhaseType::Brainstorm,
                to: PhaseType::Analyze,
            },
        ],
        current_phase: 2,
        total_duration: 12.0,
    }
}

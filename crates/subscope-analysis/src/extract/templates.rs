//! Fixed narrative text used by the heuristic report.
//!
//! Content is identical for every subject and every input.

use subscope_core::{MissionVision, TransformationNarrative};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[must_use]
pub fn transformation_narrative() -> TransformationNarrative {
    TransformationNarrative {
        before_state: "Working hard without a clear system, unsure which efforts compound and \
                       which are wasted"
            .to_string(),
        after_state: "Operating from a deliberate strategy with repeatable habits and visible, \
                      compounding results"
            .to_string(),
        journey: owned(&[
            "Recognize the patterns that keep you stuck",
            "Adopt a simple framework for deciding what matters",
            "Build consistent habits around that framework",
            "Measure what works and cut what does not",
            "Scale the system and teach it to others",
        ]),
        promises: owned(&[
            "Clarity on where to focus your effort",
            "Frameworks you can apply immediately",
            "Sustainable progress instead of bursts of motivation",
        ]),
        evidence: owned(&[
            "Personal experience building in public",
            "Stories from readers applying the ideas",
            "Consistent publishing over time",
        ]),
    }
}

#[must_use]
pub fn mission_vision() -> MissionVision {
    MissionVision {
        mission: "Help readers turn hard-won lessons into practical systems they can use today"
            .to_string(),
        vision: "A world where more people build meaningful work on their own terms".to_string(),
        values: owned(&[
            "Clarity",
            "Consistency",
            "Ownership",
            "Generosity",
            "Continuous learning",
        ]),
    }
}

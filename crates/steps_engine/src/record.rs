//! The data model every solving path produces.

use serde::{Deserialize, Serialize};

/// One line of a derivation trail: a human-readable justification paired
/// with the rendered math it produced. Steps are append-only during
/// solving, in the order a person would write them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,
    pub math: String,
}

impl Step {
    pub fn new(description: impl Into<String>, math: impl Into<String>) -> Self {
        Step {
            description: description.into(),
            math: math.into(),
        }
    }
}

/// What an excluded plotting collaborator would need to draw the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationHint {
    pub expression: String,
}

/// The structured result of solving one problem. Created once, by exactly
/// one solving path; `error` present means `answer` is a diagnostic
/// message, not a computed result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub number: usize,
    pub original: String,
    #[serde(rename = "type")]
    pub problem_type: String,
    pub steps: Vec<Step>,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub visualization: Option<VisualizationHint>,
    /// Advisory classifier label, appended by the batch caller after the
    /// solving path has returned the record.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
}

impl SolutionRecord {
    pub fn new(number: usize, original: &str, problem_type: &str) -> Self {
        SolutionRecord {
            number,
            original: original.to_string(),
            problem_type: problem_type.to_string(),
            steps: Vec::new(),
            answer: String::new(),
            error: None,
            visualization: None,
            category: None,
        }
    }

    pub fn push_step(&mut self, description: impl Into<String>, math: impl Into<String>) {
        self.steps.push(Step::new(description, math));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_keep_insertion_order() {
        let mut rec = SolutionRecord::new(1, "2x = 4", "Algebra");
        rec.push_step("first", "a");
        rec.push_step("second", "b");
        assert_eq!(rec.steps[0].math, "a");
        assert_eq!(rec.steps[1].math, "b");
    }
}

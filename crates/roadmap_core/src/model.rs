use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a career goal")]
    EmptyGoal,
}

/// A validated generation request. The goal is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapRequest {
    #[serde(rename = "careerGoal")]
    goal: String,
}

impl RoadmapRequest {
    pub fn new(raw_goal: &str) -> Result<Self, ValidationError> {
        let goal = raw_goal.trim();
        if goal.is_empty() {
            return Err(ValidationError::EmptyGoal);
        }
        Ok(Self {
            goal: goal.to_owned(),
        })
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub number: u32,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub timeframe: String,
}

/// A generated roadmap. Replaced wholesale by each generation, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub title: String,
    pub description: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoadmapShapeError {
    #[error("step at position {index} has number 0")]
    ZeroStepNumber { index: usize },
    #[error("step number {number} appears more than once")]
    DuplicateStepNumber { number: u32 },
}

impl Roadmap {
    /// Checks the invariants completion tracking relies on: step numbers are
    /// positive and unique.
    pub fn validate(&self) -> Result<(), RoadmapShapeError> {
        let mut seen = BTreeSet::new();
        for (index, step) in self.steps.iter().enumerate() {
            if step.number == 0 {
                return Err(RoadmapShapeError::ZeroStepNumber { index });
            }
            if !seen.insert(step.number) {
                return Err(RoadmapShapeError::DuplicateStepNumber {
                    number: step.number,
                });
            }
        }
        Ok(())
    }

    pub fn contains_step(&self, number: u32) -> bool {
        self.steps.iter().any(|step| step.number == number)
    }
}

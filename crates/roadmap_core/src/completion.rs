use std::collections::BTreeSet;

/// Set of completed step numbers for the active roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionTracker {
    completed: BTreeSet<u32>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `step_number` and returns whether it is now complete.
    pub fn toggle(&mut self, step_number: u32) -> bool {
        if self.completed.remove(&step_number) {
            false
        } else {
            self.completed.insert(step_number);
            true
        }
    }

    pub fn is_complete(&self, step_number: u32) -> bool {
        self.completed.contains(&step_number)
    }

    pub fn reset(&mut self) {
        self.completed.clear();
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Completed step numbers in ascending order.
    pub fn completed(&self) -> impl Iterator<Item = u32> + '_ {
        self.completed.iter().copied()
    }
}

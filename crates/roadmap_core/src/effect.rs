use crate::{Epoch, Roadmap, RoadmapRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one generation request, tagged with the epoch it belongs to.
    GenerateRoadmap { epoch: Epoch, request: RoadmapRequest },
    /// Export the active roadmap. `completed` is a snapshot for rendering only.
    ExportRoadmap { roadmap: Roadmap, completed: Vec<u32> },
}

use crate::puzzle::Puzzle;

use super::frontier::QueueOrder;
use super::{run, SearchResult, Strategy};

/// Uniform-cost ordering: smallest g first, no estimate.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UniformCost;

impl Strategy for UniformCost {
    const ORDER: QueueOrder = QueueOrder::PathCost;

    fn name(&self) -> String {
        "UC".to_string()
    }

    fn estimate(&self, _state: &Puzzle) -> u32 {
        0
    }

    // Strict: once closed, never reopened.
    fn closed_rejects(&self, _closed_g: u32, _g: u32) -> bool {
        true
    }
}

/// Uniform-cost search from `initial` to `goal`.
///
/// With unit move costs the first goal popped has minimal g, so the
/// returned path is a shortest one.
pub fn uniform_cost(initial: &Puzzle, goal: &Puzzle) -> SearchResult {
    run(initial, goal, &UniformCost)
}

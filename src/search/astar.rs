use crate::heuristic::{Heuristic, HeuristicEvaluator};
use crate::puzzle::Puzzle;

use super::frontier::QueueOrder;
use super::{run, SearchResult, Strategy};

/// A* ordering: smallest f = g + h first, deeper node on ties.
#[derive(Debug, Clone)]
pub(crate) struct AStar {
    evaluator: HeuristicEvaluator,
}

impl AStar {
    pub fn new(goal: &Puzzle, heuristic: Heuristic) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(goal, heuristic),
        }
    }
}

impl Strategy for AStar {
    const ORDER: QueueOrder = QueueOrder::Estimate;

    fn name(&self) -> String {
        format!("A*({})", self.evaluator.heuristic())
    }

    fn estimate(&self, state: &Puzzle) -> u32 {
        self.evaluator.evaluate(state)
    }

    // A strictly cheaper path gets past a closed entry; anything else is dropped.
    fn closed_rejects(&self, closed_g: u32, g: u32) -> bool {
        g >= closed_g
    }
}

/// A* search from `initial` to `goal` guided by `heuristic`.
///
/// Goal tile positions are computed once here and reused for every node.
pub fn a_star(initial: &Puzzle, goal: &Puzzle, heuristic: Heuristic) -> SearchResult {
    run(initial, goal, &AStar::new(goal, heuristic))
}

//! Uniform-cost and A* search with a strict expanded list.
//!
//! Both searches share one expansion loop ([`run`]). They differ only in how
//! the open structure is ordered, in the estimate attached to each node, and
//! in how a closed state treats a newly found path:
//!
//! - uniform cost never lets a closed state back in;
//! - A* lets a path through only when it is strictly cheaper than the
//!   committed one.
//!
//! Both closed-set rules are kept as they are, even though they differ.

pub mod astar;
mod frontier;
pub mod stats;
pub mod uniform_cost;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, trace, warn};

use crate::heuristic::Heuristic;
use crate::puzzle::{Puzzle, PuzzleError};
use crate::successors::{is_inverse, successors};

use self::frontier::{ClosedSet, Frontier, QueueOrder, SearchNode};

pub use self::astar::a_star;
pub use self::stats::SearchStats;
pub use self::uniform_cost::uniform_cost;

/// How a search call ended. The path is empty for everything but `Solved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Initial and goal boards were identical. Nothing was expanded.
    AlreadyAtGoal,
    Solved,
    /// The open structure ran dry before the goal was popped.
    NoPath,
}

/// Move path plus the statistics of the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Move symbols (`u`, `r`, `d`, `l`) in application order.
    pub path: String,
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl SearchResult {
    fn new(path: String, outcome: Outcome, stats: SearchStats) -> Self {
        Self {
            path,
            outcome,
            stats,
        }
    }

    pub fn found(&self) -> bool {
        self.outcome != Outcome::NoPath
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    UniformCost,
    AStar(Heuristic),
}

impl Algorithm {
    /// Every configuration, in the order the driver reports them.
    pub fn all() -> [Algorithm; 3] {
        [
            Algorithm::UniformCost,
            Algorithm::AStar(Heuristic::MisplacedTiles),
            Algorithm::AStar(Heuristic::ManhattanDistance),
        ]
    }

    pub fn run(&self, initial: &Puzzle, goal: &Puzzle) -> SearchResult {
        match *self {
            Algorithm::UniformCost => uniform_cost(initial, goal),
            Algorithm::AStar(heuristic) => a_star(initial, goal, heuristic),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Algorithm::UniformCost => write!(f, "UC"),
            Algorithm::AStar(heuristic) => write!(f, "A*({})", heuristic),
        }
    }
}

/// Accepts the `Display` names (`UC`, `A*(manhattan)`) and the dashed forms
/// `uc`, `astar-misplaced`, `astar-manhattan`.
impl FromStr for Algorithm {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if matches!(name.as_str(), "uc" | "ucs" | "uniform-cost") {
            return Ok(Algorithm::UniformCost);
        }

        let unknown = || PuzzleError::UnknownAlgorithm(s.to_string());
        let heuristic = name
            .strip_prefix("a*(")
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| name.strip_prefix("astar-"))
            .or_else(|| name.strip_prefix("a*-"))
            .ok_or_else(unknown)?;

        heuristic
            .parse()
            .map(Algorithm::AStar)
            .map_err(|_| unknown())
    }
}

pub fn solve(initial: &str, goal: &str, algorithm: Algorithm) -> Result<SearchResult, PuzzleError> {
    let initial = Puzzle::parse(initial)?;
    let goal = Puzzle::parse(goal)?;
    Ok(algorithm.run(&initial, &goal))
}

/// What varies between the two searches.
pub(crate) trait Strategy {
    const ORDER: QueueOrder;

    fn name(&self) -> String;

    fn estimate(&self, state: &Puzzle) -> u32;

    /// Whether a state closed at `closed_g` rejects a new path of cost `g`.
    fn closed_rejects(&self, closed_g: u32, g: u32) -> bool;
}

/// The shared expansion loop.
///
/// The goal is only accepted when popped, never when generated.
pub(crate) fn run<S: Strategy>(initial: &Puzzle, goal: &Puzzle, strategy: &S) -> SearchResult {
    run_with(initial, goal, strategy, &mut Frontier::new(S::ORDER))
}

fn run_with<S: Strategy>(
    initial: &Puzzle,
    goal: &Puzzle,
    strategy: &S,
    frontier: &mut Frontier,
) -> SearchResult {
    let start_time = Instant::now();
    let mut stats = SearchStats::new();

    debug!("{}: searching {} -> {}", strategy.name(), initial, goal);

    if initial == goal {
        stats.running_time = start_time.elapsed();
        return SearchResult::new(String::new(), Outcome::AlreadyAtGoal, stats);
    }

    let mut closed = ClosedSet::default();

    frontier.push(SearchNode::new(
        *initial,
        String::new(),
        0,
        strategy.estimate(initial),
    ));
    stats.observe_queue(frontier.len());

    while let Some(cur) = frontier.pop() {
        if !cur.alive {
            stats.add_dead_pop();
            continue;
        }

        if cur.state == *goal {
            stats.path_length = cur.path.len();
            stats.running_time = start_time.elapsed();
            debug!(
                "{}: solved in {} moves after {} expansions",
                strategy.name(),
                stats.path_length,
                stats.state_expansions
            );
            return SearchResult::new(cur.path, Outcome::Solved, stats);
        }

        stats.add_expansion();
        trace!("expand {} g={} h={} f={}", cur.state, cur.g, cur.h, cur.f);

        let last_move = cur.last_move();
        for (next, movement) in successors(&cur.state) {
            if last_move.is_some_and(|last| is_inverse(last, movement)) {
                stats.add_local_loop();
                continue;
            }

            let g = cur.g + 1;

            if let Some(closed_g) = closed.get(&next) {
                if strategy.closed_rejects(closed_g, g) {
                    stats.add_reexpansion_attempt();
                    continue;
                }
            }

            if let Some(open_g) = frontier.open_node(&next).map(|node| node.g) {
                if g < open_g {
                    frontier.supersede(&next);
                } else {
                    stats.add_reexpansion_attempt();
                    continue;
                }
            }

            let h = strategy.estimate(&next);
            frontier.push(cur.child(next, movement, h));
            stats.observe_queue(frontier.len());
        }

        closed.commit(cur.state, cur.g);
    }

    debug_assert!(frontier.is_empty());
    debug_assert_eq!(stats.max_queue_length, frontier.high_water());
    stats.running_time = start_time.elapsed();
    warn!(
        "{}: no path from {} to {} ({} states closed)",
        strategy.name(),
        initial,
        goal,
        closed.len()
    );
    SearchResult::new(String::new(), Outcome::NoPath, stats)
}

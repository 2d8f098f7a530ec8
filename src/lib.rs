//! Uniform-cost and A* search over the 8-puzzle, with a strict expanded list
//! and per-call search statistics.

pub mod heuristic;
pub mod puzzle;
pub mod search;
pub mod successors;

pub use heuristic::Heuristic;
pub use puzzle::{Move, Puzzle, PuzzleError};
pub use search::{a_star, solve, uniform_cost, Algorithm, Outcome, SearchResult, SearchStats};

//! Heuristic estimates of the remaining distance to a fixed goal board.
//!
//! Both heuristics are admissible and consistent on the 8-puzzle, so A*
//! keeps returning optimal paths with either one.

use std::fmt;
use std::str::FromStr;

use crate::puzzle::{Puzzle, PuzzleError, CELLS, SIZE};

/// Selectable heuristic for A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Number of non-blank tiles out of place.
    MisplacedTiles,
    /// Sum of row and column distances of every non-blank tile.
    ManhattanDistance,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::MisplacedTiles, Heuristic::ManhattanDistance];
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Heuristic::MisplacedTiles => "misplaced",
            Heuristic::ManhattanDistance => "manhattan",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "misplaced" | "misplacedtiles" | "misplaced-tiles" => Ok(Heuristic::MisplacedTiles),
            "manhattan" | "manhattandistance" | "manhattan-distance" => {
                Ok(Heuristic::ManhattanDistance)
            }
            _ => Err(PuzzleError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Evaluates one heuristic against a goal whose tile positions are
/// computed once, on construction.
#[derive(Debug, Clone)]
pub struct HeuristicEvaluator {
    heuristic: Heuristic,
    goal: [u8; CELLS],
    /// `goal_pos[tile]` is the goal index of `tile`. Slot 9 is never used.
    goal_pos: [usize; CELLS + 1],
}

impl HeuristicEvaluator {
    pub fn new(goal: &Puzzle, heuristic: Heuristic) -> Self {
        let mut goal_pos = [0; CELLS + 1];
        for (i, &tile) in goal.tiles().iter().enumerate() {
            goal_pos[tile as usize] = i;
        }
        Self {
            heuristic,
            goal: *goal.tiles(),
            goal_pos,
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn evaluate(&self, state: &Puzzle) -> u32 {
        match self.heuristic {
            Heuristic::MisplacedTiles => self.misplaced(state),
            Heuristic::ManhattanDistance => self.manhattan(state),
        }
    }

    fn misplaced(&self, state: &Puzzle) -> u32 {
        state
            .tiles()
            .iter()
            .zip(self.goal.iter())
            .filter(|&(&tile, &want)| tile != 0 && tile != want)
            .count() as u32
    }

    fn manhattan(&self, state: &Puzzle) -> u32 {
        let mut sum = 0;
        for (i, &tile) in state.tiles().iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let gi = self.goal_pos[tile as usize];
            sum += (i / SIZE).abs_diff(gi / SIZE) + (i % SIZE).abs_diff(gi % SIZE);
        }
        sum as u32
    }
}

/// One-off misplaced-tiles count. Prefer [`HeuristicEvaluator`] inside loops.
pub fn misplaced_tiles(state: &Puzzle, goal: &Puzzle) -> u32 {
    HeuristicEvaluator::new(goal, Heuristic::MisplacedTiles).evaluate(state)
}

pub fn manhattan_distance(state: &Puzzle, goal: &Puzzle) -> u32 {
    HeuristicEvaluator::new(goal, Heuristic::ManhattanDistance).evaluate(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Puzzle {
        Puzzle::parse(s).unwrap()
    }

    #[test]
    fn zero_at_goal() {
        let goal = Puzzle::goal();
        assert_eq!(misplaced_tiles(&goal, &goal), 0);
        assert_eq!(manhattan_distance(&goal, &goal), 0);
    }

    #[test]
    fn blank_is_ignored() {
        // Only tile 8 and the blank have swapped.
        let state = p("123456708");
        assert_eq!(misplaced_tiles(&state, &Puzzle::goal()), 1);
        assert_eq!(manhattan_distance(&state, &Puzzle::goal()), 1);
    }

    #[test]
    fn known_values() {
        // Textbook example: h1 = 8, h2 = 18 against 012345678.
        let state = p("724506831");
        let goal = p("012345678");
        assert_eq!(misplaced_tiles(&state, &goal), 8);
        assert_eq!(manhattan_distance(&state, &goal), 18);
    }

    #[test]
    fn evaluator_uses_arbitrary_goal() {
        let goal = p("123804765");
        let eval = HeuristicEvaluator::new(&goal, Heuristic::ManhattanDistance);
        assert_eq!(eval.evaluate(&goal), 0);
        assert_eq!(eval.evaluate(&p("123840765")), 1);
    }

    #[test]
    fn names_parse() {
        assert_eq!("manhattan".parse(), Ok(Heuristic::ManhattanDistance));
        assert_eq!("Misplaced".parse(), Ok(Heuristic::MisplacedTiles));
        assert_eq!(
            "euclid".parse::<Heuristic>(),
            Err(PuzzleError::UnknownHeuristic("euclid".to_string()))
        );
        for h in Heuristic::ALL {
            assert_eq!(h.to_string().parse(), Ok(h));
        }
    }
}

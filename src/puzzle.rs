use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("expected 9 tiles, got {0}")]
    InvalidLength(usize),

    #[error("invalid tile character: '{0}'")]
    InvalidTile(char),

    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),

    #[error("invalid move symbol: '{0}'")]
    InvalidMoveSymbol(char),

    #[error("move {0} would leave the board")]
    IllegalMove(Move),

    #[error("unknown heuristic '{0}'")]
    UnknownHeuristic(String),

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}

/// Direction the blank travels. `u` moves the blank one row up, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// Fixed generation order. Exploration tie-breaks depend on it.
    pub const URDL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Move::Up => 'u',
            Move::Right => 'r',
            Move::Down => 'd',
            Move::Left => 'l',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, PuzzleError> {
        match symbol {
            'u' => Ok(Move::Up),
            'r' => Ok(Move::Right),
            'd' => Ok(Move::Down),
            'l' => Ok(Move::Left),
            other => Err(PuzzleError::InvalidMoveSymbol(other)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Right => "Right",
            Move::Down => "Down",
            Move::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// A 3x3 board of tiles `0..=8`, `0` being the blank, stored row-major.
///
/// Equality and hashing go through the tile array, which is the same
/// information as the nine-character serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    board: [u8; CELLS],
    blank: usize,
}

impl Puzzle {
    pub fn goal() -> Self {
        let mut board = [0; CELLS];
        for (i, cell) in board.iter_mut().enumerate().take(CELLS - 1) {
            *cell = i as u8 + 1;
        }
        Self {
            board,
            blank: CELLS - 1,
        }
    }

    /// Reads a board from its nine-character form, e.g. `"123456780"`.
    pub fn parse(s: &str) -> Result<Self, PuzzleError> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != CELLS {
            return Err(PuzzleError::InvalidLength(chars.len()));
        }

        let mut board = [0; CELLS];
        let mut seen = [false; CELLS];
        let mut blank = 0;
        for (i, &ch) in chars.iter().enumerate() {
            let tile = ch
                .to_digit(10)
                .filter(|&d| (d as usize) < CELLS)
                .ok_or(PuzzleError::InvalidTile(ch))? as u8;
            if seen[tile as usize] {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
            board[i] = tile;
            if tile == 0 {
                blank = i;
            }
        }

        Ok(Self { board, blank })
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.board
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn to_state_string(&self) -> String {
        self.board
            .iter()
            .map(|&t| char::from(b'0' + t))
            .collect()
    }

    pub fn can_move_up(&self) -> bool {
        self.blank / SIZE > 0
    }

    pub fn can_move_right(&self) -> bool {
        self.blank % SIZE < SIZE - 1
    }

    pub fn can_move_down(&self) -> bool {
        self.blank / SIZE < SIZE - 1
    }

    pub fn can_move_left(&self) -> bool {
        self.blank % SIZE > 0
    }

    pub fn can_move(&self, movement: Move) -> bool {
        match movement {
            Move::Up => self.can_move_up(),
            Move::Right => self.can_move_right(),
            Move::Down => self.can_move_down(),
            Move::Left => self.can_move_left(),
        }
    }

    pub fn move_up(&self) -> Option<Self> {
        self.try_move(Move::Up)
    }

    pub fn move_right(&self) -> Option<Self> {
        self.try_move(Move::Right)
    }

    pub fn move_down(&self) -> Option<Self> {
        self.try_move(Move::Down)
    }

    pub fn move_left(&self) -> Option<Self> {
        self.try_move(Move::Left)
    }

    /// Returns the board after sliding the blank, leaving `self` untouched.
    pub fn try_move(&self, movement: Move) -> Option<Self> {
        let mut new_puzzle = *self;
        if new_puzzle.apply_move(movement) {
            Some(new_puzzle)
        } else {
            None
        }
    }

    /// Slides the blank in place. Returns `false` if the move leaves the board.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        if !self.can_move(movement) {
            return false;
        }

        let (dr, dc) = movement.as_offset();
        let row = (self.blank / SIZE) as isize + dr;
        let col = (self.blank % SIZE) as isize + dc;
        let target = row as usize * SIZE + col as usize;

        self.board.swap(self.blank, target);
        self.blank = target;
        true
    }

    /// Replays a move string such as `"ulldr"` and returns the final board.
    pub fn apply_path(&self, path: &str) -> Result<Self, PuzzleError> {
        let mut current = *self;
        for symbol in path.chars() {
            let movement = Move::from_symbol(symbol)?;
            if !current.apply_move(movement) {
                return Err(PuzzleError::IllegalMove(movement));
            }
        }
        Ok(current)
    }

    /// Two boards are mutually reachable iff their inversion counts share parity.
    pub fn is_solvable_from(&self, other: &Puzzle) -> bool {
        Self::count_inversions(&self.board) % 2 == Self::count_inversions(&other.board) % 2
    }

    pub fn is_solvable(&self) -> bool {
        self.is_solvable_from(&Self::goal())
    }

    fn count_inversions(flattened: &[u8]) -> usize {
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }

    /// Random permutation with the same parity as the goal.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self::goal().board;
        loop {
            board.shuffle(rng);
            if Self::count_inversions(&board) % 2 == 0 {
                break;
            }
        }

        let blank = board.iter().position(|&t| t == 0).unwrap_or(CELLS - 1);
        Self { board, blank }
    }

    /// Random walk of `steps` legal moves from `self`, never undoing the previous move.
    pub fn scrambled<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Self {
        let mut current = *self;
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let options: Vec<Move> = Move::URDL
                .iter()
                .copied()
                .filter(|&m| current.can_move(m) && Some(m.opposite()) != last)
                .collect();
            if let Some(&m) = options.choose(rng) {
                current.apply_move(m);
                last = Some(m);
            }
        }

        current
    }

    pub fn grid(&self) -> String {
        let mut out = String::new();
        for row in self.board.chunks(SIZE) {
            for &val in row {
                if val == 0 {
                    out.push_str(" . ");
                } else {
                    out.push_str(&format!("{:2} ", val));
                }
            }
            out.push('\n');
        }
        out
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_state_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parse_round_trips_serialization() {
        let p = Puzzle::parse("281463075").unwrap();
        assert_eq!(p.to_state_string(), "281463075");
        assert_eq!(p.blank_index(), 6);
        assert_eq!(Puzzle::goal().to_string(), "123456780");
    }

    #[test]
    fn parse_rejects_malformed_boards() {
        assert_eq!(Puzzle::parse("12345678"), Err(PuzzleError::InvalidLength(8)));
        assert_eq!(Puzzle::parse("12345678a"), Err(PuzzleError::InvalidTile('a')));
        assert_eq!(Puzzle::parse("123456789"), Err(PuzzleError::InvalidTile('9')));
        assert_eq!(Puzzle::parse("123456711"), Err(PuzzleError::DuplicateTile(1)));
    }

    #[test]
    fn boundary_predicates_follow_blank_position() {
        let corner = Puzzle::goal();
        assert!(corner.can_move_up());
        assert!(corner.can_move_left());
        assert!(!corner.can_move_down());
        assert!(!corner.can_move_right());

        let center = Puzzle::parse("123405678").unwrap();
        assert!(Move::URDL.iter().all(|&m| center.can_move(m)));

        let top_left = Puzzle::parse("012345678").unwrap();
        assert!(!top_left.can_move_up());
        assert!(!top_left.can_move_left());
        assert!(top_left.can_move_right());
        assert!(top_left.can_move_down());
    }

    #[test]
    fn moves_do_not_mutate_receiver() {
        let p = Puzzle::goal();
        let left = p.move_left().unwrap();
        assert_eq!(left.to_string(), "123456708");
        assert_eq!(p.to_string(), "123456780");
        assert_eq!(p.move_up().unwrap().to_string(), "123450786");
        assert!(p.move_down().is_none());
        assert!(p.move_right().is_none());
    }

    #[test]
    fn apply_path_replays_and_rejects() {
        let p = Puzzle::goal();
        assert_eq!(p.apply_path("lu").unwrap().to_string(), "123406758");
        assert_eq!(p.apply_path("r"), Err(PuzzleError::IllegalMove(Move::Right)));
        assert_eq!(p.apply_path("x"), Err(PuzzleError::InvalidMoveSymbol('x')));
    }

    #[test]
    fn opposite_moves_cancel() {
        let p = Puzzle::parse("123405678").unwrap();
        for m in Move::URDL {
            let back = p.try_move(m).unwrap().try_move(m.opposite()).unwrap();
            assert_eq!(back, p);
            assert_eq!(Move::from_symbol(m.symbol()).unwrap(), m);
        }
    }

    #[test]
    fn solvability_tracks_inversion_parity() {
        assert!(Puzzle::goal().is_solvable());
        assert!(!Puzzle::parse("213456780").unwrap().is_solvable());
        assert!(Puzzle::parse("123456708").unwrap().is_solvable());
    }

    #[test]
    fn random_boards_stay_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(Puzzle::shuffled(&mut rng).is_solvable());
            assert!(Puzzle::goal().scrambled(30, &mut rng).is_solvable());
        }
    }
}

use crate::puzzle::{Move, Puzzle};

/// Neighbouring boards of `current`, in up, right, down, left order.
///
/// Each direction is gated by its own boundary predicate, so a corner blank
/// yields two successors, an edge blank three and the centre four.
pub fn successors(current: &Puzzle) -> Vec<(Puzzle, Move)> {
    let mut res = Vec::with_capacity(4);

    if current.can_move_up() {
        if let Some(child) = current.move_up() {
            res.push((child, Move::Up));
        }
    }

    if current.can_move_right() {
        if let Some(child) = current.move_right() {
            res.push((child, Move::Right));
        }
    }

    if current.can_move_down() {
        if let Some(child) = current.move_down() {
            res.push((child, Move::Down));
        }
    }

    if current.can_move_left() {
        if let Some(child) = current.move_left() {
            res.push((child, Move::Left));
        }
    }

    res
}

/// True when `b` undoes `a`.
#[inline]
pub fn is_inverse(a: Move, b: Move) -> bool {
    a.opposite() == b
}

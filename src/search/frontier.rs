//! Open structure with lazy deletion.
//!
//! Nodes live in an arena keyed by a monotonically increasing [`NodeId`].
//! The heap and the open index only hold ids. A node superseded by a cheaper
//! path is flagged dead and stays in the heap until it is popped.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[cfg(test)]
use fnv::FnvHashSet;
use fnv::FnvHashMap;

use crate::puzzle::{Move, Puzzle};

pub(crate) type NodeId = u64;

/// A candidate path to `state`.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub state: Puzzle,
    pub path: String,
    pub g: u32,
    pub h: u32,
    pub f: u32,
    pub alive: bool,
}

impl SearchNode {
    pub fn new(state: Puzzle, path: String, g: u32, h: u32) -> Self {
        Self {
            state,
            path,
            g,
            h,
            f: g + h,
            alive: true,
        }
    }

    pub fn child(&self, state: Puzzle, movement: Move, h: u32) -> Self {
        let mut path = String::with_capacity(self.path.len() + 1);
        path.push_str(&self.path);
        path.push(movement.symbol());
        Self::new(state, path, self.g + 1, h)
    }

    /// The move that produced this node, `None` for the start node.
    pub fn last_move(&self) -> Option<Move> {
        self.path
            .chars()
            .next_back()
            .and_then(|symbol| Move::from_symbol(symbol).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueueOrder {
    /// Smallest g first.
    PathCost,
    /// Smallest f first, larger g on ties.
    Estimate,
}

/// Heap ordering key. Compared ascending; the heap wraps it in `Reverse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierKey {
    primary: u32,
    deeper_first: Reverse<u32>,
    id: NodeId,
}

impl FrontierKey {
    fn new(order: QueueOrder, node: &SearchNode, id: NodeId) -> Self {
        match order {
            QueueOrder::PathCost => Self {
                primary: node.g,
                deeper_first: Reverse(0),
                id,
            },
            QueueOrder::Estimate => Self {
                primary: node.f,
                deeper_first: Reverse(node.g),
                id,
            },
        }
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    // Insertion id is the last tie-break so pops are deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then(self.deeper_first.cmp(&other.deeper_first))
            .then(self.id.cmp(&other.id))
    }
}

#[derive(Debug)]
pub(crate) struct Frontier {
    order: QueueOrder,
    heap: BinaryHeap<Reverse<FrontierKey>>,
    arena: FnvHashMap<NodeId, SearchNode>,
    open: FnvHashMap<Puzzle, NodeId>,
    next_id: NodeId,
    high_water: usize,
    #[cfg(test)]
    pushed: FnvHashSet<Puzzle>,
}

impl Frontier {
    pub fn new(order: QueueOrder) -> Self {
        Self {
            order,
            heap: BinaryHeap::new(),
            arena: FnvHashMap::default(),
            open: FnvHashMap::default(),
            next_id: 0,
            high_water: 0,
            #[cfg(test)]
            pushed: FnvHashSet::default(),
        }
    }

    /// Inserts `node` and makes it the open entry for its state.
    pub fn push(&mut self, node: SearchNode) {
        let id = self.next_id;
        self.next_id += 1;

        #[cfg(test)]
        self.pushed.insert(node.state);

        self.heap.push(Reverse(FrontierKey::new(self.order, &node, id)));
        self.open.insert(node.state, id);
        self.arena.insert(id, node);

        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Removes the best entry, dead or alive. The caller decides what a
    /// dead node means.
    pub fn pop(&mut self) -> Option<SearchNode> {
        while let Some(Reverse(key)) = self.heap.pop() {
            let Some(node) = self.arena.remove(&key.id) else {
                continue;
            };
            if self.open.get(&node.state) == Some(&key.id) {
                self.open.remove(&node.state);
            }
            return Some(node);
        }
        None
    }

    pub fn open_node(&self, state: &Puzzle) -> Option<&SearchNode> {
        self.open
            .get(state)
            .and_then(|id| self.arena.get(id))
            .filter(|node| node.alive)
    }

    /// Tombstones the open node for `state`. It stays in the heap until popped.
    pub fn supersede(&mut self, state: &Puzzle) {
        if let Some(id) = self.open.remove(state) {
            if let Some(node) = self.arena.get_mut(&id) {
                node.alive = false;
            }
        }
    }

    /// Physical heap size, tombstones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Distinct states ever pushed, dead entries included.
    #[cfg(test)]
    pub fn distinct_pushed(&self) -> usize {
        self.pushed.len()
    }
}

/// Finalized states and the g they were committed at.
#[derive(Debug, Default)]
pub(crate) struct ClosedSet {
    best_g: FnvHashMap<Puzzle, u32>,
}

impl ClosedSet {
    pub fn get(&self, state: &Puzzle) -> Option<u32> {
        self.best_g.get(state).copied()
    }

    /// Records `state` at `g` unless it is already closed at an equal or better g.
    pub fn commit(&mut self, state: Puzzle, g: u32) {
        match self.best_g.get(&state) {
            Some(&closed_g) if closed_g <= g => {}
            _ => {
                self.best_g.insert(state, g);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.best_g.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Puzzle {
        Puzzle::parse(s).unwrap()
    }

    fn node(s: &str, path: &str, h: u32) -> SearchNode {
        SearchNode::new(p(s), path.to_string(), path.len() as u32, h)
    }

    #[test]
    fn path_cost_pops_smallest_g_then_oldest() {
        let mut f = Frontier::new(QueueOrder::PathCost);
        f.push(node("123456780", "ll", 0));
        f.push(node("123456708", "l", 0));
        f.push(node("123450786", "u", 0));

        assert_eq!(f.pop().unwrap().path, "l");
        assert_eq!(f.pop().unwrap().path, "u");
        assert_eq!(f.pop().unwrap().path, "ll");
        assert!(f.pop().is_none());
        assert_eq!(f.high_water(), 3);
        assert_eq!(f.distinct_pushed(), 3);
    }

    #[test]
    fn estimate_prefers_deeper_node_on_equal_f() {
        let mut f = Frontier::new(QueueOrder::Estimate);
        f.push(node("123456780", "u", 3));
        f.push(node("123456708", "ulr", 1));
        f.push(node("123450786", "", 5));

        let first = f.pop().unwrap();
        assert_eq!(first.path, "ulr");
        assert_eq!(f.pop().unwrap().path, "u");
    }

    #[test]
    fn superseded_node_is_popped_dead() {
        let mut f = Frontier::new(QueueOrder::PathCost);
        let state = p("123456708");
        f.push(node("123456708", "ulll", 0));
        assert_eq!(f.open_node(&state).map(|n| n.g), Some(4));

        f.supersede(&state);
        assert!(f.open_node(&state).is_none());
        f.push(node("123456708", "l", 0));
        assert_eq!(f.open_node(&state).map(|n| n.g), Some(1));
        assert_eq!(f.len(), 2);

        let live = f.pop().unwrap();
        assert!(live.alive);
        assert!(f.open_node(&state).is_none());

        let dead = f.pop().unwrap();
        assert!(!dead.alive);
        assert!(f.is_empty());
    }

    #[test]
    fn closed_keeps_best_g() {
        let mut closed = ClosedSet::default();
        let state = p("123456780");
        closed.commit(state, 5);
        closed.commit(state, 7);
        assert_eq!(closed.get(&state), Some(5));
        closed.commit(state, 2);
        assert_eq!(closed.get(&state), Some(2));
        assert_eq!(closed.len(), 1);
    }

    #[test]
    fn child_extends_path() {
        let root = SearchNode::new(Puzzle::goal(), String::new(), 0, 2);
        assert_eq!(root.last_move(), None);
        assert_eq!(root.f, 2);

        let next = Puzzle::goal().move_left().unwrap();
        let child = root.child(next, Move::Left, 1);
        assert_eq!(child.path, "l");
        assert_eq!((child.g, child.h, child.f), (1, 1, 2));
        assert_eq!(child.last_move(), Some(Move::Left));
    }
}

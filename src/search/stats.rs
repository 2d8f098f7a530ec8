use std::fmt;
use std::time::Duration;

/// Counters gathered during one search call.
///
/// These characterize how much work a search did. They play no part in
/// deciding what it returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub path_length: usize,
    pub state_expansions: usize,
    pub max_queue_length: usize,
    pub running_time: Duration,
    /// Tombstoned entries discarded on pop.
    pub deletions_from_middle_of_heap: usize,
    pub local_loops_avoided: usize,
    /// Successors dropped because an open or closed entry was at least as good.
    pub attempted_reexpansions: usize,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_expansion(&mut self) {
        self.state_expansions += 1;
    }

    pub(crate) fn add_dead_pop(&mut self) {
        self.deletions_from_middle_of_heap += 1;
    }

    pub(crate) fn add_local_loop(&mut self) {
        self.local_loops_avoided += 1;
    }

    pub(crate) fn add_reexpansion_attempt(&mut self) {
        self.attempted_reexpansions += 1;
    }

    pub(crate) fn observe_queue(&mut self, len: usize) {
        self.max_queue_length = self.max_queue_length.max(len);
    }

    pub fn running_time_secs(&self) -> f64 {
        self.running_time.as_secs_f64()
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "path length:            {}", self.path_length)?;
        writeln!(f, "state expansions:       {}", self.state_expansions)?;
        writeln!(f, "max queue length:       {}", self.max_queue_length)?;
        writeln!(f, "running time:           {:.6}s", self.running_time_secs())?;
        writeln!(f, "mid-heap deletions:     {}", self.deletions_from_middle_of_heap)?;
        writeln!(f, "local loops avoided:    {}", self.local_loops_avoided)?;
        write!(f, "re-expansion attempts:  {}", self.attempted_reexpansions)
    }
}

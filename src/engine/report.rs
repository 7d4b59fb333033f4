use core::fmt;

use log::warn;

use crate::roster::*;

use super::seating::Seating;

#[derive(Clone, Debug, Default)]
pub struct PlacementStats {
    pub groups_placed: usize,
    pub affinity_placements: usize,
    pub rescue_retries: usize,
    pub eviction_swaps: usize,
    pub last_resorts: usize,
}

/// The outcome of a placement run. Tables come back in input order with
/// locked occupants untouched; `unplaced` is non-empty only when total
/// capacity falls short of the roster.
#[derive(Clone)]
pub struct Placement {
    tables: Vec<Table>,
    unplaced: Vec<StudentId>,
    degraded: bool,
    pub stats: PlacementStats,
}

impl Placement {
    pub fn tables(&self) -> &Vec<Table> {
        &self.tables
    }

    pub fn unplaced(&self) -> &[StudentId] {
        &self.unplaced
    }

    /// True when the rescue pass ran: some constraint had to be worked
    /// around (or given up on) to seat everyone.
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    pub fn into_tables(self) -> Vec<Table> {
        self.tables
    }
}

/// Final summary step: hands the mutated tables back and raises the
/// warning-level signals the caller surfaces to the user.
pub(crate) fn summarize(
    seating: Seating,
    unplaced: Vec<StudentId>,
    degraded: bool,
    stats: PlacementStats,
) -> Placement {
    if degraded {
        warn!(
            "placement degraded: rescue pass was required ({} retries, {} swaps)",
            stats.rescue_retries, stats.eviction_swaps
        );
    }
    if stats.last_resorts > 0 {
        warn!(
            "{} students were seated over their constraints as a last resort",
            stats.last_resorts
        );
    }
    if !unplaced.is_empty() {
        warn!("{} students could not be seated at all", unplaced.len());
    }

    Placement {
        tables: seating.into_tables(),
        unplaced,
        degraded,
        stats,
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ix, table) in self.tables.iter().enumerate() {
            if ix > 0 {
                write!(f, ", ")?;
            }
            write!(f, "t{}={:?}", ix, table)?;
        }
        if !self.unplaced.is_empty() {
            write!(f, "; unplaced={:?}", self.unplaced)?;
        }
        if self.degraded {
            write!(f, "; degraded")?;
        }
        write!(f, "; stats={:?}", self.stats)?;
        Ok(())
    }
}

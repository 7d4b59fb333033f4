use core::fmt;

use fnv::FnvHashMap;

use crate::roster::*;

/// Live occupancy during a placement run. Should be the source of truth for
/// who sits where; the `seat_of` map is kept in lockstep with the tables.
///
/// Cloning a `Seating` is how the rescue pass takes a snapshot.
#[derive(Clone)]
pub(crate) struct Seating {
    tables: Vec<Table>,
    seat_of: FnvHashMap<StudentId, usize>,
}

impl Seating {
    /// Takes over the caller's tables, dropping every non-locked occupant.
    /// Locked occupants stay where they are for the whole run.
    pub(crate) fn new(mut tables: Vec<Table>) -> Seating {
        for table in tables.iter_mut() {
            table.clear_unlocked();
        }

        let mut seat_of = FnvHashMap::default();
        for (ix, table) in tables.iter().enumerate() {
            for occupant in table.occupants() {
                seat_of.insert(occupant.student.id, ix);
            }
        }

        Seating { tables, seat_of }
    }

    pub(crate) fn len(&self) -> usize {
        self.tables.len()
    }

    pub(crate) fn table(&self, ix: usize) -> &Table {
        &self.tables[ix]
    }

    pub(crate) fn tables(&self) -> &Vec<Table> {
        &self.tables
    }

    /// The table a student is currently seated at, if any.
    pub(crate) fn table_of(&self, id: StudentId) -> Option<usize> {
        self.seat_of.get(&id).copied()
    }

    pub(crate) fn place(&mut self, ix: usize, student: Student) {
        self.require_placeable(ix, &student);

        self.seat_of.insert(student.id, ix);
        self.tables[ix].seat(student, false);
    }

    /// Removes the occupant at `occupant_ix` of table `table_ix`. Callers
    /// must not evict locked occupants.
    pub(crate) fn evict(&mut self, table_ix: usize, occupant_ix: usize) -> Occupant {
        let occupant = self.tables[table_ix].remove(occupant_ix);
        debug_assert!(!occupant.locked, "evicted a locked occupant");
        self.seat_of.remove(&occupant.student.id);
        occupant
    }

    pub(crate) fn into_tables(self) -> Vec<Table> {
        self.tables
    }

    #[cfg(debug_assertions)]
    fn require_placeable(&self, ix: usize, student: &Student) {
        if self.tables[ix].remaining_space() == 0 {
            panic!("table {} is full", ix);
        }
        if let Some(at) = self.table_of(student.id) {
            panic!("{:?} already seated at table {}", student, at);
        }
    }

    #[cfg(not(debug_assertions))]
    fn require_placeable(&self, _ix: usize, _student: &Student) {}
}

impl fmt::Debug for Seating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Seating {{ tables={:?} }}", self.tables)
    }
}

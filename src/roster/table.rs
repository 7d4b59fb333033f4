use core::fmt;

use super::{Student, StudentId};

/// A seated student. Locked occupants are manual placements the engine must
/// keep in place across a run.
#[derive(Clone, PartialEq, Eq)]
pub struct Occupant {
    pub student: Student,
    pub locked: bool,
}

impl fmt::Debug for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.locked {
            write!(f, "{:?}*", self.student)
        } else {
            write!(f, "{:?}", self.student)
        }
    }
}

/// A seating group with fixed capacity. `occupants.len() <= capacity` holds
/// whenever the engine hands a table back.
#[derive(Clone, PartialEq, Eq)]
pub struct Table {
    capacity: usize,
    occupants: Vec<Occupant>,
}

impl Table {
    pub fn new(capacity: usize) -> Table {
        Table {
            capacity,
            occupants: vec![],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn occupants(&self) -> &Vec<Occupant> {
        &self.occupants
    }

    pub fn remaining_space(&self) -> usize {
        self.capacity - self.occupants.len()
    }

    pub fn holds(&self, id: StudentId) -> bool {
        self.occupants.iter().any(|o| o.student.id == id)
    }

    pub(crate) fn seat(&mut self, student: Student, locked: bool) {
        self.occupants.push(Occupant { student, locked });
    }

    pub(crate) fn remove(&mut self, ix: usize) -> Occupant {
        self.occupants.remove(ix)
    }

    /// Drops every occupant that is not locked. Run before each placement.
    pub(crate) fn clear_unlocked(&mut self) {
        self.occupants.retain(|o| o.locked);
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut fst = true;
        write!(f, "[{}/{}: ", self.occupants.len(), self.capacity)?;
        for occupant in &self.occupants {
            if !fst {
                write!(f, ", ")?;
            }
            fst = false;
            write!(f, "{:?}", occupant)?;
        }
        write!(f, "]")
    }
}

use core::fmt;

use fnv::FnvHashMap;
use lazy_static::lazy_static;

use crate::roster::*;

use super::seating::Seating;

lazy_static! {
    static ref NO_PARTNERS: Vec<StudentId> = vec![];
}

/// Per-student view of the constraint set. Built once per run; every query is
/// answered against the live occupancy passed in, so results stay correct as
/// students are seated and evicted between calls.
#[derive(Clone)]
pub(crate) struct ConstraintIndex {
    // Mapping from student to the students they must not sit with
    separate: FnvHashMap<StudentId, Vec<StudentId>>,
    // Mapping from student to their direct (not transitive) together partners
    together: FnvHashMap<StudentId, Vec<StudentId>>,
}

impl ConstraintIndex {
    pub(crate) fn new(constraints: &[Constraint]) -> ConstraintIndex {
        let mut idx = ConstraintIndex {
            separate: FnvHashMap::default(),
            together: FnvHashMap::default(),
        };

        for constraint in constraints {
            let (a, b) = constraint.pair();
            let map = match constraint.kind() {
                ConstraintKind::Separate => &mut idx.separate,
                ConstraintKind::Together => &mut idx.together,
            };
            Self::link(map, a, b);
            Self::link(map, b, a);
        }

        idx
    }

    fn link(map: &mut FnvHashMap<StudentId, Vec<StudentId>>, from: StudentId, to: StudentId) {
        let partners = map.entry(from).or_insert(vec![]);
        // Duplicate constraints are harmless; keep one edge per pair
        if !partners.contains(&to) {
            partners.push(to);
        }
    }

    /// Direct together partners, in constraint-list order.
    pub(crate) fn together_partners(&self, id: StudentId) -> &[StudentId] {
        self.together.get(&id).unwrap_or(&NO_PARTNERS)
    }

    /// True iff any occupant of `table` must be separated from `id`.
    pub(crate) fn violates_separation(&self, id: StudentId, table: &Table) -> bool {
        match self.separate.get(&id) {
            None => false,
            Some(partners) => partners.iter().any(|&p| table.holds(p)),
        }
    }

    /// The full placement check: no separation conflict at the candidate
    /// table, and every together partner that is already seated somewhere is
    /// seated at that same table. Partners not yet seated never veto.
    pub(crate) fn is_placement_valid(
        &self,
        id: StudentId,
        table_ix: usize,
        seating: &Seating,
    ) -> bool {
        if self.violates_separation(id, seating.table(table_ix)) {
            return false;
        }

        for &partner in self.together_partners(id) {
            match seating.table_of(partner) {
                Some(at) if at != table_ix => return false,
                _ => {}
            }
        }

        true
    }
}

impl fmt::Debug for ConstraintIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ConstraintIndex {{ separate: {:?}, together: {:?} }}",
            self.separate.len(),
            self.together.len()
        )
    }
}

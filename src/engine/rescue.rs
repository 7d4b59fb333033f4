use log::trace;

use crate::roster::*;

use super::constraint_index::ConstraintIndex;
use super::seating::Seating;

/// An accepted eviction swap: the new seating plus what moved where, for the
/// caller's log line.
pub(crate) struct EvictionSwap {
    pub(crate) seating: Seating,
    pub(crate) evicted: StudentId,
    pub(crate) freed_table: usize,
    pub(crate) new_table: usize,
}

/// Tries to free a seat for `student` by moving one current occupant to
/// another table.
///
/// Every candidate is evaluated on a snapshot and committed only when the
/// whole swap works out: the occupant is not locked, has no together partner
/// left at their table, the target student passes the placement check at the
/// lighter table, and the evicted occupant re-seats legally somewhere else
/// (first fit). Failed candidates leave the input untouched.
pub(crate) fn try_eviction_swap(
    seating: &Seating,
    index: &ConstraintIndex,
    student: &Student,
) -> Option<EvictionSwap> {
    for table_ix in 0..seating.len() {
        let table = seating.table(table_ix);

        for occupant_ix in 0..table.occupants().len() {
            let occupant = &table.occupants()[occupant_ix];
            if occupant.locked {
                continue;
            }
            // A together partner at the same table protects the occupant,
            // locked or not
            if has_partner_at_table(index, occupant.student.id, occupant_ix, table) {
                continue;
            }

            let mut attempt = seating.clone();
            let evicted = attempt.evict(table_ix, occupant_ix);

            if !index.is_placement_valid(student.id, table_ix, &attempt) {
                trace!(
                    "swap rejected: {:?} still invalid at table {} without {:?}",
                    student,
                    table_ix,
                    evicted.student
                );
                continue;
            }

            if let Some(new_table) = reseat(&attempt, index, evicted.student.id, table_ix) {
                let evicted_id = evicted.student.id;
                attempt.place(new_table, evicted.student);
                attempt.place(table_ix, student.clone());
                return Some(EvictionSwap {
                    seating: attempt,
                    evicted: evicted_id,
                    freed_table: table_ix,
                    new_table,
                });
            }
        }
    }

    None
}

fn has_partner_at_table(
    index: &ConstraintIndex,
    id: StudentId,
    own_ix: usize,
    table: &Table,
) -> bool {
    table
        .occupants()
        .iter()
        .enumerate()
        .filter(|&(ix, _)| ix != own_ix)
        .any(|(_, o)| index.together_partners(id).contains(&o.student.id))
}

// First other table with space where the evicted occupant is valid
fn reseat(
    seating: &Seating,
    index: &ConstraintIndex,
    id: StudentId,
    freed_table: usize,
) -> Option<usize> {
    (0..seating.len())
        .filter(|&ix| ix != freed_table)
        .find(|&ix| {
            seating.table(ix).remaining_space() > 0 && index.is_placement_valid(id, ix, seating)
        })
}

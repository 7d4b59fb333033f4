use fnv::{FnvHashMap, FnvHashSet};
use log::{trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::roster::*;

use super::constraint_index::ConstraintIndex;
use super::groups::{build_groups, TogetherGroup};
use super::report::{self, Placement, PlacementStats};
use super::rescue::try_eviction_swap;
use super::seating::Seating;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlacementError {
    #[error("a placement run needs at least one student")]
    NoStudents,
    #[error("a placement run needs at least one table")]
    NoTables,
    #[error("table {0} has zero capacity")]
    ZeroCapacity(usize),
    #[error("table index {0} does not exist")]
    UnknownTable(usize),
    #[error("table {0} has no free seat left to pre-assign")]
    TableFull(usize),
    #[error("student {0:?} is not registered")]
    UnknownStudent(StudentId),
}

type Result<T> = std::result::Result<T, PlacementError>;

/// One placement run: a roster, the tables (with any locked occupants still
/// seated), and the pairwise constraints. The planner never mutates its
/// inputs; each `place` call works on its own copy of the tables, so
/// independent runs can reuse the same planner.
#[derive(Clone)]
pub struct Planner {
    students: Vec<Student>,
    tables: Vec<Table>,
    constraints: Vec<Constraint>,
}

impl Planner {
    pub fn new(students: Vec<Student>, tables: Vec<Table>, constraints: Vec<Constraint>) -> Planner {
        Planner {
            students,
            tables,
            constraints,
        }
    }

    pub fn students(&self) -> &Vec<Student> {
        &self.students
    }

    pub fn tables(&self) -> &Vec<Table> {
        &self.tables
    }

    /// Runs the three placement phases with a fresh thread rng. Seat choice
    /// among equally valid tables is intentionally random; constraint
    /// satisfaction is not.
    pub fn place(&self) -> Result<Placement> {
        self.place_with_rng(&mut rand::rng())
    }

    /// As `place`, but with a caller-supplied rng so runs can be reproduced.
    pub fn place_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Placement> {
        self.validate()?;

        let index = ConstraintIndex::new(&self.constraints);
        let groups = build_groups(&self.constraints);
        let by_id: FnvHashMap<StudentId, &Student> =
            self.students.iter().map(|s| (s.id, s)).collect();

        let mut seating = Seating::new(self.tables.clone());
        let mut stats = PlacementStats::default();

        // Locked occupants count as placed from the start
        let mut placed: FnvHashSet<StudentId> = FnvHashSet::default();
        for table in seating.tables() {
            for occupant in table.occupants() {
                placed.insert(occupant.student.id);
            }
        }

        self.place_groups(&groups, &by_id, &index, &mut seating, &mut placed, &mut stats);
        self.place_individuals(&groups, &index, &mut seating, &mut placed, &mut stats, rng);
        let degraded = self.rescue(&index, &mut seating, &mut placed, &mut stats);

        let unplaced = self
            .students
            .iter()
            .filter(|s| !placed.contains(&s.id))
            .map(|s| s.id)
            .collect();

        Ok(report::summarize(seating, unplaced, degraded, stats))
    }

    fn validate(&self) -> Result<()> {
        if self.students.is_empty() {
            return Err(PlacementError::NoStudents);
        }
        if self.tables.is_empty() {
            return Err(PlacementError::NoTables);
        }
        for (ix, table) in self.tables.iter().enumerate() {
            if table.capacity() == 0 {
                return Err(PlacementError::ZeroCapacity(ix));
            }
        }
        Ok(())
    }

    /// Phase 1: each together group goes, whole, to the first table that can
    /// hold every unplaced member. Validity is checked per member against the
    /// table's current occupancy, never against hypothetical co-members, so a
    /// group is admitted or skipped as a unit. Groups that fit nowhere are
    /// left for phase 2 to try member by member.
    fn place_groups(
        &self,
        groups: &[TogetherGroup],
        by_id: &FnvHashMap<StudentId, &Student>,
        index: &ConstraintIndex,
        seating: &mut Seating,
        placed: &mut FnvHashSet<StudentId>,
        stats: &mut PlacementStats,
    ) {
        for group in groups {
            let members: Vec<&Student> = group
                .members()
                .iter()
                .filter(|&id| !placed.contains(id))
                .filter_map(|id| by_id.get(id).copied())
                .collect();
            if members.is_empty() {
                continue;
            }

            for table_ix in 0..seating.len() {
                if seating.table(table_ix).remaining_space() < members.len() {
                    continue;
                }
                if !members
                    .iter()
                    .all(|m| index.is_placement_valid(m.id, table_ix, seating))
                {
                    continue;
                }

                trace!("group {:?} -> table {}", group, table_ix);
                for member in &members {
                    seating.place(table_ix, (*member).clone());
                    placed.insert(member.id);
                }
                stats.groups_placed += 1;
                break;
            }
        }
    }

    /// Phase 2: remaining students, in uniformly shuffled order. Tables
    /// already holding one of the student's together partners are tried
    /// first (partners in group order, tables in table order), then the
    /// first valid table with space.
    fn place_individuals<R: Rng + ?Sized>(
        &self,
        groups: &[TogetherGroup],
        index: &ConstraintIndex,
        seating: &mut Seating,
        placed: &mut FnvHashSet<StudentId>,
        stats: &mut PlacementStats,
        rng: &mut R,
    ) {
        let mut unplaced: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| !placed.contains(&s.id))
            .collect();
        unplaced.shuffle(rng);

        for student in unplaced {
            let group = groups.iter().find(|g| g.contains(student.id));

            let mut seated = false;
            if let Some(group) = group {
                for &member in group.members() {
                    if member == student.id {
                        continue;
                    }
                    if let Some(table_ix) = seating.table_of(member) {
                        if seating.table(table_ix).remaining_space() > 0
                            && index.is_placement_valid(student.id, table_ix, seating)
                        {
                            trace!("{:?} -> table {} (with {:?})", student, table_ix, member);
                            seating.place(table_ix, student.clone());
                            placed.insert(student.id);
                            stats.affinity_placements += 1;
                            seated = true;
                            break;
                        }
                    }
                }
            }

            if !seated {
                if let Some(table_ix) = self.first_valid_table(index, seating, student.id) {
                    trace!("{:?} -> table {}", student, table_ix);
                    seating.place(table_ix, student.clone());
                    placed.insert(student.id);
                }
            }
        }
    }

    /// Phase 3: the degradation ladder for anyone left over, in roster
    /// order. Direct retry, then an eviction swap, then any table with a
    /// free seat regardless of constraints. Capacity stays hard; constraint
    /// satisfaction is the part that gives.
    fn rescue(
        &self,
        index: &ConstraintIndex,
        seating: &mut Seating,
        placed: &mut FnvHashSet<StudentId>,
        stats: &mut PlacementStats,
    ) -> bool {
        let still_unplaced: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| !placed.contains(&s.id))
            .collect();
        if still_unplaced.is_empty() {
            return false;
        }

        warn!(
            "{} students could not be placed within constraints, attempting rescue",
            still_unplaced.len()
        );

        for student in still_unplaced {
            if let Some(table_ix) = self.first_valid_table(index, seating, student.id) {
                warn!("rescued {}: seat freed up at table {}", student.name, table_ix);
                seating.place(table_ix, student.clone());
                placed.insert(student.id);
                stats.rescue_retries += 1;
                continue;
            }

            if let Some(swap) = try_eviction_swap(seating, index, student) {
                warn!(
                    "rescued {}: moved {:?} from table {} to table {}",
                    student.name, swap.evicted, swap.freed_table, swap.new_table
                );
                *seating = swap.seating;
                placed.insert(student.id);
                stats.eviction_swaps += 1;
                continue;
            }

            if let Some(table_ix) = (0..seating.len())
                .find(|&ix| seating.table(ix).remaining_space() > 0)
            {
                warn!(
                    "rescued {}: seated at table {} over constraints as a last resort",
                    student.name, table_ix
                );
                seating.place(table_ix, student.clone());
                placed.insert(student.id);
                stats.last_resorts += 1;
            }
            // No seat anywhere: reported unplaced by the summary
        }

        true
    }

    // First table in table order with space where the student passes the
    // placement check
    fn first_valid_table(
        &self,
        index: &ConstraintIndex,
        seating: &Seating,
        id: StudentId,
    ) -> Option<usize> {
        (0..seating.len()).find(|&ix| {
            seating.table(ix).remaining_space() > 0 && index.is_placement_valid(id, ix, seating)
        })
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::plan_builder::PlanBuilder;
    use crate::roster::*;

    fn roster(count: u32) -> Vec<Student> {
        (0..count)
            .map(|ix| Student::new(StudentId(ix), &format!("s{}", ix)))
            .collect()
    }

    fn table_of(placement: &Placement, id: StudentId) -> Option<usize> {
        placement.tables().iter().position(|t| t.holds(id))
    }

    fn assert_capacity_invariant(placement: &Placement) {
        for table in placement.tables() {
            assert!(table.occupants().len() <= table.capacity());
        }
    }

    #[test]
    fn test_input_validation() {
        let planner = Planner::new(vec![], vec![Table::new(2)], vec![]);
        assert_eq!(planner.place().unwrap_err(), PlacementError::NoStudents);

        let planner = Planner::new(roster(2), vec![], vec![]);
        assert_eq!(planner.place().unwrap_err(), PlacementError::NoTables);

        let planner = Planner::new(roster(2), vec![Table::new(2), Table::new(0)], vec![]);
        assert_eq!(planner.place().unwrap_err(), PlacementError::ZeroCapacity(1));
    }

    // Scenario: one table, four seats, four students, no constraints
    #[test]
    fn test_everyone_fits_at_one_table() {
        let planner = Planner::new(roster(4), vec![Table::new(4)], vec![]);
        let placement = planner.place().unwrap();

        assert_eq!(placement.tables()[0].occupants().len(), 4);
        assert!(placement.unplaced().is_empty());
        assert!(!placement.degraded());
        assert_capacity_invariant(&placement);
    }

    // Scenario: two tables of two, Together(A, B) keeps the pair joint
    #[test]
    fn test_together_pair_shares_a_table() {
        let a = StudentId(0);
        let b = StudentId(1);
        let planner = Planner::new(
            roster(4),
            vec![Table::new(2), Table::new(2)],
            vec![Constraint::together(a, b)],
        );

        for seed in 0..20 {
            let placement = planner
                .place_with_rng(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(placement.unplaced().is_empty());
            assert!(!placement.degraded());
            assert_eq!(table_of(&placement, a), table_of(&placement, b));
            assert_capacity_invariant(&placement);
        }
    }

    // Scenario: three students, two seats; one student stays unplaced
    #[test]
    fn test_oversubscription_reports_unplaced() {
        let planner = Planner::new(roster(3), vec![Table::new(2)], vec![]);
        let placement = planner.place().unwrap();

        assert_eq!(placement.unplaced().len(), 1);
        assert!(placement.degraded());
        assert_eq!(placement.tables()[0].occupants().len(), 2);
        assert_capacity_invariant(&placement);
    }

    // Scenario: Separate(A, B) across two single-seat tables, no degradation
    #[test]
    fn test_separate_pair_splits_cleanly() {
        let a = StudentId(0);
        let b = StudentId(1);
        let planner = Planner::new(
            roster(2),
            vec![Table::new(1), Table::new(1)],
            vec![Constraint::separate(a, b)],
        );

        for seed in 0..20 {
            let placement = planner
                .place_with_rng(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(placement.unplaced().is_empty());
            assert!(!placement.degraded());
            assert_ne!(table_of(&placement, a), table_of(&placement, b));
        }
    }

    // Scenario: a locked occupant eats one of the two seats
    #[test]
    fn test_locked_occupant_is_preserved() {
        let mut builder = PlanBuilder::new();
        let table = builder.table(2);
        let locked = builder.student("locked");
        builder.student("a");
        builder.student("b");
        builder.preseat(table, locked, true).unwrap();

        let placement = builder.build().unwrap().place().unwrap();
        let occupants = placement.tables()[0].occupants();

        assert!(occupants[0].locked);
        assert_eq!(occupants[0].student.id, locked);
        assert_eq!(occupants.len(), 2);
        assert_eq!(placement.unplaced().len(), 1);
        assert_ne!(placement.unplaced()[0], locked);
    }

    #[test]
    fn test_rerun_with_same_seed_is_identical() {
        let planner = Planner::new(
            roster(12),
            vec![Table::new(4), Table::new(4), Table::new(4)],
            vec![
                Constraint::together(StudentId(0), StudentId(1)),
                Constraint::separate(StudentId(2), StudentId(3)),
                Constraint::separate(StudentId(4), StudentId(5)),
            ],
        );

        let first = planner
            .place_with_rng(&mut StdRng::seed_from_u64(7))
            .unwrap();
        let second = planner
            .place_with_rng(&mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(first.tables(), second.tables());
    }

    #[test]
    fn test_separation_holds_when_capacity_allows() {
        let pairs = vec![
            Constraint::separate(StudentId(0), StudentId(1)),
            Constraint::separate(StudentId(2), StudentId(3)),
            Constraint::separate(StudentId(0), StudentId(4)),
        ];
        let planner = Planner::new(
            roster(6),
            vec![Table::new(3), Table::new(3), Table::new(3)],
            pairs.clone(),
        );

        for seed in 0..20 {
            let placement = planner
                .place_with_rng(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(placement.unplaced().is_empty());
            assert!(!placement.degraded());
            for pair in &pairs {
                let (a, b) = pair.pair();
                assert_ne!(table_of(&placement, a), table_of(&placement, b));
            }
        }
    }

    #[test]
    fn test_group_larger_than_any_table_degrades_not_errors() {
        // Five students must sit together but no table holds more than 3;
        // phase 1 fails, phase 2 splits them, nobody is left standing.
        let constraints = vec![
            Constraint::together(StudentId(0), StudentId(1)),
            Constraint::together(StudentId(1), StudentId(2)),
            Constraint::together(StudentId(2), StudentId(3)),
            Constraint::together(StudentId(3), StudentId(4)),
        ];
        let planner = Planner::new(
            roster(5),
            vec![Table::new(3), Table::new(3)],
            constraints,
        );

        let placement = planner
            .place_with_rng(&mut StdRng::seed_from_u64(1))
            .unwrap();
        assert!(placement.unplaced().is_empty());
        assert_capacity_invariant(&placement);
    }

    #[test]
    fn test_contradictory_pair_does_not_error() {
        let planner = Planner::new(
            roster(2),
            vec![Table::new(2), Table::new(2)],
            vec![
                Constraint::together(StudentId(0), StudentId(1)),
                Constraint::separate(StudentId(0), StudentId(1)),
            ],
        );

        let placement = planner
            .place_with_rng(&mut StdRng::seed_from_u64(3))
            .unwrap();
        assert!(placement.unplaced().is_empty());
        assert_capacity_invariant(&placement);
    }

    #[test]
    fn test_rescue_resolves_blocked_student_without_violations() {
        // y and z pair up and fill table 0 in phase 1. x must avoid both y
        // and the locked occupant of table 2, so when the shuffle seats w at
        // table 1 first, x can only be rescued by swapping w over to table 2.
        // Either shuffle order must end with everyone legally seated.
        let mut builder = PlanBuilder::new();
        let t0 = builder.table(2);
        builder.table(1);
        let t2 = builder.table(2);
        let y = builder.student("y");
        let z = builder.student("z");
        let x = builder.student("x");
        builder.student("w");
        let u = builder.student("u");
        builder.preseat(t2, u, true).unwrap();
        builder.together(y, z);
        builder.separate(x, y);
        builder.separate(x, u);

        let planner = builder.build().unwrap();
        for seed in 0..20 {
            let placement = planner
                .place_with_rng(&mut StdRng::seed_from_u64(seed))
                .unwrap();
            assert!(placement.unplaced().is_empty());
            assert_eq!(placement.stats.last_resorts, 0);
            assert_eq!(table_of(&placement, y), Some(t0));
            assert_eq!(table_of(&placement, z), Some(t0));
            assert_ne!(table_of(&placement, x), table_of(&placement, y));
            assert_ne!(table_of(&placement, x), Some(t2));
            assert_capacity_invariant(&placement);
        }
    }
}

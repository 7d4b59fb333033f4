use fnv::FnvHashSet;

use crate::engine::{PlacementError, Planner};
use crate::roster::*;
use crate::student_registry::StudentRegistry;

/// Assembles a placement run piece by piece: students, tables, pre-seated
/// (possibly locked) occupants, and pairwise constraints. Duplicate
/// constraints are dropped here so the engine sees each pair once.
#[derive(Clone, Debug)]
pub struct PlanBuilder {
    students: StudentRegistry,
    tables: Vec<Table>,
    constraints: Vec<Constraint>,
    seen: FnvHashSet<Constraint>,
}

impl PlanBuilder {
    pub fn new() -> PlanBuilder {
        PlanBuilder {
            students: StudentRegistry::new(),
            tables: vec![],
            constraints: vec![],
            seen: FnvHashSet::default(),
        }
    }

    pub fn student(&mut self, name: &str) -> StudentId {
        self.students.create(name)
    }

    /// Adds a table and returns its index in table order.
    pub fn table(&mut self, capacity: usize) -> usize {
        self.tables.push(Table::new(capacity));
        self.tables.len() - 1
    }

    /// Seats a student at a table before the run. Locked occupants survive
    /// every placement; unlocked ones are cleared and re-placed.
    pub fn preseat(
        &mut self,
        table_ix: usize,
        id: StudentId,
        locked: bool,
    ) -> Result<(), PlacementError> {
        let student = self
            .students
            .get(id)
            .cloned()
            .ok_or(PlacementError::UnknownStudent(id))?;
        match self.tables.get_mut(table_ix) {
            None => Err(PlacementError::UnknownTable(table_ix)),
            Some(table) => {
                if table.remaining_space() == 0 {
                    return Err(PlacementError::TableFull(table_ix));
                }
                table.seat(student, locked);
                Ok(())
            }
        }
    }

    pub fn together(&mut self, a: StudentId, b: StudentId) {
        self.add(Constraint::together(a, b))
    }

    pub fn separate(&mut self, a: StudentId, b: StudentId) {
        self.add(Constraint::separate(a, b))
    }

    fn add(&mut self, constraint: Constraint) {
        if self.seen.insert(constraint) {
            self.constraints.push(constraint);
        }
    }

    pub fn build(self) -> Result<Planner, PlacementError> {
        Ok(Planner::new(
            self.students.into_students(),
            self.tables,
            self.constraints,
        ))
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

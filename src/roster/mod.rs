// The `roster` module contains the data model for a placement run. These types are immutable.
mod student;
pub use crate::roster::student::{Student, StudentId};

mod table;
pub use crate::roster::table::{Occupant, Table};

mod constraint;
pub use crate::roster::constraint::{Constraint, ConstraintKind};

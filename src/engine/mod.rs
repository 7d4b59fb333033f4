mod constraint_index;
mod groups;
mod rescue;
mod report;
mod seating;

mod place;
pub use crate::engine::place::*;
pub use crate::engine::report::{Placement, PlacementStats};

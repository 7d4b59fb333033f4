pub mod engine;
pub mod plan_builder;
pub mod roster;
pub mod shuffle;
pub mod transfer;
pub(crate) mod student_registry;

pub use engine::{Placement, Planner};

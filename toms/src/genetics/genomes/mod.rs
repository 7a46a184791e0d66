pub mod assignment;

pub use assignment::{AssignmentGenome, AssignmentSpace, ResourceAssignment};

//! Constraint types for expressions.

pub mod constraint;

pub use constraint::{Constraint, ConstraintExt};

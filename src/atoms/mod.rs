//! Atom functions for building expressions.
//!
//! Atoms are the building blocks of symbolic expressions. They include:
//!
//! - **Affine atoms**: Operations that preserve linearity (add, mul, sum, reshape, etc.)
//! - **Nonlinear atoms**: Operations with specific curvature (exp, log, power, quad_over_lin)
//! - **Partial trace**: The subsystem trace of a multipartite matrix expression

pub mod affine;
pub mod nonlinear;
pub mod partial_trace;

// Re-export affine operations
pub use affine::{flatten, index, matmul, reshape, slice, sum, sum_axis, trace, transpose};

// Re-export nonlinear atoms
pub use nonlinear::{exp, log, power, quad_over_lin, sqrt};

// Re-export the partial trace
pub use partial_trace::partial_trace;

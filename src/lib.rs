//! # cvxgraph
//!
//! Symbolic expression graphs for convex optimization.
//!
//! cvxgraph provides the modeling layer of a convex optimization DSL:
//! expression graphs with DCP (Disciplined Convex Programming) analysis,
//! the quantum partial trace over tensor-product operators, and the
//! log-log canonicalization rules that rewrite geometric programs into
//! convex ones.
//!
//! ## Quick Start
//!
//! ```
//! use cvxgraph::prelude::*;
//!
//! // A 6x6 operator on a tensor product of a 2- and a 3-dimensional system
//! let rho = variable((6, 6));
//!
//! // Trace out the first subsystem, leaving a 3x3 operator
//! let reduced = partial_trace(&rho, &[2, 3], 0).unwrap();
//! assert_eq!(reduced.shape(), Shape::matrix(3, 3));
//!
//! // The result is an affine function of the input
//! assert!(reduced.is_affine());
//! ```
//!
//! ## DCP Analysis
//!
//! Every expression carries a curvature (constant, affine, convex,
//! concave, or unknown) and a sign, computed by the standard DCP
//! composition rules:
//!
//! - **Equality constraints** require **affine** expressions
//! - **Inequality constraints** (>=) require **concave** left-hand side
//!
//! ## Supported Atoms
//!
//! ### Affine (both convex and concave)
//! - Arithmetic: `+`, `-`, `*` (by scalar), `/` (by constant)
//! - Aggregation: `sum`, `trace`, `partial_trace`
//! - Structural: `reshape`, `flatten`, `transpose`, indexing
//! - Linear algebra: `matmul`
//!
//! ### Convex
//! - `exp`, `power` (p > 1 or p < 0), `quad_over_lin`
//!
//! ### Concave
//! - `log`, `power` (0 < p < 1), `sqrt`
//!
//! ## Geometric-to-Convex Rewriting
//!
//! The `canon` module holds the per-atom rules of the log-log
//! transform: `canon_rule` dispatches an atom to the function that
//! rewrites it (products to sums, ratios to differences, powers to
//! scalings, quad-over-lin to an affine combination).
//!
//! ## Architecture
//!
//! - **Expression graphs** built using the `Expr` enum with `Arc` sharing
//! - **DCP verification** via curvature and sign tracking
//! - **Sparse projectors** from nalgebra-sparse Kronecker products

pub mod atoms;
pub mod canon;
pub mod constraints;
pub mod dcp;
pub mod error;
pub mod expr;
pub mod sparse;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use cvxgraph::prelude::*;
/// ```
pub mod prelude {
    // Expression types
    pub use crate::expr::{
        constant, constant_dmatrix, constant_matrix, constant_sparse, constant_vec, eye,
        named_variable, nonneg_variable, ones, variable, variable_builder, zeros, Array, Expr,
        ExprId, IntoConstant, Shape, VariableBuilder,
    };

    // Atoms
    pub use crate::atoms::{
        exp, flatten, index, log, matmul, partial_trace, power, quad_over_lin, reshape, slice,
        sqrt, sum, sum_axis, trace, transpose,
    };

    // Constraints
    pub use crate::constraints::{Constraint, ConstraintExt};

    // Canonicalization
    pub use crate::canon::{canon_rule, CanonRule};

    // DCP
    pub use crate::dcp::{Curvature, Sign};

    // Errors
    pub use crate::error::{CvxError, Result};
}

// Re-export main types at crate root
pub use error::{CvxError, Result};

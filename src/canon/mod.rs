//! Canonicalization rule tables.
//!
//! Rules rewrite individual atoms into a target normal form. The only
//! table here is the geometric-to-convex (log-log) one; an external
//! rewriter drives rule application over the expression graph.

pub mod dgp2dcp;

pub use dgp2dcp::{canon_rule, div_canon, mul_canon, power_canon, quad_over_lin_canon, CanonRule};

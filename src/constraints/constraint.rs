//! Constraint types.
//!
//! Constraints relate an expression to zero:
//! - Zero: expr == 0
//! - NonNeg: expr >= 0

use std::sync::Arc;

use crate::expr::Expr;

/// A constraint on an expression.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Equality constraint: expr == 0.
    Zero(Arc<Expr>),

    /// Inequality constraint: expr >= 0.
    NonNeg(Arc<Expr>),
}

impl Constraint {
    /// Create an equality constraint: lhs == rhs.
    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Constraint::Zero(Arc::new(Expr::Add(
            Arc::new(lhs),
            Arc::new(Expr::Neg(Arc::new(rhs))),
        )))
    }

    /// Create an inequality constraint: lhs <= rhs.
    pub fn leq(lhs: Expr, rhs: Expr) -> Self {
        // lhs <= rhs  <=>  rhs - lhs >= 0
        Constraint::NonNeg(Arc::new(Expr::Add(
            Arc::new(rhs),
            Arc::new(Expr::Neg(Arc::new(lhs))),
        )))
    }

    /// Create an inequality constraint: lhs >= rhs.
    pub fn geq(lhs: Expr, rhs: Expr) -> Self {
        // lhs >= rhs  <=>  lhs - rhs >= 0
        Constraint::NonNeg(Arc::new(Expr::Add(
            Arc::new(lhs),
            Arc::new(Expr::Neg(Arc::new(rhs))),
        )))
    }

    /// Check if this constraint is DCP-compliant.
    ///
    /// DCP rules for constraints:
    /// - Zero: expression must be affine (equality of affine expressions)
    /// - NonNeg: expression must be concave (concave >= 0)
    pub fn is_dcp(&self) -> bool {
        match self {
            Constraint::Zero(expr) => expr.is_affine(),
            Constraint::NonNeg(expr) => expr.is_concave(),
        }
    }

    /// Get all expressions in this constraint.
    pub fn expressions(&self) -> Vec<&Expr> {
        match self {
            Constraint::Zero(e) => vec![e.as_ref()],
            Constraint::NonNeg(e) => vec![e.as_ref()],
        }
    }

    /// Get all variable IDs in this constraint.
    pub fn variables(&self) -> Vec<crate::expr::ExprId> {
        let mut vars = Vec::new();
        for expr in self.expressions() {
            vars.extend(expr.variables());
        }
        vars.sort_by_key(|id| id.raw());
        vars.dedup();
        vars
    }
}

/// Extension trait for creating constraints from expressions.
pub trait ConstraintExt {
    /// Create equality constraint: self == rhs.
    fn equals(&self, rhs: &Expr) -> Constraint;

    /// Create inequality constraint: self <= rhs.
    fn leq(&self, rhs: &Expr) -> Constraint;

    /// Create inequality constraint: self >= rhs.
    fn geq(&self, rhs: &Expr) -> Constraint;
}

impl ConstraintExt for Expr {
    fn equals(&self, rhs: &Expr) -> Constraint {
        Constraint::eq(self.clone(), rhs.clone())
    }

    fn leq(&self, rhs: &Expr) -> Constraint {
        Constraint::leq(self.clone(), rhs.clone())
    }

    fn geq(&self, rhs: &Expr) -> Constraint {
        Constraint::geq(self.clone(), rhs.clone())
    }
}

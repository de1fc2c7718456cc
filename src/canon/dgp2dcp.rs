//! Canonicalization rules for the geometric-to-convex rewrite.
//!
//! A log-log convex program becomes a disciplined convex program under
//! the substitution that replaces every variable by its natural
//! logarithm. Each rule here rewrites one atom into its log-space
//! equivalent: products become sums, ratios become differences, powers
//! become scalings. Rules assume their arguments are already in
//! canonical form and never call each other; composing them over the
//! expression graph is the rewriter's job.

use crate::atoms::affine::{flatten, index};
use crate::constraints::Constraint;
use crate::expr::Expr;

/// A canonicalization rule: maps an atom and its canonicalized
/// arguments to a replacement expression plus any extra constraints.
pub type CanonRule = fn(&Expr, &[Expr]) -> (Expr, Vec<Constraint>);

/// Look up the canonicalization rule for an atom, if it has one.
///
/// Returns `None` for atoms the geometric-to-convex rewrite leaves
/// untouched (leaves and affine structure).
pub fn canon_rule(expr: &Expr) -> Option<CanonRule> {
    match expr {
        Expr::Mul(_, _) => Some(mul_canon),
        Expr::Div(_, _) => Some(div_canon),
        Expr::Power(_, _) => Some(power_canon),
        Expr::QuadOverLin(_, _) => Some(quad_over_lin_canon),
        _ => None,
    }
}

/// Rewrite quad_over_lin: in log space, ||x||^2 / y becomes
/// sum_i 2 x_i - y.
///
/// Each squared entry of the numerator contributes twice its log, and
/// the division contributes the subtracted denominator. The identity
/// is exact, so no extra constraints are introduced.
///
/// # Panics
///
/// Panics if `args` does not hold the atom's two arguments.
pub fn quad_over_lin_canon(_expr: &Expr, args: &[Expr]) -> (Expr, Vec<Constraint>) {
    let x = flatten(&args[0]);
    let y = &args[1];
    let n = x.shape().size();

    let mut numerator = 2.0 * index(&x, 0);
    for i in 1..n {
        numerator = numerator + 2.0 * index(&x, i);
    }
    (numerator - y, vec![])
}

/// Rewrite multiplication: log(x * y) = log x + log y.
///
/// # Panics
///
/// Panics if `args` does not hold the atom's two arguments.
pub fn mul_canon(_expr: &Expr, args: &[Expr]) -> (Expr, Vec<Constraint>) {
    (&args[0] + &args[1], vec![])
}

/// Rewrite division: log(x / y) = log x - log y.
///
/// # Panics
///
/// Panics if `args` does not hold the atom's two arguments.
pub fn div_canon(_expr: &Expr, args: &[Expr]) -> (Expr, Vec<Constraint>) {
    (&args[0] - &args[1], vec![])
}

/// Rewrite a power: log(x^p) = p log x.
///
/// The exponent is read off the atom itself; the argument list holds
/// only the base.
///
/// # Panics
///
/// Panics if `expr` is not a power atom or `args` is empty.
pub fn power_canon(expr: &Expr, args: &[Expr]) -> (Expr, Vec<Constraint>) {
    let p = match expr {
        Expr::Power(_, p) => *p,
        _ => panic!("power_canon invoked on a non-power atom"),
    };
    (p * &args[0], vec![])
}

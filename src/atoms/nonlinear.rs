//! Nonlinear atoms.
//!
//! These atoms have specific curvature properties (convex or concave)
//! and require DCP composition rules to be applied correctly. Under
//! geometric programming they are also the atoms the log-log transform
//! rewrites.

use std::sync::Arc;

use crate::expr::Expr;

/// Quadratic over linear: ||x||_2^2 / y.
///
/// Properties:
/// - Curvature: Convex (when x is affine and y is concave and positive)
/// - Sign: Non-negative
/// - Domain: y > 0
///
/// This is a perspective function and is jointly convex in (x, y).
pub fn quad_over_lin(x: &Expr, y: &Expr) -> Expr {
    Expr::QuadOverLin(Arc::new(x.clone()), Arc::new(y.clone()))
}

/// Exponential function (elementwise): exp(x)
///
/// Convex when x is affine.
pub fn exp(x: &Expr) -> Expr {
    Expr::Exp(Arc::new(x.clone()))
}

/// Natural logarithm (elementwise): log(x)
///
/// Concave when x is concave (and positive).
pub fn log(x: &Expr) -> Expr {
    Expr::Log(Arc::new(x.clone()))
}

/// Power function (elementwise): x^p
///
/// - p > 1 or p < 0: Convex when x is affine and nonnegative
/// - 0 < p < 1: Concave when x is affine and nonnegative
/// - p = 1: Affine
/// - p = 0: Constant 1
pub fn power(x: &Expr, p: f64) -> Expr {
    Expr::Power(Arc::new(x.clone()), p)
}

/// Square root: sqrt(x) = x^0.5
///
/// Concave when x is affine and nonnegative.
pub fn sqrt(x: &Expr) -> Expr {
    power(x, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcp::Curvature;
    use crate::expr::variable;

    #[test]
    fn test_quad_over_lin_convex() {
        let x = variable(5);
        let y = variable(());
        let q = quad_over_lin(&x, &y);
        assert_eq!(q.curvature(), Curvature::Convex);
        assert!(q.is_nonneg());
    }

    #[test]
    fn test_exp_convex() {
        let x = variable(5);
        let e = exp(&x);
        assert_eq!(e.curvature(), Curvature::Convex);
        assert!(e.is_nonneg());
    }

    #[test]
    fn test_log_concave() {
        let x = variable(5);
        let l = log(&x);
        assert_eq!(l.curvature(), Curvature::Concave);
    }

    #[test]
    fn test_power_curvature_cases() {
        let x = variable(5);
        assert_eq!(power(&x, 2.0).curvature(), Curvature::Convex);
        assert_eq!(power(&x, -1.0).curvature(), Curvature::Convex);
        assert_eq!(sqrt(&x).curvature(), Curvature::Concave);
        assert!(power(&x, 1.0).is_affine());
    }

    #[test]
    fn test_exp_of_convex_is_unknown() {
        let x = variable(5);
        let q = quad_over_lin(&x, &variable(()));
        // exp of a convex argument is not DCP
        let e = exp(&q);
        assert_eq!(e.curvature(), Curvature::Unknown);
    }

    #[test]
    fn test_quad_over_lin_of_affine_is_convex() {
        let x = variable(5);
        let y = variable(5);
        let z = &x - &y;
        let q = quad_over_lin(&z, &variable(()));
        assert_eq!(q.curvature(), Curvature::Convex);
    }
}

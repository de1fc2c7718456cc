//! Tests for the geometric-to-convex canonicalization rules.

use cvxgraph::prelude::*;

const TOL: f64 = 1e-10;

fn eval(e: &Expr) -> f64 {
    e.value().unwrap().as_scalar().unwrap()
}

/// Structural equality over the expression kinds the rules emit:
/// constants compare by value, variables by id.
fn structural_eq(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Variable(va), Expr::Variable(vb)) => va.id == vb.id,
        (Expr::Constant(ca), Expr::Constant(cb)) => ca.value.to_dense() == cb.value.to_dense(),
        (Expr::Add(a1, a2), Expr::Add(b1, b2)) | (Expr::Mul(a1, a2), Expr::Mul(b1, b2)) => {
            structural_eq(a1, b1) && structural_eq(a2, b2)
        }
        (Expr::Neg(a1), Expr::Neg(b1)) => structural_eq(a1, b1),
        (Expr::Reshape(a1, s1), Expr::Reshape(b1, s2)) => s1 == s2 && structural_eq(a1, b1),
        (Expr::Index(a1, s1), Expr::Index(b1, s2)) => {
            s1.ranges == s2.ranges && structural_eq(a1, b1)
        }
        _ => false,
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_rule_dispatch() {
    let x = variable(());
    let y = variable(());

    assert!(canon_rule(&(&x * &y)).is_some());
    assert!(canon_rule(&(&x / &y)).is_some());
    assert!(canon_rule(&power(&x, 2.0)).is_some());
    assert!(canon_rule(&quad_over_lin(&x, &y)).is_some());

    assert!(canon_rule(&x).is_none());
    assert!(canon_rule(&constant(1.5)).is_none());
    assert!(canon_rule(&(&x + &y)).is_none());
}

#[test]
fn test_dispatch_and_direct_call_agree() {
    let x = constant_vec(vec![1.0, 2.0]);
    let y = constant(3.0);
    let atom = quad_over_lin(&x, &y);

    let rule = canon_rule(&atom).expect("quad_over_lin has a rule");
    let (via_table, _) = rule(&atom, &[x.clone(), y.clone()]);
    let (direct, _) = cvxgraph::canon::quad_over_lin_canon(&atom, &[x, y]);

    assert!(structural_eq(&via_table, &direct));
}

// ============================================================================
// quad_over_lin
// ============================================================================

#[test]
fn test_quad_over_lin_replacement_value() {
    // In log space: 2*(1 + 2 + 3) - 4 = 8
    let x = constant_vec(vec![1.0, 2.0, 3.0]);
    let y = constant(4.0);
    let atom = quad_over_lin(&x, &y);

    let (replacement, constraints) = cvxgraph::canon::quad_over_lin_canon(&atom, &[x, y]);
    assert!(constraints.is_empty());

    let val = eval(&replacement);
    assert!((val - 8.0).abs() < TOL, "Expected 8.0, got {}", val);
}

#[test]
fn test_quad_over_lin_matrix_argument_is_flattened() {
    // All four entries participate: 2*(1 + 2 + 3 + 4) - 1 = 19
    let x = constant_matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
    let y = constant(1.0);
    let atom = quad_over_lin(&x, &y);

    let (replacement, _) = cvxgraph::canon::quad_over_lin_canon(&atom, &[x, y]);
    let val = eval(&replacement);
    assert!((val - 19.0).abs() < TOL, "Expected 19.0, got {}", val);
}

#[test]
fn test_quad_over_lin_scalar_argument() {
    // A scalar numerator is a one-element vector: 2*5 - 2 = 8
    let x = constant(5.0);
    let y = constant(2.0);
    let atom = quad_over_lin(&x, &y);

    let (replacement, _) = cvxgraph::canon::quad_over_lin_canon(&atom, &[x, y]);
    let val = eval(&replacement);
    assert!((val - 8.0).abs() < TOL, "Expected 8.0, got {}", val);
}

#[test]
fn test_quad_over_lin_replacement_is_affine() {
    // The rewrite must land in DCP-affine territory for affine inputs.
    let x = variable(4);
    let y = variable(());
    let atom = quad_over_lin(&x, &y);

    let (replacement, _) =
        cvxgraph::canon::quad_over_lin_canon(&atom, &[x.clone(), y.clone()]);
    assert!(replacement.is_affine());

    // Both arguments survive into the replacement
    let mut expected_vars = x.variables();
    expected_vars.extend(y.variables());
    expected_vars.sort_by_key(|id| id.raw());
    assert_eq!(replacement.variables(), expected_vars);
}

#[test]
fn test_quad_over_lin_deterministic() {
    let x = variable(3);
    let y = variable(());
    let atom = quad_over_lin(&x, &y);
    let args = [x, y];

    let (first, first_cons) = cvxgraph::canon::quad_over_lin_canon(&atom, &args);
    let (second, second_cons) = cvxgraph::canon::quad_over_lin_canon(&atom, &args);

    assert!(structural_eq(&first, &second));
    assert!(first_cons.is_empty() && second_cons.is_empty());
}

// ============================================================================
// Companion rules
// ============================================================================

#[test]
fn test_mul_canon_is_addition() {
    let x = constant(2.0);
    let y = constant(3.0);
    let atom = &x * &y;

    let (replacement, constraints) = cvxgraph::canon::mul_canon(&atom, &[x, y]);
    assert!(constraints.is_empty());
    let val = eval(&replacement);
    assert!((val - 5.0).abs() < TOL, "Expected 5.0, got {}", val);
}

#[test]
fn test_div_canon_is_subtraction() {
    let x = constant(2.0);
    let y = constant(3.0);
    let atom = &x / &y;

    let (replacement, constraints) = cvxgraph::canon::div_canon(&atom, &[x, y]);
    assert!(constraints.is_empty());
    let val = eval(&replacement);
    assert!((val + 1.0).abs() < TOL, "Expected -1.0, got {}", val);
}

#[test]
fn test_power_canon_is_scaling() {
    let x = constant(3.0);

    let atom = power(&x, 4.0);
    let (replacement, _) = cvxgraph::canon::power_canon(&atom, &[x.clone()]);
    let val = eval(&replacement);
    assert!((val - 12.0).abs() < TOL, "Expected 12.0, got {}", val);

    let atom = sqrt(&x);
    let (replacement, _) = cvxgraph::canon::power_canon(&atom, &[x]);
    let val = eval(&replacement);
    assert!((val - 1.5).abs() < TOL, "Expected 1.5, got {}", val);
}

#[test]
fn test_rules_preserve_affinity_of_variable_args() {
    let x = variable(());
    let y = variable(());

    let atom = &x * &y;
    let (replacement, _) = cvxgraph::canon::mul_canon(&atom, &[x.clone(), y.clone()]);
    assert!(replacement.is_affine());

    let atom = &x / &y;
    let (replacement, _) = cvxgraph::canon::div_canon(&atom, &[x.clone(), y]);
    assert!(replacement.is_affine());

    let atom = power(&x, 3.0);
    let (replacement, _) = cvxgraph::canon::power_canon(&atom, &[x]);
    assert!(replacement.is_affine());
}

//! Partial trace of a multipartite matrix expression.
//!
//! Treats a square expression as an operator on a tensor product of
//! subsystems and traces out one subsystem, leaving an operator on the
//! remaining ones. The result is built symbolically: each term selects
//! one diagonal block of the traced subsystem with sparse constant
//! projectors, and the terms are summed.

use crate::atoms::affine::matmul;
use crate::error::{CvxError, Result};
use crate::expr::{constant, constant_sparse, Expr};
use crate::sparse::{csc_from_triplets, csc_identity, csc_kron, csc_unit_column};

/// Partial trace over a subsystem of a square matrix expression.
///
/// Assumes the expression acts on a Kronecker product of subsystems
/// whose dimensions are given by `dims`, and traces out the subsystem
/// at position `axis`. For a matrix of side n = dims[0] * ... * dims[k-1],
/// the result is square with side n / dims[axis].
///
/// Tracing out every axis in turn reduces to the ordinary trace.
///
/// # Errors
///
/// - `InvalidShape` if the expression is not a square matrix.
/// - `InvalidAxis` if `axis` is negative or not less than `dims.len()`.
/// - `DimensionMismatch` if the product of `dims` does not equal the
///   side of the matrix.
///
/// # Example
///
/// ```
/// use cvxgraph::atoms::partial_trace;
/// use cvxgraph::expr::{variable, Shape};
///
/// let rho = variable((6, 6));
/// let reduced = partial_trace(&rho, &[2, 3], 0).unwrap();
/// assert_eq!(reduced.shape(), Shape::matrix(3, 3));
/// ```
pub fn partial_trace(expr: impl Into<Expr>, dims: &[usize], axis: isize) -> Result<Expr> {
    let expr = expr.into();
    let shape = expr.shape();
    if !shape.is_matrix() || !shape.is_square() {
        return Err(CvxError::InvalidShape(format!(
            "partial_trace only supports square matrices, got {}",
            shape
        )));
    }
    if axis < 0 || axis as usize >= dims.len() {
        return Err(CvxError::InvalidAxis {
            axis,
            len: dims.len(),
        });
    }
    let axis = axis as usize;
    let product: usize = dims.iter().product();
    if product != shape.rows() {
        return Err(CvxError::DimensionMismatch(format!(
            "subsystem dimensions {:?} multiply to {}, but the matrix has side {}",
            dims,
            product,
            shape.rows()
        )));
    }

    // A zero-dimensional subsystem sums no terms.
    if dims[axis] == 0 {
        return Ok(constant(0.0));
    }

    // Sum the diagonal blocks of the traced subsystem in index order.
    let mut result = term(&expr, 0, dims, axis);
    for j in 1..dims[axis] {
        result = result + term(&expr, j, dims, axis);
    }
    Ok(result)
}

/// The j-th term of the partial trace: a_j * expr * b_j.
///
/// a_j and b_j are Kronecker products over the subsystems, with the
/// identity at every position except `axis`, which contributes the
/// basis row e_j^T on the left and the basis column e_j on the right.
fn term(expr: &Expr, j: usize, dims: &[usize], axis: usize) -> Expr {
    let mut a = csc_from_triplets(1, 1, vec![0], vec![0], vec![1.0]);
    let mut b = csc_from_triplets(1, 1, vec![0], vec![0], vec![1.0]);
    for (i_axis, &dim) in dims.iter().enumerate() {
        if i_axis == axis {
            let v = csc_unit_column(dim, j);
            a = csc_kron(&a, &v.transpose());
            b = csc_kron(&b, &v);
        } else {
            let eye = csc_identity(dim);
            a = csc_kron(&a, &eye);
            b = csc_kron(&b, &eye);
        }
    }
    matmul(&matmul(&constant_sparse(a), expr), &constant_sparse(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{constant_matrix, variable, Shape};

    #[test]
    fn test_result_shape() {
        let x = variable((6, 6));
        let pt = partial_trace(&x, &[2, 3], 0).unwrap();
        assert_eq!(pt.shape(), Shape::matrix(3, 3));

        let pt = partial_trace(&x, &[2, 3], 1).unwrap();
        assert_eq!(pt.shape(), Shape::matrix(2, 2));
    }

    #[test]
    fn test_rejects_non_square() {
        let x = variable((2, 3));
        let err = partial_trace(&x, &[2], 0).unwrap_err();
        assert!(err.to_string().contains("only supports square matrices"));

        let v = variable(5);
        assert!(partial_trace(&v, &[5], 0).is_err());
    }

    #[test]
    fn test_rejects_bad_axis() {
        let x = variable((4, 4));
        let err = partial_trace(&x, &[2, 2], 2).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2"), "message should name the axis: {}", msg);

        let err = partial_trace(&x, &[2, 2], -1).unwrap_err();
        assert!(matches!(err, CvxError::InvalidAxis { axis: -1, len: 2 }));
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let x = variable((6, 6));
        let err = partial_trace(&x, &[2, 2], 0).unwrap_err();
        assert!(matches!(err, CvxError::DimensionMismatch(_)));
    }

    #[test]
    fn test_single_system_is_full_trace() {
        // [[1, 2], [3, 4]] traced over its only subsystem gives 5.
        let m = constant_matrix(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let pt = partial_trace(&m, &[2], 0).unwrap();
        let v = pt.value().unwrap().as_scalar().unwrap();
        assert_eq!(v, 5.0);
    }

    #[test]
    fn test_term_count_matches_traced_dimension() {
        fn count_terms(e: &Expr) -> usize {
            match e {
                Expr::Add(a, b) => count_terms(a) + count_terms(b),
                _ => 1,
            }
        }

        let x = variable((6, 6));
        let pt = partial_trace(&x, &[2, 3], 0).unwrap();
        assert_eq!(count_terms(&pt), 2);

        let pt = partial_trace(&x, &[2, 3], 1).unwrap();
        assert_eq!(count_terms(&pt), 3);
    }
}

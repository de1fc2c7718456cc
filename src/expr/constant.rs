//! Constant expression constructors.

use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;

use super::expression::{Array, ConstantData, Expr, ExprId};
use super::shape::Shape;

/// Create a scalar constant expression.
///
/// # Example
/// ```
/// use cvxgraph::expr::constant;
/// let c = constant(5.0);
/// assert!(c.is_constant());
/// ```
pub fn constant(value: f64) -> Expr {
    Expr::Constant(ConstantData {
        id: ExprId::new(),
        value: Array::Scalar(value),
    })
}

/// Create a vector constant expression (stored as an n x 1 column).
pub fn constant_vec(values: Vec<f64>) -> Expr {
    Expr::Constant(ConstantData {
        id: ExprId::new(),
        value: Array::from_vec(values),
    })
}

/// Create a matrix constant expression from row-major data.
///
/// # Panics
/// Panics if `values.len() != rows * cols`.
pub fn constant_matrix(rows: usize, cols: usize, values: Vec<f64>) -> Expr {
    assert_eq!(
        values.len(),
        rows * cols,
        "constant_matrix: expected {} values, got {}",
        rows * cols,
        values.len()
    );
    let m = DMatrix::from_row_slice(rows, cols, &values);
    Expr::Constant(ConstantData {
        id: ExprId::new(),
        value: Array::Dense(m),
    })
}

/// Create a constant expression from a dense nalgebra matrix.
pub fn constant_dmatrix(matrix: DMatrix<f64>) -> Expr {
    Expr::Constant(ConstantData {
        id: ExprId::new(),
        value: Array::Dense(matrix),
    })
}

/// Create a constant expression from a sparse CSC matrix.
pub fn constant_sparse(matrix: CscMatrix<f64>) -> Expr {
    Expr::Constant(ConstantData {
        id: ExprId::new(),
        value: Array::Sparse(matrix),
    })
}

/// Create a zero constant with the given shape.
pub fn zeros(shape: impl Into<Shape>) -> Expr {
    let shape = shape.into();
    if shape.is_scalar() {
        constant(0.0)
    } else {
        constant_dmatrix(DMatrix::zeros(shape.rows(), shape.cols()))
    }
}

/// Create a ones constant with the given shape.
pub fn ones(shape: impl Into<Shape>) -> Expr {
    let shape = shape.into();
    if shape.is_scalar() {
        constant(1.0)
    } else {
        constant_dmatrix(DMatrix::from_element(shape.rows(), shape.cols(), 1.0))
    }
}

/// Create an n x n identity matrix constant (stored sparse).
pub fn eye(n: usize) -> Expr {
    constant_sparse(crate::sparse::csc_identity(n))
}

/// Trait for converting values into constant expressions.
pub trait IntoConstant {
    /// Convert into a constant expression.
    fn into_constant(self) -> Expr;
}

impl IntoConstant for f64 {
    fn into_constant(self) -> Expr {
        constant(self)
    }
}

impl IntoConstant for i32 {
    fn into_constant(self) -> Expr {
        constant(self as f64)
    }
}

impl IntoConstant for Vec<f64> {
    fn into_constant(self) -> Expr {
        constant_vec(self)
    }
}

impl IntoConstant for &[f64] {
    fn into_constant(self) -> Expr {
        constant_vec(self.to_vec())
    }
}

impl IntoConstant for DMatrix<f64> {
    fn into_constant(self) -> Expr {
        constant_dmatrix(self)
    }
}

impl IntoConstant for CscMatrix<f64> {
    fn into_constant(self) -> Expr {
        constant_sparse(self)
    }
}

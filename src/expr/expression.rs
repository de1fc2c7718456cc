//! Core expression types for cvxgraph.
//!
//! The `Expr` enum represents all expressions in the modeling layer.
//! Expressions form an immutable DAG (directed acyclic graph) using `Arc`
//! for sharing; building new nodes never mutates or copies existing ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;

use super::shape::Shape;

/// Unique identifier for expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u64);

impl ExprId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ExprId(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::new()
    }
}

/// Constant storage (dense, sparse, or scalar).
#[derive(Debug, Clone)]
pub enum Array {
    /// Dense matrix storage.
    Dense(DMatrix<f64>),
    /// Sparse CSC matrix storage.
    Sparse(CscMatrix<f64>),
    /// Scalar value.
    Scalar(f64),
}

impl Array {
    /// Get the shape of the array.
    pub fn shape(&self) -> Shape {
        match self {
            Array::Dense(m) => Shape::matrix(m.nrows(), m.ncols()),
            Array::Sparse(m) => Shape::matrix(m.nrows(), m.ncols()),
            Array::Scalar(_) => Shape::scalar(),
        }
    }

    /// Get the total number of elements.
    pub fn size(&self) -> usize {
        match self {
            Array::Dense(m) => m.nrows() * m.ncols(),
            Array::Sparse(m) => m.nrows() * m.ncols(),
            Array::Scalar(_) => 1,
        }
    }

    /// Try to get as a scalar value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Array::Scalar(v) => Some(*v),
            Array::Dense(m) if m.nrows() == 1 && m.ncols() == 1 => Some(m[(0, 0)]),
            Array::Sparse(m) if m.nrows() == 1 && m.ncols() == 1 => {
                Some(m.values().first().copied().unwrap_or(0.0))
            }
            _ => None,
        }
    }

    /// Convert to a dense matrix (scalars become 1x1).
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Array::Dense(m) => m.clone(),
            Array::Sparse(m) => crate::sparse::csc_to_dense(m),
            Array::Scalar(v) => DMatrix::from_element(1, 1, *v),
        }
    }

    /// Check if all elements are non-negative.
    pub fn is_nonneg(&self) -> bool {
        match self {
            Array::Scalar(v) => *v >= 0.0,
            Array::Dense(m) => m.iter().all(|&v| v >= 0.0),
            Array::Sparse(m) => m.values().iter().all(|&v| v >= 0.0),
        }
    }

    /// Check if all elements are non-positive.
    pub fn is_nonpos(&self) -> bool {
        match self {
            Array::Scalar(v) => *v <= 0.0,
            Array::Dense(m) => m.iter().all(|&v| v <= 0.0),
            // Implicit zeros in the sparse pattern are non-positive
            Array::Sparse(m) => m.values().iter().all(|&v| v <= 0.0),
        }
    }

    /// Create from a scalar.
    pub fn from_scalar(v: f64) -> Self {
        Array::Scalar(v)
    }

    /// Create from a vector (stored as an n x 1 column).
    pub fn from_vec(v: Vec<f64>) -> Self {
        let n = v.len();
        Array::Dense(DMatrix::from_vec(n, 1, v))
    }

    /// Create from a dense matrix.
    pub fn from_matrix(m: DMatrix<f64>) -> Self {
        Array::Dense(m)
    }
}

impl From<f64> for Array {
    fn from(v: f64) -> Self {
        Array::Scalar(v)
    }
}

impl From<Vec<f64>> for Array {
    fn from(v: Vec<f64>) -> Self {
        Array::from_vec(v)
    }
}

impl From<DMatrix<f64>> for Array {
    fn from(m: DMatrix<f64>) -> Self {
        Array::Dense(m)
    }
}

/// Data for a variable expression.
#[derive(Debug, Clone)]
pub struct VariableData {
    /// Unique identifier.
    pub id: ExprId,
    /// Shape of the variable.
    pub shape: Shape,
    /// Optional name for display.
    pub name: Option<String>,
    /// Variable is constrained to be non-negative.
    pub nonneg: bool,
    /// Variable is constrained to be non-positive.
    pub nonpos: bool,
}

/// Data for a constant expression.
#[derive(Debug, Clone)]
pub struct ConstantData {
    /// Unique identifier.
    pub id: ExprId,
    /// The constant value.
    pub value: Array,
}

impl ConstantData {
    /// Get the shape of the constant.
    pub fn shape(&self) -> Shape {
        self.value.shape()
    }
}

/// Specification for indexing operations.
#[derive(Debug, Clone)]
pub struct IndexSpec {
    /// Ranges for each dimension: (start, stop, step).
    /// None means take the whole dimension.
    pub ranges: Vec<Option<(usize, usize, usize)>>,
}

impl IndexSpec {
    /// Create an index spec for a single element.
    pub fn element(indices: Vec<usize>) -> Self {
        IndexSpec {
            ranges: indices.into_iter().map(|i| Some((i, i + 1, 1))).collect(),
        }
    }

    /// Create an index spec for a contiguous range.
    pub fn range(start: usize, stop: usize) -> Self {
        IndexSpec {
            ranges: vec![Some((start, stop, 1))],
        }
    }
}

/// The core expression type - an algebraic data type.
///
/// All expressions are immutable and use `Arc` for efficient sharing.
/// This allows building expression DAGs without copying.
#[derive(Debug, Clone)]
pub enum Expr {
    // ========== Leaf nodes ==========
    /// A decision variable.
    Variable(VariableData),
    /// A constant value.
    Constant(ConstantData),

    // ========== Affine atoms ==========
    /// Addition: a + b
    Add(Arc<Expr>, Arc<Expr>),
    /// Negation: -a
    Neg(Arc<Expr>),
    /// Elementwise or scalar multiplication: a * b
    Mul(Arc<Expr>, Arc<Expr>),
    /// Elementwise ratio: a / b (a log-log affine atom; affine under DCP
    /// only when the divisor is constant).
    Div(Arc<Expr>, Arc<Expr>),
    /// Matrix-vector or matrix-matrix multiplication.
    MatMul(Arc<Expr>, Arc<Expr>),
    /// Summation with optional axis.
    Sum(Arc<Expr>, Option<usize>),
    /// Reshape to a new shape (column-major).
    Reshape(Arc<Expr>, Shape),
    /// Indexing/slicing.
    Index(Arc<Expr>, IndexSpec),
    /// Transpose.
    Transpose(Arc<Expr>),
    /// Matrix trace.
    Trace(Arc<Expr>),

    // ========== Nonlinear atoms ==========
    /// Exponential: exp(x) (elementwise).
    Exp(Arc<Expr>),
    /// Natural logarithm: log(x) (elementwise).
    Log(Arc<Expr>),
    /// Power: x^p (elementwise, fixed exponent).
    Power(Arc<Expr>, f64),
    /// Quadratic over linear: ||x||_2^2 / y.
    QuadOverLin(Arc<Expr>, Arc<Expr>),
}

impl Expr {
    /// Get the shape of the expression.
    pub fn shape(&self) -> Shape {
        match self {
            Expr::Variable(v) => v.shape.clone(),
            Expr::Constant(c) => c.shape(),

            // Affine
            Expr::Add(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => a
                .shape()
                .broadcast(&b.shape())
                .unwrap_or_else(Shape::scalar),
            Expr::Neg(a) => a.shape(),
            Expr::MatMul(a, b) => a.shape().matmul(&b.shape()).unwrap_or_else(Shape::scalar),
            Expr::Sum(a, axis) => {
                let base = a.shape();
                match axis {
                    None => Shape::scalar(),
                    Some(_) if base.ndim() <= 1 => Shape::scalar(),
                    Some(0) => Shape::vector(base.cols()),
                    Some(_) => Shape::vector(base.rows()),
                }
            }
            Expr::Reshape(_, shape) => shape.clone(),
            Expr::Index(a, spec) => {
                let base = a.shape();
                let mut new_dims = Vec::new();
                for (i, r) in spec.ranges.iter().enumerate() {
                    match r {
                        Some((start, stop, step)) => {
                            let size = (stop - start + step - 1) / step;
                            if size > 1 {
                                new_dims.push(size);
                            }
                        }
                        None => {
                            if i < base.ndim() {
                                new_dims.push(base.dims()[i]);
                            }
                        }
                    }
                }
                if new_dims.is_empty() {
                    Shape::scalar()
                } else {
                    Shape::from_dims(new_dims)
                }
            }
            Expr::Transpose(a) => a.shape().transpose(),
            Expr::Trace(_) => Shape::scalar(),

            // Nonlinear
            Expr::Exp(a) | Expr::Log(a) | Expr::Power(a, _) => a.shape(),
            Expr::QuadOverLin(_, _) => Shape::scalar(),
        }
    }

    /// Get the unique ID if this is a variable.
    pub fn variable_id(&self) -> Option<ExprId> {
        match self {
            Expr::Variable(v) => Some(v.id),
            _ => None,
        }
    }

    /// Check if this expression is a constant leaf.
    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }

    /// Check if this expression is a variable leaf.
    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Variable(_))
    }

    /// Get the constant value if this is a constant expression.
    pub fn constant_value(&self) -> Option<&Array> {
        match self {
            Expr::Constant(c) => Some(&c.value),
            _ => None,
        }
    }

    /// Collect all variables in this expression, sorted and deduplicated.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort_by_key(|id| id.0);
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<ExprId>) {
        match self {
            Expr::Variable(v) => vars.push(v.id),
            Expr::Constant(_) => {}

            Expr::Add(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::MatMul(a, b)
            | Expr::QuadOverLin(a, b) => {
                a.collect_variables(vars);
                b.collect_variables(vars);
            }
            Expr::Neg(a)
            | Expr::Sum(a, _)
            | Expr::Reshape(a, _)
            | Expr::Index(a, _)
            | Expr::Transpose(a)
            | Expr::Trace(a)
            | Expr::Exp(a)
            | Expr::Log(a)
            | Expr::Power(a, _) => {
                a.collect_variables(vars);
            }
        }
    }
}

// Convenient From implementations: the single "cast to constant/expression"
// step applied to raw inputs before any validation.
impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        crate::expr::constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        crate::expr::constant(value as f64)
    }
}

impl From<Vec<f64>> for Expr {
    fn from(values: Vec<f64>) -> Self {
        crate::expr::constant_vec(values)
    }
}

impl From<DMatrix<f64>> for Expr {
    fn from(matrix: DMatrix<f64>) -> Self {
        crate::expr::constant_dmatrix(matrix)
    }
}

impl From<CscMatrix<f64>> for Expr {
    fn from(matrix: CscMatrix<f64>) -> Self {
        crate::expr::constant_sparse(matrix)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

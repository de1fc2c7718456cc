//! Shape representation for expressions.
//!
//! Shapes follow NumPy conventions:
//! - `()` is a scalar
//! - `(n,)` is a vector of length n
//! - `(m, n)` is an m x n matrix

use std::fmt;

/// Shape of an expression (row-major like NumPy).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a scalar shape.
    pub fn scalar() -> Self {
        Shape(vec![])
    }

    /// Create a vector shape.
    pub fn vector(n: usize) -> Self {
        Shape(vec![n])
    }

    /// Create a matrix shape.
    pub fn matrix(m: usize, n: usize) -> Self {
        Shape(vec![m, n])
    }

    /// Create a shape from dimensions.
    pub fn from_dims(dims: impl Into<Vec<usize>>) -> Self {
        Shape(dims.into())
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.0.iter().product::<usize>().max(1)
    }

    /// Number of dimensions (0 for scalar, 1 for vector, 2 for matrix).
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Get the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Check if this is a scalar.
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this is a vector.
    pub fn is_vector(&self) -> bool {
        self.0.len() == 1
    }

    /// Check if this is a matrix.
    pub fn is_matrix(&self) -> bool {
        self.0.len() == 2
    }

    /// Check if this is a square matrix-like shape (rank >= 2, rows == cols).
    pub fn is_square(&self) -> bool {
        self.ndim() >= 2 && self.rows() == self.cols()
    }

    /// Number of rows (1 for scalar, n for vector, m for matrix).
    pub fn rows(&self) -> usize {
        match self.0.len() {
            0 => 1,
            _ => self.0[0],
        }
    }

    /// Number of columns (1 for scalar, 1 for vector, n for matrix).
    pub fn cols(&self) -> usize {
        match self.0.len() {
            0 | 1 => 1,
            _ => self.0[1],
        }
    }

    /// Get the transposed shape.
    pub fn transpose(&self) -> Self {
        match self.0.len() {
            0 => Shape::scalar(),
            1 => Shape::matrix(1, self.0[0]),
            _ => Shape::matrix(self.cols(), self.rows()),
        }
    }

    /// Check if shapes are broadcastable and return the result shape.
    pub fn broadcast(&self, other: &Shape) -> Option<Shape> {
        let max_ndim = self.ndim().max(other.ndim());

        // Pad shapes with 1s on the left, NumPy style
        let pad = |s: &Shape| -> Vec<usize> {
            std::iter::repeat(1)
                .take(max_ndim - s.ndim())
                .chain(s.0.iter().copied())
                .collect()
        };
        let lhs = pad(self);
        let rhs = pad(other);

        let mut result = Vec::with_capacity(max_ndim);
        for (a, b) in lhs.iter().zip(rhs.iter()) {
            if a == b || *b == 1 {
                result.push(*a);
            } else if *a == 1 {
                result.push(*b);
            } else {
                return None;
            }
        }

        Some(Shape(result))
    }

    /// Check if matrix multiplication is valid and return the result shape.
    pub fn matmul(&self, other: &Shape) -> Option<Shape> {
        match (self.ndim(), other.ndim()) {
            // matrix @ matrix
            (2, 2) if self.cols() == other.rows() => {
                Some(Shape::matrix(self.rows(), other.cols()))
            }
            // matrix @ vector
            (2, 1) if self.cols() == other.rows() => Some(Shape::vector(self.rows())),
            // vector @ matrix (treated as row vector)
            (1, 2) if self.rows() == other.rows() => Some(Shape::vector(other.cols())),
            // vector @ vector (dot product)
            (1, 1) if self.rows() == other.rows() => Some(Shape::scalar()),
            _ => None,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            0 => write!(f, "()"),
            1 => write!(f, "({},)", self.0[0]),
            _ => write!(f, "({}, {})", self.0[0], self.0[1]),
        }
    }
}

// Conversion traits
impl From<()> for Shape {
    fn from(_: ()) -> Self {
        Shape::scalar()
    }
}

impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize,)> for Shape {
    fn from((n,): (usize,)) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((m, n): (usize, usize)) -> Self {
        Shape::matrix(m, n)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape(dims.to_vec())
    }
}

//! Sparse matrix utilities.
//!
//! Helper functions for working with nalgebra-sparse matrices, including
//! the Kronecker product used to build subsystem projectors.

use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together. Out-of-bounds triplets are dropped.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    // Build COO matrix first
    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    // Convert to CSC
    CscMatrix::from(&coo)
}

/// Create a CSC identity matrix.
pub fn csc_identity(n: usize) -> CscMatrix<f64> {
    CscMatrix::identity(n)
}

/// Create a standard basis column vector e_j of the given length.
pub fn csc_unit_column(len: usize, j: usize) -> CscMatrix<f64> {
    csc_from_triplets(len, 1, vec![j], vec![0], vec![1.0])
}

/// Kronecker product of two sparse matrices.
///
/// The result has shape (a.nrows * b.nrows, a.ncols * b.ncols), with
/// block (i, j) equal to a[(i, j)] * b.
pub fn csc_kron(a: &CscMatrix<f64>, b: &CscMatrix<f64>) -> CscMatrix<f64> {
    let cap = a.nnz() * b.nnz();
    let mut rows = Vec::with_capacity(cap);
    let mut cols = Vec::with_capacity(cap);
    let mut vals = Vec::with_capacity(cap);

    for (ra, ca, va) in a.triplet_iter() {
        for (rb, cb, vb) in b.triplet_iter() {
            rows.push(ra * b.nrows() + rb);
            cols.push(ca * b.ncols() + cb);
            vals.push(va * vb);
        }
    }

    csc_from_triplets(a.nrows() * b.nrows(), a.ncols() * b.ncols(), rows, cols, vals)
}

/// Convert CSC to dense matrix.
pub fn csc_to_dense(sparse: &CscMatrix<f64>) -> DMatrix<f64> {
    let mut dense = DMatrix::zeros(sparse.nrows(), sparse.ncols());
    for (row, col, val) in sparse.triplet_iter() {
        dense[(row, col)] = *val;
    }
    dense
}

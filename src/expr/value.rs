//! Numeric evaluation of constant expressions.
//!
//! Every atom knows how to compute its value bottom-up from constant
//! leaves. Evaluation fails with `MissingValue` when the tree contains
//! a variable, since variables carry no numeric assignment here.

use nalgebra::DMatrix;

use crate::error::{CvxError, Result};
use crate::expr::{Array, Expr};

impl Expr {
    /// Evaluate the expression numerically.
    ///
    /// Returns `Array::Scalar` for 1x1 results and `Array::Dense`
    /// otherwise. Fails if any leaf is a variable.
    pub fn value(&self) -> Result<Array> {
        let dense = self.value_dense()?;
        if dense.nrows() == 1 && dense.ncols() == 1 {
            Ok(Array::Scalar(dense[(0, 0)]))
        } else {
            Ok(Array::Dense(dense))
        }
    }

    fn value_dense(&self) -> Result<DMatrix<f64>> {
        match self {
            Expr::Variable(v) => {
                let label = v
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("var{}", v.id.raw()));
                Err(CvxError::MissingValue(format!(
                    "variable {} has no value",
                    label
                )))
            }
            Expr::Constant(c) => Ok(c.value.to_dense()),

            Expr::Add(a, b) => broadcast_binary(&a.value_dense()?, &b.value_dense()?, |x, y| x + y),
            Expr::Neg(a) => Ok(-a.value_dense()?),
            Expr::Mul(a, b) => broadcast_binary(&a.value_dense()?, &b.value_dense()?, |x, y| x * y),
            Expr::Div(a, b) => broadcast_binary(&a.value_dense()?, &b.value_dense()?, |x, y| x / y),
            Expr::MatMul(a, b) => {
                let mut lhs = a.value_dense()?;
                let rhs = b.value_dense()?;
                // Vectors are stored as columns; a vector on the left
                // multiplies as a row.
                if a.shape().ndim() == 1
                    && lhs.ncols() == 1
                    && lhs.nrows() != 1
                    && lhs.nrows() == rhs.nrows()
                {
                    lhs = lhs.transpose();
                }
                if lhs.ncols() != rhs.nrows() {
                    return Err(CvxError::DimensionMismatch(format!(
                        "cannot multiply {}x{} by {}x{}",
                        lhs.nrows(),
                        lhs.ncols(),
                        rhs.nrows(),
                        rhs.ncols()
                    )));
                }
                let mut prod = &lhs * &rhs;
                // Keep 1-D results in column orientation.
                if self.shape().ndim() == 1 && prod.nrows() == 1 && prod.ncols() > 1 {
                    prod = prod.transpose();
                }
                Ok(prod)
            }
            Expr::Sum(a, axis) => {
                let base = a.value_dense()?;
                match axis {
                    Some(0) if a.shape().ndim() > 1 => {
                        Ok(DMatrix::from_fn(base.ncols(), 1, |j, _| base.column(j).sum()))
                    }
                    Some(_) if a.shape().ndim() > 1 => {
                        Ok(DMatrix::from_fn(base.nrows(), 1, |i, _| base.row(i).sum()))
                    }
                    _ => Ok(DMatrix::from_element(1, 1, base.sum())),
                }
            }
            Expr::Reshape(a, shape) => {
                let base = a.value_dense()?;
                if base.nrows() * base.ncols() != shape.size() {
                    return Err(CvxError::ShapeMismatch {
                        expected: shape.to_string(),
                        got: format!("({}, {})", base.nrows(), base.ncols()),
                    });
                }
                // Column-major reinterpretation, matching the symbolic atom.
                Ok(DMatrix::from_iterator(
                    shape.rows(),
                    shape.cols(),
                    base.iter().copied(),
                ))
            }
            Expr::Index(a, spec) => {
                let base = a.value_dense()?;
                index_dense(&base, spec)
            }
            Expr::Transpose(a) => Ok(a.value_dense()?.transpose()),
            Expr::Trace(a) => {
                let base = a.value_dense()?;
                let n = base.nrows().min(base.ncols());
                let mut total = 0.0;
                for i in 0..n {
                    total += base[(i, i)];
                }
                Ok(DMatrix::from_element(1, 1, total))
            }

            Expr::Exp(a) => Ok(a.value_dense()?.map(f64::exp)),
            Expr::Log(a) => Ok(a.value_dense()?.map(f64::ln)),
            Expr::Power(a, p) => {
                let p = *p;
                Ok(a.value_dense()?.map(|v| v.powf(p)))
            }
            Expr::QuadOverLin(a, b) => {
                let x = a.value_dense()?;
                let y = b.value_dense()?;
                if y.nrows() != 1 || y.ncols() != 1 {
                    return Err(CvxError::ShapeMismatch {
                        expected: "(1, 1)".to_string(),
                        got: format!("({}, {})", y.nrows(), y.ncols()),
                    });
                }
                let num: f64 = x.iter().map(|v| v * v).sum();
                Ok(DMatrix::from_element(1, 1, num / y[(0, 0)]))
            }
        }
    }
}

/// Elementwise binary op with scalar broadcasting.
///
/// Shapes must match exactly, or one operand must be 1x1.
fn broadcast_binary(
    a: &DMatrix<f64>,
    b: &DMatrix<f64>,
    op: impl Fn(f64, f64) -> f64,
) -> Result<DMatrix<f64>> {
    if a.nrows() == b.nrows() && a.ncols() == b.ncols() {
        Ok(DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| {
            op(a[(i, j)], b[(i, j)])
        }))
    } else if a.nrows() == 1 && a.ncols() == 1 {
        let s = a[(0, 0)];
        Ok(b.map(|v| op(s, v)))
    } else if b.nrows() == 1 && b.ncols() == 1 {
        let s = b[(0, 0)];
        Ok(a.map(|v| op(v, s)))
    } else {
        Err(CvxError::ShapeMismatch {
            expected: format!("({}, {})", a.nrows(), a.ncols()),
            got: format!("({}, {})", b.nrows(), b.ncols()),
        })
    }
}

fn index_dense(base: &DMatrix<f64>, spec: &crate::expr::IndexSpec) -> Result<DMatrix<f64>> {
    match spec.ranges.len() {
        // Flat indexing in column-major order.
        1 => {
            let total = base.nrows() * base.ncols();
            let (start, stop, step) = spec.ranges[0].unwrap_or((0, total, 1));
            if stop > total {
                return Err(CvxError::DimensionMismatch(format!(
                    "index range {}..{} out of bounds for {} elements",
                    start, stop, total
                )));
            }
            let values: Vec<f64> = (start..stop)
                .step_by(step.max(1))
                .map(|flat| base[(flat % base.nrows(), flat / base.nrows())])
                .collect();
            let n = values.len();
            Ok(DMatrix::from_vec(n, 1, values))
        }
        // Row range and column range.
        _ => {
            let (r0, r1, rs) = spec.ranges[0].unwrap_or((0, base.nrows(), 1));
            let (c0, c1, cs) = spec
                .ranges
                .get(1)
                .copied()
                .flatten()
                .unwrap_or((0, base.ncols(), 1));
            if r1 > base.nrows() || c1 > base.ncols() {
                return Err(CvxError::DimensionMismatch(format!(
                    "index ranges {}..{}, {}..{} out of bounds for ({}, {})",
                    r0,
                    r1,
                    c0,
                    c1,
                    base.nrows(),
                    base.ncols()
                )));
            }
            let rows: Vec<usize> = (r0..r1).step_by(rs.max(1)).collect();
            let cols: Vec<usize> = (c0..c1).step_by(cs.max(1)).collect();
            Ok(DMatrix::from_fn(rows.len(), cols.len(), |i, j| {
                base[(rows[i], cols[j])]
            }))
        }
    }
}

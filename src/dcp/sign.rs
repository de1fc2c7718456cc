//! Sign tracking for DCP (Disciplined Convex Programming).
//!
//! This module tracks whether expressions are non-negative, non-positive,
//! or have unknown sign. Sign information is used in DCP composition rules
//! and to decide whether an expression is a valid geometric-program term.

use crate::expr::Expr;

/// Sign of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Expression is always >= 0.
    Nonnegative,
    /// Expression is always <= 0.
    Nonpositive,
    /// Expression is always == 0.
    Zero,
    /// Sign is unknown.
    Unknown,
}

impl Sign {
    /// Check if the sign is non-negative (>= 0).
    pub fn is_nonneg(self) -> bool {
        matches!(self, Sign::Nonnegative | Sign::Zero)
    }

    /// Check if the sign is non-positive (<= 0).
    pub fn is_nonpos(self) -> bool {
        matches!(self, Sign::Nonpositive | Sign::Zero)
    }

    /// Check if the sign is zero.
    pub fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }

    /// Negate the sign.
    pub fn negate(self) -> Self {
        match self {
            Sign::Nonnegative => Sign::Nonpositive,
            Sign::Nonpositive => Sign::Nonnegative,
            Sign::Zero => Sign::Zero,
            Sign::Unknown => Sign::Unknown,
        }
    }
}

/// Combine signs for addition: a + b.
pub fn add_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        // Zero doesn't change sign
        (Zero, x) | (x, Zero) => x,
        // Same signs combine
        (Nonnegative, Nonnegative) => Nonnegative,
        (Nonpositive, Nonpositive) => Nonpositive,
        // Different signs -> unknown
        (Nonnegative, Nonpositive) | (Nonpositive, Nonnegative) => Unknown,
        // Unknown propagates
        (Unknown, _) | (_, Unknown) => Unknown,
    }
}

/// Combine signs for multiplication: a * b.
pub fn mul_sign(a: Sign, b: Sign) -> Sign {
    use Sign::*;
    match (a, b) {
        // Zero times anything is zero
        (Zero, _) | (_, Zero) => Zero,
        // Same sign -> nonnegative
        (Nonnegative, Nonnegative) | (Nonpositive, Nonpositive) => Nonnegative,
        // Different signs -> nonpositive
        (Nonnegative, Nonpositive) | (Nonpositive, Nonnegative) => Nonpositive,
        // Unknown propagates
        (Unknown, _) | (_, Unknown) => Unknown,
    }
}

impl Expr {
    /// Get the sign of this expression.
    pub fn sign(&self) -> Sign {
        match self {
            // Leaves
            Expr::Variable(v) => {
                if v.nonneg {
                    Sign::Nonnegative
                } else if v.nonpos {
                    Sign::Nonpositive
                } else {
                    Sign::Unknown
                }
            }
            Expr::Constant(c) => {
                if c.value.is_nonneg() && c.value.is_nonpos() {
                    Sign::Zero
                } else if c.value.is_nonneg() {
                    Sign::Nonnegative
                } else if c.value.is_nonpos() {
                    Sign::Nonpositive
                } else {
                    Sign::Unknown
                }
            }

            // Affine operations
            Expr::Add(a, b) => add_sign(a.sign(), b.sign()),
            Expr::Neg(a) => a.sign().negate(),
            Expr::Mul(a, b) => mul_sign(a.sign(), b.sign()),
            Expr::Div(a, b) => {
                // x / 0 is undefined, so a zero divisor gives no information
                let bs = b.sign();
                if bs.is_zero() {
                    Sign::Unknown
                } else {
                    mul_sign(a.sign(), bs)
                }
            }
            Expr::MatMul(a, b) => {
                // Matrix multiplication sign is complex; be conservative
                let as_ = a.sign();
                let bs = b.sign();
                if as_.is_zero() || bs.is_zero() {
                    Sign::Zero
                } else if (as_.is_nonneg() && bs.is_nonneg()) || (as_.is_nonpos() && bs.is_nonpos())
                {
                    Sign::Nonnegative
                } else {
                    Sign::Unknown
                }
            }
            Expr::Sum(a, _) => a.sign(),
            Expr::Reshape(a, _) => a.sign(),
            Expr::Index(a, _) => a.sign(),
            Expr::Transpose(a) => a.sign(),
            Expr::Trace(a) => a.sign(),

            // Nonlinear atoms
            Expr::Exp(_) => Sign::Nonnegative, // exp(x) > 0 always
            Expr::Log(_) => {
                // log(x) is positive for x > 1 and negative for x < 1
                // Conservative: Unknown
                Sign::Unknown
            }
            Expr::Power(x, p) => {
                // x^p for p != 0 is nonneg when x is nonneg (and x > 0 for p < 0)
                if *p == 0.0 {
                    // x^0 = 1
                    Sign::Nonnegative
                } else if x.sign().is_nonneg() {
                    Sign::Nonnegative
                } else {
                    Sign::Unknown
                }
            }
            Expr::QuadOverLin(_, _) => Sign::Nonnegative,
        }
    }

    /// Check if this expression is non-negative.
    pub fn is_nonneg(&self) -> bool {
        self.sign().is_nonneg()
    }

    /// Check if this expression is non-positive.
    pub fn is_nonpos(&self) -> bool {
        self.sign().is_nonpos()
    }
}

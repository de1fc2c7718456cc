//! Variable expression constructors.

use super::expression::{Expr, ExprId, VariableData};
use super::shape::Shape;

/// Create a variable with the given shape.
///
/// # Example
/// ```
/// use cvxgraph::expr::variable;
/// let x = variable(());       // scalar
/// let v = variable(5);        // vector of length 5
/// let m = variable((4, 4));   // 4x4 matrix
/// ```
pub fn variable(shape: impl Into<Shape>) -> Expr {
    Expr::Variable(VariableData {
        id: ExprId::new(),
        shape: shape.into(),
        name: None,
        nonneg: false,
        nonpos: false,
    })
}

/// Create a variable builder for setting attributes.
pub fn variable_builder(shape: impl Into<Shape>) -> VariableBuilder {
    VariableBuilder {
        shape: shape.into(),
        name: None,
        nonneg: false,
        nonpos: false,
    }
}

/// Builder for variables with attributes.
#[derive(Debug, Clone)]
pub struct VariableBuilder {
    shape: Shape,
    name: Option<String>,
    nonneg: bool,
    nonpos: bool,
}

impl VariableBuilder {
    /// Set the variable's name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Constrain the variable to be non-negative (x >= 0).
    pub fn nonneg(mut self) -> Self {
        self.nonneg = true;
        self.nonpos = false; // Can't be both
        self
    }

    /// Constrain the variable to be non-positive (x <= 0).
    pub fn nonpos(mut self) -> Self {
        self.nonpos = true;
        self.nonneg = false; // Can't be both
        self
    }

    /// Build the variable expression.
    pub fn build(self) -> Expr {
        Expr::Variable(VariableData {
            id: ExprId::new(),
            shape: self.shape,
            name: self.name,
            nonneg: self.nonneg,
            nonpos: self.nonpos,
        })
    }
}

/// Create a named variable with the given shape.
pub fn named_variable(name: impl Into<String>, shape: impl Into<Shape>) -> Expr {
    variable_builder(shape).name(name).build()
}

/// Create a non-negative variable with the given shape.
pub fn nonneg_variable(shape: impl Into<Shape>) -> Expr {
    variable_builder(shape).nonneg().build()
}

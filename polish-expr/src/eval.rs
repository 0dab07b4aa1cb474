//! Numeric evaluation of expression trees.

use crate::expr::Expr;

impl Expr {
    /// Evaluates the expression with the given values for `x`, `y`, and `z`.
    ///
    /// See [`Expr::evaluate_with`].
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate_with([x, y, z])
    }

    /// Evaluates the expression, binding each variable to `bindings[var.index()]`.
    ///
    /// Operands are evaluated left to right before the operation they belong to. There are no
    /// domain checks: division by zero, the logarithm of zero, and so on produce `inf` or `NaN`,
    /// which then propagate through the rest of the evaluation.
    pub fn evaluate_with(&self, bindings: [f64; 3]) -> f64 {
        let mut values = Vec::new();

        for node in self.post_order_iter() {
            let value = match node {
                Expr::Const(value) => *value,
                Expr::Var(var) => bindings[var.index()],
                Expr::Op(op) => {
                    // the operands are the most recently computed values, in order
                    let operands = values.split_off(values.len() - op.args().len());
                    op.kind().eval(&operands)
                },
            };
            values.push(value);
        }

        values.pop().expect("a tree has at least one node")
    }
}

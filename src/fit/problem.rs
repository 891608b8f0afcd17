//! The 5PL least-squares problem handed to the Levenberg–Marquardt solver.
//!
//! Residuals are `f(x_i; p) - y_i`; each Jacobian row comes from
//! [`fill_gradient`]. The problem also counts residual evaluations and refuses
//! to produce more than its budget, which stops the solver exactly there.

use std::cell::Cell;

use levenberg_marquardt::LeastSquaresProblem;
use nalgebra::{DVector, Dyn, OMatrix, Owned, U5, Vector5};

use crate::models::{fill_gradient, logistic_5pl};

pub struct Logistic5Problem<'a> {
    x: &'a [f64],
    y: &'a [f64],
    params: Vector5<f64>,
    budget: usize,
    evaluations: Cell<usize>,
}

impl<'a> Logistic5Problem<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64], p0: [f64; 5], budget: usize) -> Self {
        Self {
            x,
            y,
            params: Vector5::from(p0),
            budget,
            evaluations: Cell::new(0),
        }
    }

    pub fn params_array(&self) -> [f64; 5] {
        self.params.into()
    }

    /// Residual evaluations so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.get()
    }

    /// True once the evaluation budget is spent; further residuals are refused.
    pub fn budget_exhausted(&self) -> bool {
        self.evaluations.get() >= self.budget
    }
}

impl LeastSquaresProblem<f64, Dyn, U5> for Logistic5Problem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U5>;
    type ParameterStorage = Owned<f64, U5>;

    fn set_params(&mut self, params: &Vector5<f64>) {
        self.params.copy_from(params);
    }

    fn params(&self) -> Vector5<f64> {
        self.params
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let used = self.evaluations.get();
        if used >= self.budget {
            return None;
        }
        self.evaluations.set(used + 1);

        let p = self.params_array();
        Some(DVector::from_iterator(
            self.x.len(),
            self.x.iter().zip(self.y).map(|(&x, &y)| logistic_5pl(x, &p) - y),
        ))
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U5>> {
        let p = self.params_array();
        let mut jac = OMatrix::<f64, Dyn, U5>::zeros(self.x.len());
        let mut row = [0.0; 5];

        for (i, &x) in self.x.iter().enumerate() {
            fill_gradient(x, &p, &mut row);
            for (j, &v) in row.iter().enumerate() {
                jac[(i, j)] = v;
            }
        }

        jac.iter().all(|v| v.is_finite()).then_some(jac)
    }
}

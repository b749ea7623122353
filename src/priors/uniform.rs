use super::PriorTrait;
use crate::error::TransitError;
use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Flat prior on the open interval `(a, b)`
#[derive(Debug, Clone, PartialEq)]
pub struct UniformPrior {
    a: f64,
    b: f64,
    /// `ln(1 / (b - a))`
    ln_c: f64,
}

impl UniformPrior {
    /// Requires finite `a < b` with a representable width `b - a`.
    pub fn new(a: f64, b: f64) -> Result<Self, TransitError> {
        if !(a.is_finite() && b.is_finite()) || a >= b {
            return Err(TransitError::InvalidPrior(format!(
                "uniform requires finite a < b, got a = {}, b = {}",
                a, b
            )));
        }
        if !(b - a).is_finite() {
            return Err(TransitError::InvalidPrior(format!(
                "uniform width b - a overflows, got a = {}, b = {}",
                a, b
            )));
        }
        Ok(Self {
            a,
            b,
            ln_c: -(b - a).ln(),
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl PriorTrait for UniformPrior {
    fn log_density(&self, x: f64) -> f64 {
        if self.a < x && x < self.b {
            self.ln_c
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Draws from `[a, b)`.
    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        let dist = Uniform::new(self.a, self.b);
        Array1::from_shape_fn(n, |_| dist.sample(rng))
    }
}

use super::PriorTrait;
use crate::error::TransitError;
use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Scale-invariant prior, density `1 / (x ln(x1/x0))` on `(x0, x1)`
#[derive(Debug, Clone, PartialEq)]
pub struct JeffreysPrior {
    x0: f64,
    x1: f64,
    /// `ln(x1 / x0)`
    ln_ratio: f64,
}

impl JeffreysPrior {
    /// Requires finite `0 < x0 < x1`.
    pub fn new(x0: f64, x1: f64) -> Result<Self, TransitError> {
        if !(x0 > 0.0 && x0 < x1 && x1.is_finite()) {
            return Err(TransitError::InvalidPrior(format!(
                "jeffreys requires 0 < x0 < x1 < inf, got x0 = {}, x1 = {}",
                x0, x1
            )));
        }
        // Difference of logs, x1 / x0 itself can overflow
        let ln_ratio = x1.ln() - x0.ln();
        if !(ln_ratio.is_finite() && ln_ratio > 0.0) {
            return Err(TransitError::InvalidPrior(format!(
                "jeffreys requires a finite positive ln(x1 / x0), got {} for x0 = {}, x1 = {}",
                ln_ratio, x0, x1
            )));
        }
        Ok(Self { x0, x1, ln_ratio })
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    /// Probability density, zero outside `(x0, x1)`
    pub fn density(&self, x: f64) -> f64 {
        if self.x0 < x && x < self.x1 {
            1.0 / (x * self.ln_ratio)
        } else {
            0.0
        }
    }
}

impl PriorTrait for JeffreysPrior {
    fn log_density(&self, x: f64) -> f64 {
        if self.x0 < x && x < self.x1 {
            -(x.ln() + self.ln_ratio.ln())
        } else {
            f64::NEG_INFINITY
        }
    }

    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        let dist = Uniform::new(self.x0.ln(), self.x1.ln());
        Array1::from_shape_fn(n, |_| dist.sample(rng).exp())
    }
}

use super::PriorTrait;
use crate::error::TransitError;
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Gaussian prior
#[derive(Debug, Clone)]
pub struct NormalPrior {
    mean: f64,
    std: f64,
    /// `ln(1 / sqrt(2π σ²))`
    ln_norm: f64,
    /// `1 / (2σ²)`
    inv_two_var: f64,
    dist: Normal<f64>,
}

impl NormalPrior {
    /// Requires a finite mean and a finite, strictly positive `std`.
    pub fn new(mean: f64, std: f64) -> Result<Self, TransitError> {
        if !mean.is_finite() {
            return Err(TransitError::InvalidPrior(format!(
                "normal mean must be finite, got {}",
                mean
            )));
        }
        if !std.is_finite() || std <= 0.0 {
            return Err(TransitError::InvalidPrior(format!(
                "normal std must be finite and > 0, got {}",
                std
            )));
        }
        let dist = Normal::new(mean, std)
            .map_err(|e| TransitError::InvalidPrior(format!("normal: {}", e)))?;

        let var = std * std;
        Ok(Self {
            mean,
            std,
            ln_norm: (1.0 / (2.0 * PI * var).sqrt()).ln(),
            inv_two_var: 1.0 / (2.0 * var),
            dist,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

impl PartialEq for NormalPrior {
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean && self.std == other.std
    }
}

impl PriorTrait for NormalPrior {
    fn log_density(&self, x: f64) -> f64 {
        self.ln_norm - self.inv_two_var * (x - self.mean).powi(2)
    }

    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        Array1::from_shape_fn(n, |_| self.dist.sample(rng))
    }
}

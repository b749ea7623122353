use super::PriorTrait;
use crate::error::TransitError;
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Gamma};
use statrs::function::gamma::ln_gamma;

/// Unit-rate gamma prior with shape `a`
///
/// `ln p(x) = -lnΓ(a) + (a - 1) ln x - x` for `x > 0`. Non-positive `x` is
/// outside the support and evaluates to `-inf` rather than NaN.
#[derive(Debug, Clone)]
pub struct GammaPrior {
    a: f64,
    /// `-lnΓ(a)`
    ln_norm: f64,
    dist: Gamma<f64>,
}

impl GammaPrior {
    /// Requires a finite shape `a > 0`.
    pub fn new(a: f64) -> Result<Self, TransitError> {
        if !a.is_finite() || a <= 0.0 {
            return Err(TransitError::InvalidPrior(format!(
                "gamma shape must be finite and > 0, got {}",
                a
            )));
        }
        let dist =
            Gamma::new(a, 1.0).map_err(|e| TransitError::InvalidPrior(format!("gamma: {}", e)))?;
        Ok(Self {
            a,
            ln_norm: -ln_gamma(a),
            dist,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }
}

impl PartialEq for GammaPrior {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a
    }
}

impl PriorTrait for GammaPrior {
    fn log_density(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        self.ln_norm + (self.a - 1.0) * x.ln() - x
    }

    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        Array1::from_shape_fn(n, |_| self.dist.sample(rng))
    }
}

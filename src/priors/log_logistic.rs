use super::PriorTrait;
use crate::error::TransitError;
use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Lower end of the log-logistic support
pub const LOG_LOGISTIC_LOW: f64 = 1e-3;
/// Upper end of the log-logistic support
pub const LOG_LOGISTIC_HIGH: f64 = 1.0;

/// Log-logistic prior with scale `a` and shape `b`
///
/// The support is fixed to `(1e-3, 1)` whatever the values of `a` and `b`, and
/// sampling draws uniformly from that range rather than from the log-logistic
/// law itself. Both choices follow the transit-fitting convention this prior
/// is used for (e.g. for limb-darkening or radius-ratio-like quantities).
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogisticPrior {
    a: f64,
    b: f64,
    /// `ln(b / a)`
    ln_b_over_a: f64,
}

impl LogLogisticPrior {
    /// Requires finite `a > 0` and `b > 0`.
    pub fn new(a: f64, b: f64) -> Result<Self, TransitError> {
        if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
            return Err(TransitError::InvalidPrior(format!(
                "log-logistic requires finite a > 0 and b > 0, got a = {}, b = {}",
                a, b
            )));
        }
        Ok(Self {
            a,
            b,
            ln_b_over_a: (b / a).ln(),
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

impl PriorTrait for LogLogisticPrior {
    fn log_density(&self, x: f64) -> f64 {
        if !(LOG_LOGISTIC_LOW < x && x < LOG_LOGISTIC_HIGH) {
            return f64::NEG_INFINITY;
        }
        let z = x / self.a;
        self.ln_b_over_a + (self.b - 1.0) * z.ln() - 2.0 * z.powf(self.b).ln_1p()
    }

    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        let dist = Uniform::new(LOG_LOGISTIC_LOW, LOG_LOGISTIC_HIGH);
        Array1::from_shape_fn(n, |_| dist.sample(rng))
    }
}

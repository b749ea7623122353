//! # Prior distributions
//!
//! Every parameter carries a [`Prior`]: a one-dimensional distribution that can
//! evaluate its natural-log density and draw random variates.
//!
//! The set of distributions is closed:
//!
//! - [`DefaultPrior`]: improper flat prior, log-density 0 everywhere
//! - [`NormalPrior`]: Gaussian with mean and standard deviation
//! - [`UniformPrior`]: flat on `(a, b)`
//! - [`JeffreysPrior`]: `∝ 1/x` on `(x0, x1)`
//! - [`LogLogisticPrior`]: log-logistic shape restricted to `(1e-3, 1)`
//! - [`GammaPrior`]: unit-rate gamma with shape `a`
//!
//! Normalisation constants are computed once in the constructors so that the
//! density is cheap to evaluate inside a sampler loop.
//!
//! ```rust
//! use transit_params::priors::{Prior, PriorTrait};
//!
//! let prior = Prior::uniform(0.0, 2.0).unwrap();
//! assert_eq!(prior.log_density(1.0), (0.5f64).ln());
//! assert_eq!(prior.log_density(3.0), f64::NEG_INFINITY);
//! ```

mod gamma;
mod jeffreys;
mod log_logistic;
mod normal;
mod uniform;

pub use gamma::GammaPrior;
pub use jeffreys::JeffreysPrior;
pub use log_logistic::LogLogisticPrior;
pub use normal::NormalPrior;
pub use uniform::UniformPrior;

use crate::error::TransitError;
use ndarray::{Array1, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Log-density evaluation and sampling for a scalar parameter.
pub trait PriorTrait {
    /// Natural logarithm of the density at `x`, `-inf` outside the support.
    fn log_density(&self, x: f64) -> f64;

    /// Draw `n` independent variates.
    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64>;

    /// Elementwise [`PriorTrait::log_density`].
    fn log_density_array(&self, x: ArrayView1<f64>) -> Array1<f64> {
        x.mapv(|v| self.log_density(v))
    }
}

/// Improper flat prior.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DefaultPrior;

impl PriorTrait for DefaultPrior {
    fn log_density(&self, _x: f64) -> f64 {
        0.0
    }

    fn sample<R: Rng + ?Sized>(&self, n: usize, _rng: &mut R) -> Array1<f64> {
        Array1::zeros(n)
    }
}

/// Prior distribution of a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PriorSpec", into = "PriorSpec")]
pub enum Prior {
    Default(DefaultPrior),
    Normal(NormalPrior),
    Uniform(UniformPrior),
    Jeffreys(JeffreysPrior),
    LogLogistic(LogLogisticPrior),
    Gamma(GammaPrior),
}

impl Default for Prior {
    fn default() -> Self {
        Prior::Default(DefaultPrior)
    }
}

impl Prior {
    pub fn normal(mean: f64, std: f64) -> Result<Self, TransitError> {
        NormalPrior::new(mean, std).map(Prior::Normal)
    }

    pub fn uniform(a: f64, b: f64) -> Result<Self, TransitError> {
        UniformPrior::new(a, b).map(Prior::Uniform)
    }

    pub fn jeffreys(x0: f64, x1: f64) -> Result<Self, TransitError> {
        JeffreysPrior::new(x0, x1).map(Prior::Jeffreys)
    }

    pub fn log_logistic(a: f64, b: f64) -> Result<Self, TransitError> {
        LogLogisticPrior::new(a, b).map(Prior::LogLogistic)
    }

    pub fn gamma(a: f64) -> Result<Self, TransitError> {
        GammaPrior::new(a).map(Prior::Gamma)
    }

    /// `true` for the improper flat prior
    pub fn is_default(&self) -> bool {
        matches!(self, Prior::Default(_))
    }
}

impl PriorTrait for Prior {
    fn log_density(&self, x: f64) -> f64 {
        match self {
            Prior::Default(p) => p.log_density(x),
            Prior::Normal(p) => p.log_density(x),
            Prior::Uniform(p) => p.log_density(x),
            Prior::Jeffreys(p) => p.log_density(x),
            Prior::LogLogistic(p) => p.log_density(x),
            Prior::Gamma(p) => p.log_density(x),
        }
    }

    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        match self {
            Prior::Default(p) => p.sample(n, rng),
            Prior::Normal(p) => p.sample(n, rng),
            Prior::Uniform(p) => p.sample(n, rng),
            Prior::Jeffreys(p) => p.sample(n, rng),
            Prior::LogLogistic(p) => p.sample(n, rng),
            Prior::Gamma(p) => p.sample(n, rng),
        }
    }
}

impl fmt::Display for Prior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prior::Default(_) => write!(f, "Default()"),
            Prior::Normal(p) => write!(f, "N(μ = {}, σ = {})", p.mean(), p.std()),
            Prior::Uniform(p) => write!(f, "U(a = {}, b = {})", p.a(), p.b()),
            Prior::Jeffreys(p) => write!(f, "J(x0 = {}, x1 = {})", p.x0(), p.x1()),
            Prior::LogLogistic(p) => write!(f, "LL(a = {}, b = {})", p.a(), p.b()),
            Prior::Gamma(p) => write!(f, "Γ(a = {})", p.a()),
        }
    }
}

/// Serialized form of a [`Prior`]: the defining parameters only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PriorSpec {
    Default,
    Normal { mean: f64, std: f64 },
    Uniform { a: f64, b: f64 },
    Jeffreys { x0: f64, x1: f64 },
    LogLogistic { a: f64, b: f64 },
    Gamma { a: f64 },
}

impl From<Prior> for PriorSpec {
    fn from(prior: Prior) -> Self {
        match prior {
            Prior::Default(_) => PriorSpec::Default,
            Prior::Normal(p) => PriorSpec::Normal {
                mean: p.mean(),
                std: p.std(),
            },
            Prior::Uniform(p) => PriorSpec::Uniform { a: p.a(), b: p.b() },
            Prior::Jeffreys(p) => PriorSpec::Jeffreys {
                x0: p.x0(),
                x1: p.x1(),
            },
            Prior::LogLogistic(p) => PriorSpec::LogLogistic { a: p.a(), b: p.b() },
            Prior::Gamma(p) => PriorSpec::Gamma { a: p.a() },
        }
    }
}

impl TryFrom<PriorSpec> for Prior {
    type Error = TransitError;

    fn try_from(spec: PriorSpec) -> Result<Self, Self::Error> {
        match spec {
            PriorSpec::Default => Ok(Prior::default()),
            PriorSpec::Normal { mean, std } => Prior::normal(mean, std),
            PriorSpec::Uniform { a, b } => Prior::uniform(a, b),
            PriorSpec::Jeffreys { x0, x1 } => Prior::jeffreys(x0, x1),
            PriorSpec::LogLogistic { a, b } => Prior::log_logistic(a, b),
            PriorSpec::Gamma { a } => Prior::gamma(a),
        }
    }
}

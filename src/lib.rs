//! # transit-params
//!
//! `transit-params` is the parameter core of a Bayesian exoplanet transit
//! light curve fit: named parameters with priors, bounds and scopes, organised
//! into global, per-passband and per-light-curve blocks, with vectorised
//! log-prior evaluation and prior sampling.
//!
//! The library provides:
//! - A closed set of priors (normal, uniform, Jeffreys, log-logistic, gamma)
//! - An ordered, freezable parameter set defining the layout of the model vector
//! - Batch log-prior evaluation over `ndarray` matrices
//! - Structural validation of passband parameter naming
//! - A log-posterior trait for plugging in an external transit model
//! - The orbit parameterisation of transit timing variation fits
//!
//! ## Basic Usage
//!
//! ```
//! use ndarray::array;
//! use rand::SeedableRng;
//! use transit_params::parameters::{Parameter, ParameterSet};
//! use transit_params::priors::Prior;
//!
//! let mut ps = ParameterSet::new();
//! ps.add_global_block(
//!     "orbit",
//!     vec![Parameter::global("b", "impact_parameter", "R_s", Prior::uniform(0.0, 1.0)?, (0.0, 1.0))?],
//! )?;
//! ps.add_lightcurve_block(
//!     "error",
//!     1,
//!     2,
//!     vec![
//!         Parameter::local("e_0", "log10_error", "", Prior::uniform(-4.0, 0.0)?, (-4.0, 0.0))?,
//!         Parameter::local("e_1", "log10_error", "", Prior::uniform(-4.0, 0.0)?, (-4.0, 0.0))?,
//!     ],
//! )?;
//! ps.freeze();
//!
//! let pvs = array![[0.5, -2.0, -3.0], [1.5, -2.0, -3.0]];
//! let lnp = ps.log_prior_batch(&pvs)?;
//! assert!(lnp[0].is_finite());
//! assert_eq!(lnp[1], f64::NEG_INFINITY);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let population = ps.sample_from_prior(10, &mut rng);
//! assert_eq!(population.dim(), (10, 3));
//! # Ok::<(), transit_params::TransitError>(())
//! ```

// Public modules
pub mod error;

// Prior distributions
pub mod priors;

// Parameter system
pub mod parameters;

// Log posterior functions
pub mod lpf;

// Re-exports for convenience
pub use error::{Result, TransitError};
pub use lpf::LogPosterior;
pub use parameters::{Parameter, ParameterSet, Scope};
pub use priors::Prior;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

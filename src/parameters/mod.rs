//! # Parameter System
//!
//! This module provides the parameter system of a transit fit: named parameters
//! with priors, bounds and scopes, grouped into blocks inside an ordered
//! [`ParameterSet`] that defines the layout of the model parameter vector.
//!
//! ## Core Components
//!
//! - [`Parameter`]: a named scalar with description, unit, prior, bounds and [`Scope`]
//! - [`Bounds`]: the `(low, high)` interval of a parameter
//! - [`ParameterBlock`]: a named contiguous range of positions, optionally split
//!   per passband or per light curve
//! - [`ParameterSet`]: the ordered collection, with freezing, vectorised log-prior
//!   evaluation, validation and prior sampling
//!
//! ## Example Usage
//!
//! ```rust
//! use ndarray::array;
//! use transit_params::parameters::{Parameter, ParameterSet};
//! use transit_params::priors::Prior;
//!
//! let mut ps = ParameterSet::new();
//!
//! // Global physical parameters
//! ps.add_global_block(
//!     "orbit",
//!     vec![
//!         Parameter::global("rho", "stellar_density", "g/cm^3", Prior::uniform(0.1, 25.0).unwrap(), (0.0, f64::INFINITY)).unwrap(),
//!         Parameter::global("b", "impact_parameter", "R_s", Prior::uniform(0.0, 1.0).unwrap(), (0.0, 1.0)).unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! // One radius ratio per passband
//! ps.add_passband_block(
//!     "k2",
//!     1,
//!     2,
//!     vec![
//!         Parameter::passband("k2_g", "area_ratio", "A_s", Prior::uniform(0.001, 0.04).unwrap(), (0.001, 0.04)).unwrap(),
//!         Parameter::passband("k2_r", "area_ratio", "A_s", Prior::uniform(0.001, 0.04).unwrap(), (0.001, 0.04)).unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! ps.validate().unwrap();
//! ps.freeze();
//!
//! let lnp = ps.log_prior(&array![2.0, 0.3, 0.01, 0.012]).unwrap();
//! assert!(lnp.is_finite());
//! assert_eq!(ps.find_pid("k2_r").unwrap(), 3);
//! ```

pub mod block;
pub mod bounds;
pub mod parameter;
pub mod parameter_set;
pub mod validation;


// Re-export key types
pub use block::{BlockKind, ParameterBlock};
pub use bounds::{Bounds, BoundsError};
pub use parameter::{Parameter, Scope};
pub use parameter_set::{LogPrior, ParameterSet};
pub use validation::{split_passband_name, PASSBAND_SEPARATOR};

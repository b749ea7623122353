//! Parameter definition and implementation
//!
//! This module provides the Parameter struct, the fundamental building block of
//! the parameter system. A parameter is a named scalar with a description, a
//! unit, a prior, bounds and a scope. Its position in the model parameter
//! vector (`pid`) is assigned when the owning set is frozen.

use crate::error::{Result, TransitError};
use crate::parameters::bounds::Bounds;
use crate::priors::{Prior, PriorTrait};
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How widely a parameter is shared between observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Shared by every light curve
    Global,
    /// Specific to a single light curve
    Local,
    /// Specific to a passband
    Passband,
}

impl Scope {
    /// One-letter tag used in tabular output
    pub fn tag(&self) -> char {
        match self {
            Scope::Global => 'G',
            Scope::Local => 'L',
            Scope::Passband => 'P',
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::Global => "global",
            Scope::Local => "local",
            Scope::Passband => "passband",
        };
        f.write_str(s)
    }
}

/// A model parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterSpec", into = "ParameterSpec")]
pub struct Parameter {
    name: String,
    description: String,
    unit: String,
    prior: Prior,
    bounds: Bounds,
    scope: Scope,
    /// Position in the parameter vector, set when the owning set is frozen
    pid: Option<usize>,
}

/// Persisted form of a [`Parameter`], without its position
#[derive(Serialize, Deserialize)]
struct ParameterSpec {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    prior: Prior,
    #[serde(default)]
    bounds: Bounds,
    scope: Scope,
}

impl From<Parameter> for ParameterSpec {
    fn from(p: Parameter) -> Self {
        Self {
            name: p.name,
            description: p.description,
            unit: p.unit,
            prior: p.prior,
            bounds: p.bounds,
            scope: p.scope,
        }
    }
}

impl TryFrom<ParameterSpec> for Parameter {
    type Error = TransitError;

    fn try_from(spec: ParameterSpec) -> Result<Self> {
        let mut param = Parameter::new(&spec.name, spec.scope)?
            .with_description(&spec.description)
            .with_unit(&spec.unit)
            .with_prior(spec.prior);
        param.bounds = spec.bounds;
        Ok(param)
    }
}

impl Parameter {
    /// Create a new parameter with an improper flat prior and no bounds
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the parameter, must not be empty
    /// * `scope` - Scope of the parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::{Parameter, Scope};
    ///
    /// let param = Parameter::new("k2", Scope::Passband).unwrap();
    /// assert_eq!(param.name(), "k2");
    /// assert_eq!(param.pid(), None);
    /// assert!(Parameter::new("", Scope::Global).is_err());
    /// ```
    pub fn new(name: &str, scope: Scope) -> Result<Self> {
        if name.is_empty() {
            return Err(TransitError::InvalidParameter(
                "parameter name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            unit: String::new(),
            prior: Prior::default(),
            bounds: Bounds::default(),
            scope,
            pid: None,
        })
    }

    /// Create a fully specified global parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::Parameter;
    /// use transit_params::priors::Prior;
    ///
    /// let b = Parameter::global(
    ///     "b",
    ///     "impact_parameter",
    ///     "R_s",
    ///     Prior::uniform(0.0, 1.0).unwrap(),
    ///     (0.0, 1.0),
    /// )
    /// .unwrap();
    /// assert_eq!(b.unit(), "R_s");
    /// ```
    pub fn global(
        name: &str,
        description: &str,
        unit: &str,
        prior: Prior,
        bounds: (f64, f64),
    ) -> Result<Self> {
        Self::with_scope(name, description, unit, prior, bounds, Scope::Global)
    }

    /// Create a fully specified per-light-curve parameter
    pub fn local(
        name: &str,
        description: &str,
        unit: &str,
        prior: Prior,
        bounds: (f64, f64),
    ) -> Result<Self> {
        Self::with_scope(name, description, unit, prior, bounds, Scope::Local)
    }

    /// Create a fully specified per-passband parameter
    pub fn passband(
        name: &str,
        description: &str,
        unit: &str,
        prior: Prior,
        bounds: (f64, f64),
    ) -> Result<Self> {
        Self::with_scope(name, description, unit, prior, bounds, Scope::Passband)
    }

    fn with_scope(
        name: &str,
        description: &str,
        unit: &str,
        prior: Prior,
        bounds: (f64, f64),
        scope: Scope,
    ) -> Result<Self> {
        Self::new(name, scope)?
            .with_description(description)
            .with_unit(unit)
            .with_prior(prior)
            .with_bounds(bounds.0, bounds.1)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_prior(mut self, prior: Prior) -> Self {
        self.prior = prior;
        self
    }

    /// Set the bounds, fails if `low > high`
    pub fn with_bounds(mut self, low: f64, high: f64) -> Result<Self> {
        self.bounds = Bounds::new(low, high)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn prior(&self) -> &Prior {
        &self.prior
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Position in the parameter vector, `None` until the owning set is frozen
    pub fn pid(&self) -> Option<usize> {
        self.pid
    }

    pub(crate) fn set_pid(&mut self, pid: usize) {
        self.pid = Some(pid);
    }

    /// Prior log-density, `-inf` unless `low < v < high`
    ///
    /// The bounds check is strict: values sitting exactly on a bound are
    /// rejected. Note that [`ParameterSet::log_prior`] uses an inclusive check.
    ///
    /// [`ParameterSet::log_prior`]: crate::parameters::ParameterSet::log_prior
    pub fn truncated_log_prior(&self, v: f64) -> f64 {
        if self.bounds.contains_open(v) {
            self.prior.log_density(v)
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Prior log-density without the bounds check
    pub fn log_prior(&self, v: f64) -> f64 {
        self.prior.log_density(v)
    }

    /// Draw `n` values from the prior
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        self.prior.sample(n, rng)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pid = self.pid.map(|p| p as i64).unwrap_or(-1);
        write!(
            f,
            "{:3} |{}| {:10} [{:4.2} .. {:4.2}]",
            pid,
            self.scope.tag(),
            self.name,
            self.bounds.low,
            self.bounds.high
        )
    }
}

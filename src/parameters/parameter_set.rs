//! Parameter set implementation
//!
//! This module provides the [`ParameterSet`] struct: the ordered collection of
//! parameters that defines the layout of the model parameter vector.
//!
//! A set is built by appending blocks of parameters and then frozen. Freezing
//! assigns each parameter its position (`pid`) and caches the bounds of all
//! parameters as an `n × 2` matrix, which the vectorised log-prior uses to
//! reject out-of-bounds vectors. A frozen set refuses all mutation until it is
//! thawed again.
//!
//! A frozen set can be shared between threads for reading. It is not
//! internally synchronised: thawing needs `&mut self`, so a caller holding
//! shared references cannot thaw it concurrently.

use crate::error::{Result, TransitError};
use crate::parameters::block::{BlockKind, ParameterBlock};
use crate::parameters::bounds::Bounds;
use crate::parameters::parameter::{Parameter, Scope};
use crate::priors::Prior;
use log::{debug, trace, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix1, Ix2, IxDyn, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::ops::Index;
use std::path::Path;

/// Result of [`ParameterSet::log_prior_any`]
#[derive(Debug, Clone, PartialEq)]
pub enum LogPrior {
    /// A single parameter vector was evaluated
    Scalar(f64),
    /// A batch of parameter vectors was evaluated, one value per row
    Batch(Array1<f64>),
}

/// An ordered, freezable collection of parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "ParameterSetData", into = "ParameterSetData")]
pub struct ParameterSet {
    parameters: Vec<Parameter>,
    blocks: Vec<ParameterBlock>,
    frozen: bool,
    /// Column 0 holds the lower bounds, column 1 the upper bounds. Only present while frozen.
    bounds: Option<Array2<f64>>,
}

impl ParameterSet {
    /// Create a new empty parameter set
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::ParameterSet;
    ///
    /// let ps = ParameterSet::new();
    /// assert!(ps.is_empty());
    /// assert!(!ps.is_frozen());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unfrozen set without blocks from a list of parameters
    pub fn from_parameters(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    fn ensure_mutable(&self, action: &str) -> Result<()> {
        if self.frozen {
            Err(TransitError::FrozenSet(format!(
                "cannot {} a frozen ParameterSet, thaw it first",
                action
            )))
        } else {
            Ok(())
        }
    }

    /// Append a single parameter
    pub fn append(&mut self, parameter: Parameter) -> Result<()> {
        self.ensure_mutable("append to")?;
        self.parameters.push(parameter);
        Ok(())
    }

    /// Append several parameters
    pub fn extend<I>(&mut self, parameters: I) -> Result<()>
    where
        I: IntoIterator<Item = Parameter>,
    {
        self.ensure_mutable("extend")?;
        self.parameters.extend(parameters);
        Ok(())
    }

    /// Add a block of global parameters
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::{Parameter, ParameterSet, Scope};
    ///
    /// let mut ps = ParameterSet::new();
    /// ps.add_global_block(
    ///     "orbit",
    ///     vec![
    ///         Parameter::new("rho", Scope::Global).unwrap(),
    ///         Parameter::new("b", Scope::Global).unwrap(),
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(ps.block("orbit").unwrap().range(), 0..2);
    /// ```
    pub fn add_global_block(&mut self, name: &str, parameters: Vec<Parameter>) -> Result<()> {
        self.ensure_mutable("add a block to")?;
        let start = self.parameters.len();
        let block = ParameterBlock::global(name, start, start + parameters.len())?;
        self.push_block(block, parameters)
    }

    /// Add a block with `isize` parameters for each of `npb` passbands
    ///
    /// Fails with [`TransitError::Configuration`] unless `parameters.len() == isize * npb`.
    pub fn add_passband_block(
        &mut self,
        name: &str,
        isize: usize,
        npb: usize,
        parameters: Vec<Parameter>,
    ) -> Result<()> {
        self.ensure_mutable("add a block to")?;
        let start = self.parameters.len();
        let block =
            ParameterBlock::passband(name, start, start + parameters.len(), isize, npb).map_err(|e| {
                warn!("rejected passband block '{}': {}", name, e);
                e
            })?;
        self.push_block(block, parameters)
    }

    /// Add a block with `isize` parameters for each of `nlc` light curves
    ///
    /// Fails with [`TransitError::Configuration`] unless `parameters.len() == isize * nlc`.
    pub fn add_lightcurve_block(
        &mut self,
        name: &str,
        isize: usize,
        nlc: usize,
        parameters: Vec<Parameter>,
    ) -> Result<()> {
        self.ensure_mutable("add a block to")?;
        let start = self.parameters.len();
        let block = ParameterBlock::light_curve(name, start, start + parameters.len(), isize, nlc)
            .map_err(|e| {
                warn!("rejected light curve block '{}': {}", name, e);
                e
            })?;
        self.push_block(block, parameters)
    }

    fn push_block(&mut self, block: ParameterBlock, parameters: Vec<Parameter>) -> Result<()> {
        debug!("adding block {} with {} parameters", block, parameters.len());
        self.blocks.push(block);
        self.extend(parameters)
    }

    /// Assign each parameter its position and rebuild the bounds cache
    ///
    /// Fails with [`TransitError::FrozenSet`] on a frozen set.
    pub fn update_indices(&mut self) -> Result<()> {
        self.ensure_mutable("update the indices of")?;
        self.assign_indices();
        Ok(())
    }

    fn assign_indices(&mut self) {
        let mut bounds = Array2::zeros((self.parameters.len(), 2));
        for (i, p) in self.parameters.iter_mut().enumerate() {
            p.set_pid(i);
            bounds[[i, 0]] = p.bounds().low;
            bounds[[i, 1]] = p.bounds().high;
        }
        self.bounds = Some(bounds);
    }

    /// Fix the parameter ordering
    ///
    /// Assigns `pid = position` to every parameter, caches the bounds matrix and
    /// marks the set frozen. Freezing an already frozen set does nothing.
    pub fn freeze(&mut self) {
        if self.frozen {
            return;
        }
        self.assign_indices();
        self.frozen = true;
        debug!(
            "froze parameter set with {} parameters in {} blocks",
            self.parameters.len(),
            self.blocks.len()
        );
    }

    /// Re-enable mutation, dropping the cached bounds
    pub fn thaw(&mut self) {
        if self.frozen {
            debug!("thawed parameter set with {} parameters", self.parameters.len());
        }
        self.frozen = false;
        self.bounds = None;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn cached_bounds(&self, operation: &str) -> Result<&Array2<f64>> {
        match (&self.bounds, self.frozen) {
            (Some(bounds), true) => Ok(bounds),
            _ => Err(TransitError::NotFrozen(format!(
                "{} needs the cached bounds of a frozen ParameterSet",
                operation
            ))),
        }
    }

    /// Cached `n × 2` bounds matrix, lower bounds in column 0
    pub fn bounds(&self) -> Result<ArrayView2<'_, f64>> {
        Ok(self.cached_bounds("bounds")?.view())
    }

    /// Cached lower bounds
    pub fn lower_bounds(&self) -> Result<ArrayView1<'_, f64>> {
        Ok(self.cached_bounds("lower_bounds")?.column(0))
    }

    /// Cached upper bounds
    pub fn upper_bounds(&self) -> Result<ArrayView1<'_, f64>> {
        Ok(self.cached_bounds("upper_bounds")?.column(1))
    }

    /// Log-prior of a single parameter vector
    ///
    /// Returns `-inf` if any component lies outside `[low, high]` (inclusive),
    /// otherwise the sum of the untruncated prior log-densities.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::array;
    /// use transit_params::parameters::{Parameter, ParameterSet};
    /// use transit_params::priors::Prior;
    ///
    /// let mut ps = ParameterSet::new();
    /// ps.add_global_block(
    ///     "orbit",
    ///     vec![Parameter::global("b", "", "", Prior::uniform(0.0, 1.0).unwrap(), (0.0, 1.0)).unwrap()],
    /// )
    /// .unwrap();
    /// ps.freeze();
    ///
    /// assert_eq!(ps.log_prior(&array![0.5]).unwrap(), 0.0);
    /// assert_eq!(ps.log_prior(&array![1.5]).unwrap(), f64::NEG_INFINITY);
    /// ```
    pub fn log_prior<S>(&self, pv: &ArrayBase<S, Ix1>) -> Result<f64>
    where
        S: Data<Elem = f64>,
    {
        if pv.len() != self.parameters.len() {
            return Err(TransitError::DimensionMismatch(format!(
                "expected a parameter vector of length {}, got {}",
                self.parameters.len(),
                pv.len()
            )));
        }
        let batch = pv.view().insert_axis(Axis(0));
        Ok(self.log_prior_batch(&batch)?[0])
    }

    /// Log-prior of every row of a batch of parameter vectors
    pub fn log_prior_batch<S>(&self, pvs: &ArrayBase<S, Ix2>) -> Result<Array1<f64>>
    where
        S: Data<Elem = f64>,
    {
        let bounds = self.cached_bounds("log_prior")?;
        if pvs.ncols() != self.parameters.len() {
            return Err(TransitError::DimensionMismatch(format!(
                "expected {} columns, got {}",
                self.parameters.len(),
                pvs.ncols()
            )));
        }
        trace!("evaluating log prior for {} vectors", pvs.nrows());

        let mut lnp = Array1::zeros(pvs.nrows());
        for (p, column) in self.parameters.iter().zip(pvs.columns()) {
            Zip::from(&mut lnp)
                .and(&column)
                .for_each(|l, &v| *l += p.log_prior(v));
        }

        let lower = bounds.column(0);
        let upper = bounds.column(1);
        Zip::from(&mut lnp).and(pvs.rows()).for_each(|l, row| {
            let inside = row
                .iter()
                .zip(lower.iter())
                .zip(upper.iter())
                .all(|((&v, &lo), &hi)| lo <= v && v <= hi);
            if !inside {
                *l = f64::NEG_INFINITY;
            }
        });

        Ok(lnp)
    }

    /// Log-prior of either a single vector (rank 1) or a batch (rank 2)
    pub fn log_prior_any<S>(&self, pv: &ArrayBase<S, IxDyn>) -> Result<LogPrior>
    where
        S: Data<Elem = f64>,
    {
        let shape_err = |e: ndarray::ShapeError| TransitError::DimensionMismatch(e.to_string());
        match pv.ndim() {
            1 => {
                let pv = pv.view().into_dimensionality::<Ix1>().map_err(shape_err)?;
                self.log_prior(&pv).map(LogPrior::Scalar)
            }
            2 => {
                let pvs = pv.view().into_dimensionality::<Ix2>().map_err(shape_err)?;
                self.log_prior_batch(&pvs).map(LogPrior::Batch)
            }
            n => Err(TransitError::DimensionMismatch(format!(
                "expected a vector or a matrix of parameter vectors, got {} dimensions",
                n
            ))),
        }
    }

    /// Draw `n` parameter vectors from the priors
    ///
    /// Returns an `n × len` matrix whose column `i` holds draws from parameter `i`.
    pub fn sample_from_prior<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<f64> {
        let mut samples = Array2::zeros((n, self.parameters.len()));
        for (p, mut column) in self.parameters.iter().zip(samples.columns_mut()) {
            column.assign(&p.sample(n, rng));
        }
        samples
    }

    /// Position of the parameter called `name`
    pub fn find_pid(&self, name: &str) -> Result<usize> {
        self.parameters
            .iter()
            .position(|p| p.name() == name)
            .ok_or_else(|| TransitError::NotFound(format!("could not find parameter '{}'", name)))
    }

    pub fn names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name()).collect()
    }

    pub fn units(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.unit()).collect()
    }

    pub fn descriptions(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.description()).collect()
    }

    pub fn priors(&self) -> Vec<&Prior> {
        self.parameters.iter().map(|p| p.prior()).collect()
    }

    pub fn scopes(&self) -> Vec<Scope> {
        self.parameters.iter().map(|p| p.scope()).collect()
    }

    /// Bounds of each parameter, available whether or not the set is frozen
    pub fn parameter_bounds(&self) -> Vec<Bounds> {
        self.parameters.iter().map(|p| *p.bounds()).collect()
    }

    fn filtered(&self, scope: Scope) -> ParameterSet {
        ParameterSet::from_parameters(
            self.parameters
                .iter()
                .filter(|p| p.scope() == scope)
                .cloned()
                .collect(),
        )
    }

    /// Unfrozen copy of the global parameters, in order
    pub fn global_parameters(&self) -> ParameterSet {
        self.filtered(Scope::Global)
    }

    /// Unfrozen copy of the per-light-curve parameters, in order
    pub fn local_parameters(&self) -> ParameterSet {
        self.filtered(Scope::Local)
    }

    /// Unfrozen copy of the per-passband parameters, in order
    pub fn passband_parameters(&self) -> ParameterSet {
        self.filtered(Scope::Passband)
    }

    pub fn blocks(&self) -> &[ParameterBlock] {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&ParameterBlock> {
        self.blocks.iter().find(|b| b.name() == name)
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Index<usize> for ParameterSet {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Self::Output {
        &self.parameters[index]
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// Persisted form of a [`ParameterSet`]
///
/// Pids, the frozen flag and the bounds cache are not persisted.
#[derive(Serialize, Deserialize)]
struct ParameterSetData {
    parameters: Vec<Parameter>,
    #[serde(default)]
    blocks: Vec<ParameterBlock>,
}

impl From<ParameterSet> for ParameterSetData {
    fn from(ps: ParameterSet) -> Self {
        Self {
            parameters: ps.parameters,
            blocks: ps.blocks,
        }
    }
}

impl TryFrom<ParameterSetData> for ParameterSet {
    type Error = TransitError;

    fn try_from(data: ParameterSetData) -> Result<Self> {
        // Blocks are rebuilt through their constructors and must tile from zero
        let mut blocks = Vec::with_capacity(data.blocks.len());
        let mut expected_start = 0;
        for b in &data.blocks {
            if b.start() != expected_start || b.stop() > data.parameters.len() {
                return Err(TransitError::Configuration(format!(
                    "block {} does not continue at position {} within {} parameters",
                    b,
                    expected_start,
                    data.parameters.len()
                )));
            }
            let block = match b.kind() {
                BlockKind::Global => {
                    ParameterBlock::global(b.name(), b.start(), b.stop())?
                }
                BlockKind::Passband { isize, npb } => {
                    ParameterBlock::passband(b.name(), b.start(), b.stop(), isize, npb)?
                }
                BlockKind::LightCurve { isize, nlc } => {
                    ParameterBlock::light_curve(b.name(), b.start(), b.stop(), isize, nlc)?
                }
            };
            expected_start = block.stop();
            blocks.push(block);
        }

        Ok(Self {
            parameters: data.parameters,
            blocks,
            frozen: false,
            bounds: None,
        })
    }
}

impl ParameterSet {
    /// Save the parameter set to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Serialize the parameter set to a JSON string
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Load a parameter set from a JSON file, the result is unfrozen
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }

    /// Load a parameter set from a JSON string, the result is unfrozen
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_params::parameters::ParameterSet;
    ///
    /// let json = r#"{
    ///   "parameters": [
    ///     {"name": "b", "scope": "global",
    ///      "prior": {"type": "uniform", "a": 0.0, "b": 1.0},
    ///      "bounds": {"low": 0.0, "high": 1.0}}
    ///   ],
    ///   "blocks": [{"name": "orbit", "start": 0, "stop": 1, "kind": "global"}]
    /// }"#;
    ///
    /// let ps = ParameterSet::from_json(json).unwrap();
    /// assert_eq!(ps.names(), vec!["b"]);
    /// assert!(!ps.is_frozen());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let ps: ParameterSet = serde_json::from_str(json)?;
        Ok(ps)
    }
}

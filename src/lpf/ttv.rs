//! Orbit parameterisation for transit timing variation fits
//!
//! Every light curve gets its own transit centre with a normal prior around
//! the linear-ephemeris prediction. After sampling, the transit-centre
//! posteriors give a mean period estimate and per-transit timing offsets.

use crate::error::{Result, TransitError};
use crate::parameters::{Parameter, ParameterSet};
use crate::priors::Prior;
use log::debug;
use ndarray::{Array1, ArrayBase, ArrayView2, Axis, Data, Ix1};
use ndarray_stats::interpolate::Midpoint;
use ndarray_stats::QuantileExt;
use noisy_float::types::n64;
use serde::{Deserialize, Serialize};
use std::ops::Range;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Linear ephemeris and transit-centre prior width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtvConfig {
    /// Reference transit centre [d]. Default: 0.0
    pub zero_epoch: f64,

    /// Orbital period [d]. Default: 1.0
    pub period: f64,

    /// Standard deviation of the transit-centre priors [d]. Default: 0.01
    pub tc_sigma: f64,
}

impl Default for TtvConfig {
    fn default() -> Self {
        Self {
            zero_epoch: 0.0,
            period: 1.0,
            tc_sigma: 0.01,
        }
    }
}

impl TtvConfig {
    pub fn with_zero_epoch(mut self, zero_epoch: f64) -> Self {
        self.zero_epoch = zero_epoch;
        self
    }

    pub fn with_period(mut self, period: f64) -> Self {
        self.period = period;
        self
    }

    pub fn with_tc_sigma(mut self, tc_sigma: f64) -> Self {
        self.tc_sigma = tc_sigma;
        self
    }

    /// Check that the ephemeris is usable
    pub fn validate(&self) -> Result<()> {
        if !self.zero_epoch.is_finite() {
            return Err(TransitError::Configuration(format!(
                "zero epoch must be finite, got {}",
                self.zero_epoch
            )));
        }
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(TransitError::Configuration(format!(
                "period must be positive, got {}",
                self.period
            )));
        }
        if !(self.tc_sigma.is_finite() && self.tc_sigma > 0.0) {
            return Err(TransitError::Configuration(format!(
                "transit centre sigma must be positive, got {}",
                self.tc_sigma
            )));
        }
        Ok(())
    }
}

/// Orbit block of a TTV fit: stellar density, impact parameter and one
/// transit centre per light curve.
#[derive(Debug, Clone, PartialEq)]
pub struct TtvOrbit {
    config: TtvConfig,
    epochs: Vec<i64>,
    tc_range: Option<Range<usize>>,
}

impl TtvOrbit {
    /// Assign an epoch to each light curve from the mean of its time stamps
    ///
    /// # Examples
    ///
    /// ```
    /// use ndarray::array;
    /// use transit_params::lpf::{TtvConfig, TtvOrbit};
    ///
    /// let config = TtvConfig::default().with_zero_epoch(100.0).with_period(2.5);
    /// let times = [array![99.9, 100.1], array![107.4, 107.6]];
    /// let orbit = TtvOrbit::new(config, &times).unwrap();
    /// assert_eq!(orbit.epochs(), &[0, 3]);
    /// ```
    pub fn new<S>(config: TtvConfig, light_curve_times: &[ArrayBase<S, Ix1>]) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        config.validate()?;
        if light_curve_times.is_empty() {
            return Err(TransitError::Configuration(
                "at least one light curve is required".to_string(),
            ));
        }

        let mut epochs = Vec::with_capacity(light_curve_times.len());
        for (i, times) in light_curve_times.iter().enumerate() {
            let mean = times.mean().ok_or_else(|| {
                TransitError::Configuration(format!("light curve {} has no time stamps", i))
            })?;
            epochs.push(((mean - config.zero_epoch) / config.period).round() as i64);
        }

        Ok(Self {
            config,
            epochs,
            tc_range: None,
        })
    }

    pub fn config(&self) -> &TtvConfig {
        &self.config
    }

    /// Transit number of each light curve
    pub fn epochs(&self) -> &[i64] {
        &self.epochs
    }

    /// Linear-ephemeris transit centres, one per light curve
    pub fn predicted_centres(&self) -> Vec<f64> {
        self.epochs
            .iter()
            .map(|&e| self.config.period * e as f64 + self.config.zero_epoch)
            .collect()
    }

    /// The parameters of the orbit block
    pub fn orbit_parameters(&self) -> Result<Vec<Parameter>> {
        let mut params = Vec::with_capacity(2 + self.epochs.len());
        params.push(Parameter::global(
            "rho",
            "stellar_density",
            "g/cm^3",
            Prior::uniform(0.1, 25.0)?,
            (0.0, f64::INFINITY),
        )?);
        params.push(Parameter::global(
            "b",
            "impact_parameter",
            "R_s",
            Prior::uniform(0.0, 1.0)?,
            (0.0, 1.0),
        )?);
        for (&epoch, tc) in self.epochs.iter().zip(self.predicted_centres()) {
            params.push(Parameter::global(
                &format!("tc_{}", epoch),
                &format!("transit_centre_{}", epoch),
                "d",
                Prior::normal(tc, self.config.tc_sigma)?,
                (f64::NEG_INFINITY, f64::INFINITY),
            )?);
        }
        Ok(params)
    }

    /// Append the `orbit` block to `ps`
    ///
    /// Fails if the set is frozen, in which case the orbit keeps no record of
    /// the set.
    pub fn add_to(&mut self, ps: &mut ParameterSet) -> Result<()> {
        let start = ps.len() + 2;
        ps.add_global_block("orbit", self.orbit_parameters()?)?;
        self.tc_range = Some(start..start + self.epochs.len());
        debug!("added TTV orbit with {} transit centres", self.epochs.len());
        Ok(())
    }

    /// Positions of the transit centres in the parameter vector, once added to a set
    pub fn tc_range(&self) -> Option<Range<usize>> {
        self.tc_range.clone()
    }

    /// Median of each transit-centre column of the posterior samples
    fn tc_medians(&self, samples: ArrayView2<f64>) -> Result<Array1<f64>> {
        let range = self.tc_range().ok_or_else(|| {
            TransitError::Configuration("orbit has not been added to a parameter set".to_string())
        })?;
        if samples.ncols() < range.end {
            return Err(TransitError::DimensionMismatch(format!(
                "samples have {} columns, transit centres end at {}",
                samples.ncols(),
                range.end
            )));
        }
        if samples.nrows() == 0 {
            return Err(TransitError::DimensionMismatch("no posterior samples".to_string()));
        }
        let mut tcs = samples.slice_axis(Axis(1), range.into()).to_owned();
        tcs.quantile_axis_skipnan_mut(Axis(0), n64(0.5), &Midpoint)
            .map_err(|e| TransitError::DimensionMismatch(e.to_string()))
    }

    /// Mean period implied by the posterior transit centres
    ///
    /// Each transit centre is compared with the first one, so at least two
    /// light curves with distinct epochs are needed.
    pub fn posterior_period(&self, samples: ArrayView2<f64>) -> Result<f64> {
        if self.epochs.len() < 2 {
            return Err(TransitError::Configuration(
                "period estimation needs at least two light curves".to_string(),
            ));
        }
        let e0 = self.epochs[0];
        if self.epochs[1..].iter().any(|&e| e == e0) {
            return Err(TransitError::Configuration(format!(
                "epoch {} appears more than once",
                e0
            )));
        }

        let tcs = self.tc_medians(samples)?;
        let n = (tcs.len() - 1) as f64;
        let sum: f64 = tcs
            .iter()
            .zip(&self.epochs)
            .skip(1)
            .map(|(&tc, &e)| (tc - tcs[0]) / (e - e0) as f64)
            .sum();
        Ok(sum / n)
    }

    /// Median transit-centre offsets from the linear ephemeris [min]
    ///
    /// The ephemeris uses the zero epoch of the configuration and the period
    /// from [`TtvOrbit::posterior_period`].
    pub fn timing_offsets(&self, samples: ArrayView2<f64>) -> Result<Array1<f64>> {
        let period = self.posterior_period(samples)?;
        let tcs = self.tc_medians(samples)?;
        Ok(tcs
            .iter()
            .zip(&self.epochs)
            .map(|(&tc, &e)| MINUTES_PER_DAY * (tc - (self.config.zero_epoch + e as f64 * period)))
            .collect())
    }
}

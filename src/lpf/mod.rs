//! Log posterior functions.
//!
//! This module defines the [`LogPosterior`] trait, the seam between a frozen
//! [`ParameterSet`] and an external transit model. The model supplies the
//! log-likelihood; the trait combines it with the log-prior of the set.

pub mod ttv;

pub use ttv::{TtvConfig, TtvOrbit};

use crate::error::Result;
use crate::parameters::ParameterSet;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use rand::Rng;

/// A log posterior over the parameter vector defined by a [`ParameterSet`].
pub trait LogPosterior {
    /// The frozen parameter set defining the layout of the parameter vector.
    fn parameters(&self) -> &ParameterSet;

    /// Log-likelihood of the data given a parameter vector.
    ///
    /// Only called for vectors the prior accepts.
    fn log_likelihood(&self, pv: ArrayView1<f64>) -> Result<f64>;

    /// Log-prior plus log-likelihood.
    ///
    /// Returns `-inf` without evaluating the likelihood when the prior rejects
    /// the vector.
    fn log_posterior(&self, pv: ArrayView1<f64>) -> Result<f64> {
        let lnp = self.parameters().log_prior(&pv)?;
        if lnp == f64::NEG_INFINITY {
            return Ok(lnp);
        }
        Ok(lnp + self.log_likelihood(pv)?)
    }

    /// Row-wise [`LogPosterior::log_posterior`] over a batch of vectors.
    fn log_posterior_batch(&self, pvs: ArrayView2<f64>) -> Result<Array1<f64>> {
        let mut lnp = self.parameters().log_prior_batch(&pvs)?;
        let mut result = Ok(());
        Zip::from(&mut lnp).and(pvs.rows()).for_each(|l, row| {
            if result.is_err() || *l == f64::NEG_INFINITY {
                return;
            }
            match self.log_likelihood(row) {
                Ok(ll) => *l += ll,
                Err(e) => result = Err(e),
            }
        });
        result.map(|_| lnp)
    }

    /// Starting population for an optimiser, drawn from the priors.
    fn sample_start<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<f64>
    where
        Self: Sized,
    {
        self.parameters().sample_from_prior(n, rng)
    }
}

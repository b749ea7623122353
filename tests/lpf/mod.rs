//! Integration tests for the log posterior seam and the TTV orbit

use crate::test_helpers::rng;
use approx::assert_relative_eq;
use ndarray::{array, Array1, Array2, ArrayView1};
use transit_params::lpf::{LogPosterior, TtvConfig, TtvOrbit};
use transit_params::parameters::{Parameter, ParameterSet};
use transit_params::priors::{Prior, PriorTrait};
use transit_params::{Result, TransitError};

/// Box-shaped transit with a depth and a centre, Gaussian white noise
struct BoxTransit {
    ps: ParameterSet,
    time: Array1<f64>,
    flux: Array1<f64>,
    sigma: f64,
}

impl BoxTransit {
    fn model(time: &Array1<f64>, depth: f64, tc: f64) -> Array1<f64> {
        time.mapv(|t| if (t - tc).abs() < 0.05 { 1.0 - depth } else { 1.0 })
    }

    fn new() -> Self {
        let mut ps = ParameterSet::new();
        ps.add_global_block(
            "transit",
            vec![
                Parameter::global("depth", "transit_depth", "", Prior::uniform(0.0, 0.1).unwrap(), (0.0, 0.1)).unwrap(),
                Parameter::global("tc", "transit_centre", "d", Prior::normal(0.0, 0.02).unwrap(), (-0.1, 0.1)).unwrap(),
            ],
        )
        .unwrap();
        ps.freeze();

        let time = Array1::linspace(-0.2, 0.2, 81);
        let flux = Self::model(&time, 0.01, 0.0);
        Self {
            ps,
            time,
            flux,
            sigma: 0.001,
        }
    }
}

impl LogPosterior for BoxTransit {
    fn parameters(&self) -> &ParameterSet {
        &self.ps
    }

    fn log_likelihood(&self, pv: ArrayView1<f64>) -> Result<f64> {
        let model = Self::model(&self.time, pv[0], pv[1]);
        let chi2 = (&self.flux - &model).mapv(|r| (r / self.sigma).powi(2)).sum();
        Ok(-0.5 * chi2)
    }
}

#[test]
fn test_posterior_prefers_true_parameters() {
    let lpf = BoxTransit::new();
    let truth = lpf.log_posterior(array![0.01, 0.0].view()).unwrap();
    let off = lpf.log_posterior(array![0.02, 0.0].view()).unwrap();
    assert!(truth > off);

    let expected_prior = lpf.ps.log_prior(&array![0.01, 0.0]).unwrap();
    assert_relative_eq!(truth, expected_prior, epsilon = 1e-9);
}

#[test]
fn test_posterior_rejects_out_of_bounds() {
    let lpf = BoxTransit::new();
    assert_eq!(lpf.log_posterior(array![0.01, 0.5].view()).unwrap(), f64::NEG_INFINITY);
    assert!(matches!(
        lpf.log_posterior(array![0.01].view()),
        Err(TransitError::DimensionMismatch(_))
    ));
}

#[test]
fn test_start_population() {
    let lpf = BoxTransit::new();
    let mut rng = rng(1);
    let population = lpf.sample_start(40, &mut rng);
    assert_eq!(population.dim(), (40, 2));

    let lnp = lpf.log_posterior_batch(population.view()).unwrap();
    for (row, &v) in population.rows().into_iter().zip(lnp.iter()) {
        assert_eq!(lpf.log_posterior(row).unwrap(), v);
    }
}

#[test]
fn test_ttv_orbit_in_parameter_set() {
    let config = TtvConfig::default()
        .with_zero_epoch(2458000.5)
        .with_period(3.0)
        .with_tc_sigma(0.005);
    let times: Vec<Array1<f64>> = [0.0, 1.0, 4.0]
        .iter()
        .map(|&n| Array1::linspace(-0.1, 0.1, 11) + (2458000.5 + 3.0 * n))
        .collect();
    let mut orbit = TtvOrbit::new(config, &times).unwrap();
    assert_eq!(orbit.epochs(), &[0, 1, 4]);

    let mut ps = ParameterSet::new();
    orbit.add_to(&mut ps).unwrap();
    ps.add_lightcurve_block(
        "error",
        1,
        3,
        (0..3)
            .map(|i| Parameter::local(&format!("e_{}", i), "log10_error", "", Prior::uniform(-4.0, 0.0).unwrap(), (-4.0, 0.0)).unwrap())
            .collect(),
    )
    .unwrap();
    ps.validate().unwrap();
    ps.freeze();

    let range = orbit.tc_range().unwrap();
    assert_eq!(range, 2..5);
    for (pid, tc) in range.clone().zip(orbit.predicted_centres()) {
        assert_eq!(*ps[pid].prior(), Prior::normal(tc, 0.005).unwrap());
        assert_relative_eq!(
            ps[pid].prior().log_density(tc),
            Prior::normal(0.0, 0.005).unwrap().log_density(0.0),
            epsilon = 1e-9
        );
    }

    // Posterior samples scattered around a period of 3.0001 d
    let mut rng = rng(77);
    let mut samples = ps.sample_from_prior(201, &mut rng);
    for (i, &e) in orbit.epochs().iter().enumerate() {
        let tc = 2458000.5 + 3.0001 * e as f64;
        let mut column = samples.column_mut(range.start + i);
        column.assign(&(Array1::linspace(-1e-4, 1e-4, 201) + tc));
    }

    let period = orbit.posterior_period(samples.view()).unwrap();
    assert_relative_eq!(period, 3.0001, epsilon = 1e-7);

    let offsets = orbit.timing_offsets(samples.view()).unwrap();
    assert!(offsets.iter().all(|o| o.abs() < 1e-3), "{:?}", offsets);
}

#[test]
fn test_ttv_single_light_curve_has_no_period() {
    let times = vec![array![0.95, 1.0, 1.05]];
    let mut orbit = TtvOrbit::new(TtvConfig::default(), &times).unwrap();
    let mut ps = ParameterSet::new();
    orbit.add_to(&mut ps).unwrap();
    assert_eq!(ps.names(), vec!["rho", "b", "tc_1"]);

    let samples = Array2::<f64>::ones((10, 3));
    assert!(matches!(
        orbit.posterior_period(samples.view()),
        Err(TransitError::Configuration(_))
    ));
}

//! Integration tests for the prior distributions

use crate::test_helpers::rng;
use approx::assert_relative_eq;
use ndarray::array;
use std::f64::consts::PI;
use transit_params::priors::{Prior, PriorTrait};
use transit_params::TransitError;

#[test]
fn test_normal_closed_form() {
    let prior = Prior::normal(1.0, 0.5).unwrap();
    for &x in &[-1.0, 0.3, 1.0, 2.7] {
        let expected = -0.5 * (2.0 * PI * 0.25).ln() - (x - 1.0f64).powi(2) / (2.0 * 0.25);
        assert_relative_eq!(prior.log_density(x), expected, epsilon = 1e-12);
    }
}

#[test]
fn test_uniform_edges() {
    let prior = Prior::uniform(2.0, 5.0).unwrap();
    assert_eq!(prior.log_density(2.0), f64::NEG_INFINITY);
    assert_eq!(prior.log_density(5.0), f64::NEG_INFINITY);
    assert_relative_eq!(prior.log_density(3.0), -(3.0f64).ln(), epsilon = 1e-12);
}

#[test]
fn test_uniform_sampling() {
    let prior = Prior::uniform(2.0, 5.0).unwrap();
    let mut rng = rng(42);
    let samples = prior.sample(1000, &mut rng);

    assert_eq!(samples.len(), 1000);
    assert!(samples.iter().all(|&v| (2.0..5.0).contains(&v)));
    let mean = samples.mean().unwrap();
    assert!((mean - 3.5).abs() < 0.15, "mean = {}", mean);
}

#[test]
fn test_jeffreys_scale_invariance() {
    let prior = Prior::jeffreys(1e-3, 10.0).unwrap();
    // Density ratio only depends on the ratio of the arguments
    let r1 = prior.log_density(0.01) - prior.log_density(0.02);
    let r2 = prior.log_density(2.0) - prior.log_density(4.0);
    assert_relative_eq!(r1, r2, epsilon = 1e-12);
    assert_eq!(prior.log_density(20.0), f64::NEG_INFINITY);

    let mut rng = rng(7);
    let samples = prior.sample(500, &mut rng);
    assert!(samples.iter().all(|&v| (1e-3..10.0).contains(&v)));
}

#[test]
fn test_log_logistic_support() {
    let prior = Prior::log_logistic(0.5, 2.0).unwrap();
    assert_eq!(prior.log_density(1e-3), f64::NEG_INFINITY);
    assert_eq!(prior.log_density(1.0), f64::NEG_INFINITY);
    assert!(prior.log_density(0.5).is_finite());

    let mut rng = rng(3);
    let samples = prior.sample(200, &mut rng);
    assert!(samples.iter().all(|&v| (1e-3..1.0).contains(&v)));
}

#[test]
fn test_gamma_guards_non_positive() {
    let prior = Prior::gamma(2.0).unwrap();
    assert_eq!(prior.log_density(0.0), f64::NEG_INFINITY);
    assert_eq!(prior.log_density(-1.0), f64::NEG_INFINITY);
    // Γ(2) = 1, so ln p(x) = ln(x) - x
    assert_relative_eq!(prior.log_density(1.5), 1.5f64.ln() - 1.5, epsilon = 1e-10);
}

#[test]
fn test_default_prior() {
    let prior = Prior::default();
    assert!(prior.is_default());
    assert_eq!(prior.log_density(1e9), 0.0);
    assert_eq!(prior.sample(3, &mut rng(0)), array![0.0, 0.0, 0.0]);
}

#[test]
fn test_array_evaluation_matches_scalar() {
    let prior = Prior::normal(0.0, 1.0).unwrap();
    let x = array![-2.0, 0.0, 0.5, 3.0];
    let lnp = prior.log_density_array(x.view());
    for (&xi, &li) in x.iter().zip(lnp.iter()) {
        assert_eq!(prior.log_density(xi), li);
    }
}

#[test]
fn test_invalid_priors() {
    assert!(matches!(Prior::normal(0.0, 0.0), Err(TransitError::InvalidPrior(_))));
    assert!(matches!(Prior::uniform(1.0, 1.0), Err(TransitError::InvalidPrior(_))));
    assert!(matches!(Prior::jeffreys(0.0, 1.0), Err(TransitError::InvalidPrior(_))));
    assert!(matches!(Prior::gamma(-1.0), Err(TransitError::InvalidPrior(_))));
}

#[test]
fn test_overflowing_widths() {
    assert!(matches!(Prior::uniform(-1e308, 1e308), Err(TransitError::InvalidPrior(_))));

    let prior = Prior::jeffreys(1e-300, 1e300).unwrap();
    assert!(prior.log_density(1.0).is_finite());
    let samples = prior.sample(20, &mut rng(13));
    assert!(samples.iter().all(|v| v.is_finite() && *v > 0.0));
}

#[test]
fn test_prior_json() {
    let prior = Prior::normal(0.01, 0.002).unwrap();
    let json = serde_json::to_string(&prior).unwrap();
    assert!(json.contains("\"type\":\"normal\""), "{}", json);
    let back: Prior = serde_json::from_str(&json).unwrap();
    assert_eq!(back, prior);

    let bad = r#"{"type": "uniform", "a": 3.0, "b": 1.0}"#;
    assert!(serde_json::from_str::<Prior>(bad).is_err());
}

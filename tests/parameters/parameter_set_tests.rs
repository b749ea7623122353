//! Integration tests for the ParameterSet collection

use crate::test_helpers::{rng, transit_set};
use approx::assert_relative_eq;
use ndarray::{array, Array2};
use rand::Rng;
use transit_params::parameters::{LogPrior, Parameter, ParameterSet, Scope};
use transit_params::priors::{Prior, PriorTrait};
use transit_params::TransitError;

#[test]
fn test_pids_follow_positions_across_blocks() {
    let mut ps = transit_set();
    assert!(ps.iter().all(|p| p.pid().is_none()));
    ps.freeze();

    for (i, p) in ps.iter().enumerate() {
        assert_eq!(p.pid(), Some(i));
    }

    let blocks = ps.blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].start(), 0);
    for pair in blocks.windows(2) {
        assert_eq!(pair[0].stop(), pair[1].start());
    }
    assert_eq!(blocks[2].stop(), ps.len());
    assert_eq!(ps.block("k2").unwrap().slices(), vec![2..3, 3..4, 4..5]);
}

#[test]
fn test_passband_block_size_mismatch() {
    let mut ps = ParameterSet::new();
    let params: Vec<_> = ["k_g", "k_r", "k_i", "k_z", "k_y"]
        .iter()
        .map(|n| Parameter::new(n, Scope::Passband).unwrap())
        .collect();

    match ps.add_passband_block("k", 2, 3, params) {
        Err(TransitError::Configuration(msg)) => {
            assert!(msg.contains("expected 6"), "{}", msg);
            assert!(msg.contains("got 5"), "{}", msg);
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }
    assert!(ps.is_empty());
    assert!(ps.blocks().is_empty());
}

#[test]
fn test_block_group_count_overflow() {
    let mut ps = ParameterSet::new();
    let params = vec![Parameter::new("k_g", Scope::Passband).unwrap()];
    assert!(matches!(
        ps.add_passband_block("k", 2, usize::MAX, params),
        Err(TransitError::Configuration(_))
    ));
    assert!(ps.is_empty());
}

#[test]
fn test_freeze_thaw_cycle() {
    let mut ps = transit_set();
    ps.freeze();
    assert!(ps.is_frozen());
    assert!(ps.bounds().is_ok());

    let extra = Parameter::new("ldtk", Scope::Global).unwrap();
    assert!(matches!(ps.append(extra.clone()), Err(TransitError::FrozenSet(_))));
    assert_eq!(ps.len(), 7);

    ps.thaw();
    assert!(!ps.is_frozen());
    assert!(matches!(ps.bounds(), Err(TransitError::NotFrozen(_))));
    ps.append(extra).unwrap();
    ps.freeze();
    assert_eq!(ps.len(), 8);
    assert_eq!(ps.find_pid("ldtk").unwrap(), 7);
    assert_eq!(ps.upper_bounds().unwrap().len(), 8);
}

#[test]
fn test_cached_bounds() {
    let mut ps = transit_set();
    ps.freeze();
    let lower = ps.lower_bounds().unwrap();
    let upper = ps.upper_bounds().unwrap();
    assert_eq!(lower.to_vec(), vec![0.0, 0.0, 0.0, 0.0, 0.0, -4.0, -4.0]);
    assert_eq!(upper[0], f64::INFINITY);
    assert_eq!(upper[1], 1.0);
    assert_eq!(ps.bounds().unwrap().dim(), (7, 2));
}

#[test]
fn test_batch_matches_direct_evaluation() {
    let mut ps = transit_set();
    ps.freeze();
    let mut rng = rng(2024);

    // Ranges slightly wider than the bounds so that some rows fall outside
    let ranges = [(-1.0, 30.0), (-0.1, 1.1), (-0.005, 0.055), (-0.005, 0.055), (-0.005, 0.055), (-4.5, 0.5), (-4.5, 0.5)];
    let pvs = Array2::from_shape_fn((100, ps.len()), |(_, j)| rng.gen_range(ranges[j].0..ranges[j].1));

    let batch = ps.log_prior_batch(&pvs).unwrap();
    assert_eq!(batch.len(), 100);

    let mut rejected = 0;
    for (row, &lnp) in pvs.rows().into_iter().zip(batch.iter()) {
        let inside = ps
            .iter()
            .zip(row.iter())
            .all(|(p, &v)| p.bounds().contains_closed(v));
        if inside {
            let expected: f64 = ps.iter().zip(row.iter()).map(|(p, &v)| p.log_prior(v)).sum();
            assert_relative_eq!(lnp, expected, epsilon = 1e-9);
            assert_relative_eq!(ps.log_prior(&row).unwrap(), expected, epsilon = 1e-9);
        } else {
            assert_eq!(lnp, f64::NEG_INFINITY);
            rejected += 1;
        }
    }
    assert!(rejected > 0 && rejected < 100, "rejected {}", rejected);
}

#[test]
fn test_values_on_bounds_keep_prior_density() {
    let prior = Prior::normal(0.5, 0.2).unwrap();
    let mut ps = ParameterSet::new();
    ps.add_global_block(
        "orbit",
        vec![
            Parameter::global("b", "impact_parameter", "R_s", prior.clone(), (0.0, 1.0)).unwrap(),
            Parameter::global("k", "radius_ratio", "R_s", Prior::normal(0.1, 0.05).unwrap(), (0.0, 0.2)).unwrap(),
        ],
    )
    .unwrap();
    ps.freeze();

    let lnp = ps.log_prior(&array![1.0, 0.1]).unwrap();
    assert!(lnp.is_finite());
    assert_relative_eq!(lnp, prior.log_density(1.0) + ps[1].log_prior(0.1), epsilon = 1e-12);
    assert_eq!(ps[0].truncated_log_prior(1.0), f64::NEG_INFINITY);

    let lower = ps.log_prior(&array![0.0, 0.0]).unwrap();
    assert!(lower.is_finite());
    assert_eq!(ps[1].truncated_log_prior(0.0), f64::NEG_INFINITY);
}

#[test]
fn test_log_prior_requires_frozen_set() {
    let ps = transit_set();
    let pv = array![1.0, 0.5, 0.01, 0.01, 0.01, -2.0, -2.0];
    assert!(matches!(ps.log_prior(&pv), Err(TransitError::NotFrozen(_))));
}

#[test]
fn test_log_prior_any_dispatches_on_rank() {
    let mut ps = transit_set();
    ps.freeze();
    let pv = array![1.0, 0.5, 0.01, 0.01, 0.01, -2.0, -2.0];
    let single = ps.log_prior(&pv).unwrap();

    match ps.log_prior_any(&pv.clone().into_dyn()).unwrap() {
        LogPrior::Scalar(v) => assert_eq!(v, single),
        other => panic!("Expected scalar, got {:?}", other),
    }

    let pvs = ndarray::stack![ndarray::Axis(0), pv, pv];
    match ps.log_prior_any(&pvs.into_dyn()).unwrap() {
        LogPrior::Batch(v) => assert_eq!(v.to_vec(), vec![single, single]),
        other => panic!("Expected batch, got {:?}", other),
    }
}

#[test]
fn test_incomplete_passband_coverage() {
    let ps = ParameterSet::from_parameters(
        ["k1_g", "k1_r", "k2_g"]
            .iter()
            .map(|n| Parameter::new(n, Scope::Passband).unwrap())
            .collect(),
    );
    match ps.validate() {
        Err(TransitError::IncompleteCoverage(msg)) => assert!(msg.contains("k2_r"), "{}", msg),
        other => panic!("Expected IncompleteCoverage, got {:?}", other),
    }
    assert!(transit_set().validate().is_ok());
}

#[test]
fn test_duplicate_names_rejected() {
    let mut ps = transit_set();
    ps.append(Parameter::new("rho", Scope::Global).unwrap()).unwrap();
    assert!(matches!(ps.validate(), Err(TransitError::DuplicateName(_))));
}

#[test]
fn test_sample_from_prior() {
    let ps = ParameterSet::from_parameters(vec![
        Parameter::global("a", "", "", Prior::uniform(2.0, 5.0).unwrap(), (2.0, 5.0)).unwrap(),
        Parameter::global("c", "", "", Prior::normal(0.0, 1.0).unwrap(), (f64::NEG_INFINITY, f64::INFINITY)).unwrap(),
    ]);
    let mut rng = rng(5);
    let samples = ps.sample_from_prior(1000, &mut rng);

    assert_eq!(samples.dim(), (1000, 2));
    let column = samples.column(0);
    assert!(column.iter().all(|&v| (2.0..5.0).contains(&v)));
    let mean = column.mean().unwrap();
    assert!((mean - 3.5).abs() < 0.15, "mean = {}", mean);
}

#[test]
fn test_sampled_population_is_accepted() {
    let mut ps = transit_set();
    ps.freeze();
    let mut rng = rng(9);
    let population = ps.sample_from_prior(50, &mut rng);
    let lnp = ps.log_prior_batch(&population).unwrap();
    // The normal k2 priors can stray outside (0, 0.05) but only rarely
    let accepted = lnp.iter().filter(|v| v.is_finite()).count();
    assert!(accepted >= 45, "accepted {}", accepted);
}

#[test]
fn test_views_and_queries() {
    let ps = transit_set();
    assert_eq!(ps.find_pid("k2_r").unwrap(), 3);
    assert!(matches!(ps.find_pid("k3_r"), Err(TransitError::NotFound(_))));
    assert_eq!(ps.passband_parameters().names(), vec!["k2_g", "k2_r", "k2_i"]);
    assert_eq!(ps.local_parameters().len(), 2);
    assert_eq!(ps.global_parameters().units(), vec!["g/cm^3", "R_s"]);
    assert_eq!(ps.priors()[2].log_density(0.01), Prior::normal(0.01, 0.002).unwrap().log_density(0.01));
    assert_eq!(ps.to_string().lines().count(), ps.len());
}

#[test]
fn test_json_round_trip() {
    let ps = transit_set();
    let mut loaded = ParameterSet::from_json(&ps.to_json().unwrap()).unwrap();
    assert_eq!(loaded.names(), ps.names());
    assert_eq!(loaded.blocks(), ps.blocks());
    assert_eq!(loaded.priors(), ps.priors());

    loaded.freeze();
    let pv = array![1.0, 0.5, 0.01, 0.01, 0.01, -2.0, -2.0];
    let mut frozen = ps.clone();
    frozen.freeze();
    assert_eq!(loaded.log_prior(&pv).unwrap(), frozen.log_prior(&pv).unwrap());
}

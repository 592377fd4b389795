//! NearMiss version 3 on the reference three-class dataset

mod common;

use common::three_class_data;
use imbrs::prelude::*;
use std::collections::BTreeSet;

const RND_SEED: u64 = 0;
const VERSION_NEARMISS: usize = 3;

fn expected_rows(indices: &[usize]) -> Vec<Vec<f64>> {
    let (x, _) = three_class_data();
    indices.iter().map(|&i| x[i].clone()).collect()
}

#[test]
fn test_nearmiss_wrong_version() {
    let (x, y) = three_class_data();
    let mut nm = NearMiss::new().with_version(1000).with_random_state(RND_SEED);
    let err = nm.fit_sample(&x, &y).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
    assert!(err.is_config_error());
}

#[test]
fn test_nearmiss_init() {
    let nm = NearMiss::<i32>::new()
        .with_sampling_strategy(SamplingStrategy::Ratio(1.0))
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS);

    assert_eq!(nm.version(), VERSION_NEARMISS);
    assert!(matches!(nm.n_neighbors(), NeighborsParam::Count(3)));
    assert!(matches!(nm.sampling_strategy(), SamplingStrategy::Ratio(r) if *r == 1.0));
    assert_eq!(nm.random_state(), RandomState::Seed(RND_SEED));
}

#[test]
fn test_nm3_fit_sample_auto() {
    let (x, y) = three_class_data();
    let mut nm = NearMiss::new()
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS);

    let out = nm.fit_sample(&x, &y).unwrap();

    assert_eq!(out.features, expected_rows(&[3, 10, 11, 0, 5, 8, 14, 4, 12]));
    assert_eq!(out.labels, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
    assert!(out.sample_indices.is_none());
}

#[test]
fn test_nm3_fit_sample_auto_indices() {
    let (x, y) = three_class_data();
    let mut nm = NearMiss::new()
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS)
        .with_return_indices(true);

    let out = nm.fit_sample(&x, &y).unwrap();
    let idx_under = out.sample_indices.clone().unwrap();

    assert_eq!(idx_under, vec![3, 10, 11, 0, 5, 8, 14, 4, 12]);
    assert_eq!(out.labels, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);

    // untouched minority class first, then the ranked positions within each
    // candidate pool
    let selection = nm.select(&x, &y).unwrap();
    let legacy: Vec<usize> = idx_under[..3]
        .iter()
        .chain(selection.ranks[&1].iter())
        .chain(selection.ranks[&2].iter())
        .copied()
        .collect();
    assert_eq!(legacy, vec![3, 10, 11, 0, 2, 3, 5, 1, 4]);
}

#[test]
fn test_nm3_fit_sample_half() {
    let (x, y) = three_class_data();
    let mut nm = NearMiss::new()
        .with_sampling_strategy(SamplingStrategy::Ratio(0.7))
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS);

    let out = nm.fit_sample(&x, &y).unwrap();

    assert_eq!(
        out.features,
        expected_rows(&[3, 10, 11, 0, 5, 8, 2, 14, 4, 12, 6])
    );
    assert_eq!(out.labels, vec![0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn test_nm3_fit_sample_nn_obj() {
    let (x, y) = three_class_data();
    let mut nm = NearMiss::new()
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS)
        .with_return_indices(true)
        .with_n_neighbors(NearestNeighbors::new(3).into())
        .with_n_neighbors_ver3(NearestNeighbors::new(3).into());

    let out = nm.fit_sample(&x, &y).unwrap();

    assert_eq!(out.features, expected_rows(&[3, 10, 11, 0, 5, 8, 14, 4, 12]));
    assert_eq!(out.labels, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
    assert_eq!(
        out.sample_indices.unwrap(),
        vec![3, 10, 11, 0, 5, 8, 14, 4, 12]
    );
}

#[test]
fn test_nm3_wrong_nn_obj() {
    let (x, y) = three_class_data();
    let not_a_searcher = NeighborsParam::estimator(RandomOverSampler::<i32>::new());

    let mut nm = NearMiss::new()
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS)
        .with_return_indices(true)
        .with_n_neighbors(not_a_searcher.clone())
        .with_n_neighbors_ver3(NearestNeighbors::new(3).into());
    assert!(matches!(
        nm.fit_sample(&x, &y),
        Err(Error::InvalidEstimator(_))
    ));

    let mut nm = NearMiss::new()
        .with_random_state(RND_SEED)
        .with_version(VERSION_NEARMISS)
        .with_return_indices(true)
        .with_n_neighbors(NearestNeighbors::new(3).into())
        .with_n_neighbors_ver3(not_a_searcher);
    assert!(matches!(
        nm.fit_sample(&x, &y),
        Err(Error::InvalidEstimator(_))
    ));
}

#[test]
fn test_nm3_keeps_at_most_the_requested_samples() {
    let (x, y) = three_class_data();
    for ratio in [0.6, 0.7, 0.8, 1.0] {
        let mut nm = NearMiss::new()
            .with_sampling_strategy(SamplingStrategy::Ratio(ratio))
            .with_version(VERSION_NEARMISS)
            .with_return_indices(true);
        let out = nm.fit_sample(&x, &y).unwrap();
        let targets = Sampler::<Vec<f64>, i32>::sampling_strategy_(&nm).unwrap().clone();
        let indices = out.sample_indices.unwrap();

        let unique: BTreeSet<usize> = indices.iter().copied().collect();
        assert_eq!(unique.len(), indices.len(), "indices must not repeat");

        for class in [0, 1, 2] {
            let kept = indices.iter().filter(|&&i| y[i] == class).count();
            let class_size = y.iter().filter(|&&l| l == class).count();
            match targets.get(&class) {
                // the candidate pool may hold fewer samples than requested
                Some(&n) => assert!(kept <= n && kept > 0),
                None => assert_eq!(kept, class_size),
            }
        }
        assert_eq!(out.labels.len(), indices.len());
    }
}

#[test]
fn test_nm3_is_deterministic() {
    let (x, y) = three_class_data();
    let run = || {
        NearMiss::new()
            .with_version(VERSION_NEARMISS)
            .with_return_indices(true)
            .fit_sample(&x, &y)
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_nm3_small_candidate_pool() {
    // one minority sample and one neighbor in the first step: the pool holds a
    // single sample although four are requested
    let x = vec![
        vec![0.0, 0.0],
        vec![0.1, 0.0],
        vec![0.2, 0.0],
        vec![0.3, 0.0],
        vec![0.4, 0.0],
        vec![5.0, 5.0],
    ];
    let y = vec![0, 0, 0, 0, 0, 1];
    let targets = [(0, 4)].into_iter().collect();

    let mut nm = NearMiss::new()
        .with_version(VERSION_NEARMISS)
        .with_sampling_strategy(SamplingStrategy::Targets(targets))
        .with_n_neighbors(NeighborsParam::Count(1))
        .with_n_neighbors_ver3(NeighborsParam::Count(1))
        .with_return_indices(true);
    let out = nm.fit_sample(&x, &y).unwrap();

    assert_eq!(out.sample_indices.unwrap(), vec![4, 5]);
}

//! Sampler protocol shared by over- and under-sampling methods
//!
//! A sampler is fitted on `(x, y)`, which resolves its sampling strategy and
//! records a fingerprint of the data. `sample` then builds the resampled
//! dataset and refuses to run on data other than the fitted one.

pub mod strategy;

pub use strategy::{
    check_sampling_strategy, class_counts, majority_class, minority_class, ClassCounts,
    SamplingStrategy, SamplingType, StrategyFn,
};

use crate::error::{Error, Result};
use crate::neighbors::Estimator;
use crate::utils::validation::{check_x_y, from_one_hot, to_one_hot};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Requirements on class labels
pub trait Label: Ord + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T: Ord + Hash + Clone + Debug + Send + Sync + 'static> Label for T {}

/// Output of a sampler
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled<R, L> {
    pub features: Vec<R>,
    pub labels: Vec<L>,
    /// Positions of the output rows in the input, when requested
    pub sample_indices: Option<Vec<usize>>,
}

impl<R: Clone, L: Clone> Resampled<R, L> {
    /// Gather rows and labels at `indices`
    pub fn from_indices(x: &[R], y: &[L], indices: Vec<usize>, return_indices: bool) -> Self {
        let features = indices.iter().map(|&i| x[i].clone()).collect();
        let labels = indices.iter().map(|&i| y[i].clone()).collect();
        Resampled {
            features,
            labels,
            sample_indices: return_indices.then_some(indices),
        }
    }
}

impl<R, L> Resampled<R, L> {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<R, L: Label> Resampled<R, L> {
    /// Number of samples per class in the output
    pub fn class_counts(&self) -> ClassCounts<L> {
        class_counts(&self.labels)
    }
}

/// Resampling estimator
pub trait Sampler<R, L: Label>: Estimator {
    /// Whether the sampler adds or removes samples
    fn sampling_type(&self) -> SamplingType;

    /// Validate the data and resolve the sampling strategy
    fn fit(&mut self, x: &[R], y: &[L]) -> Result<()>;

    /// Resample the data the sampler was fitted on
    fn sample(&self, x: &[R], y: &[L]) -> Result<Resampled<R, L>>;

    /// Fit and resample in one step
    fn fit_sample(&mut self, x: &[R], y: &[L]) -> Result<Resampled<R, L>> {
        self.fit(x, y)?;
        self.sample(x, y)
    }

    /// Resolved strategy, available after `fit`
    fn sampling_strategy_(&self) -> Option<&BTreeMap<L, usize>>;
}

/// State recorded by `fit`
#[derive(Debug, Clone)]
pub(crate) struct FitState<L> {
    pub sampling_strategy: BTreeMap<L, usize>,
    fingerprint: Vec<u8>,
}

impl<L: Label> FitState<L> {
    /// Checks shared by every sampler's `fit`
    pub fn new<R: Debug>(
        strategy: &SamplingStrategy<L>,
        x: &[R],
        y: &[L],
        sampling_type: SamplingType,
    ) -> Result<Self> {
        check_x_y(x, y)?;
        let sampling_strategy = check_sampling_strategy(strategy, y, sampling_type)?;
        Ok(FitState {
            sampling_strategy,
            fingerprint: fingerprint(x, y),
        })
    }

    /// Fail if `(x, y)` is not the data seen by `fit`
    pub fn check_same_data<R: Debug>(&self, x: &[R], y: &[L]) -> Result<()> {
        check_x_y(x, y)?;
        if fingerprint(x, y) != self.fingerprint {
            return Err(Error::DataMismatch(
                "X and y must be the same data as the one passed to fit".to_string(),
            ));
        }
        Ok(())
    }
}

/// SHA-256 digest over the debug representation of the data
fn fingerprint<R: Debug, L: Debug>(x: &[R], y: &[L]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for row in x {
        hasher.update(format!("{:?};", row).as_bytes());
    }
    hasher.update(b"|");
    for label in y {
        hasher.update(format!("{:?};", label).as_bytes());
    }
    hasher.finalize().to_vec()
}

/// Look up the fit state or fail with `NotFitted`
pub(crate) fn fitted<'a, L>(state: &'a Option<FitState<L>>, name: &str) -> Result<&'a FitState<L>> {
    state
        .as_ref()
        .ok_or_else(|| Error::NotFitted(format!("{} must be fitted before sampling", name)))
}

/// Resample data whose target is one-hot encoded
///
/// The target is decoded to class positions, resampled, and encoded back with
/// the same number of columns.
pub fn fit_sample_one_hot<R, S>(
    sampler: &mut S,
    x: &[R],
    y: &[Vec<u8>],
) -> Result<Resampled<R, Vec<u8>>>
where
    S: Sampler<R, usize> + ?Sized,
{
    let n_classes = y.first().map_or(0, |row| row.len());
    let decoded = from_one_hot(y)?;
    let resampled = sampler.fit_sample(x, &decoded)?;
    Ok(Resampled {
        features: resampled.features,
        labels: to_one_hot(&resampled.labels, n_classes)?,
        sample_indices: resampled.sample_indices,
    })
}

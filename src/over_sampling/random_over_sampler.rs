//! Random over-sampling
//!
//! Over-samples the minority class(es) by picking samples at random with
//! replacement. Every class is sampled independently, so multi-class targets
//! are supported. Rows are only cloned, never inspected, which makes the
//! sampler usable with heterogeneous rows.

use crate::error::Result;
use crate::neighbors::Estimator;
use crate::sampling::{fitted, FitState, Label, Resampled, Sampler, SamplingStrategy, SamplingType};
use crate::utils::RandomState;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Random over-sampler
///
/// # Example
///
/// ```
/// use imbrs::over_sampling::RandomOverSampler;
/// use imbrs::sampling::Sampler;
///
/// let x = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
/// let y = vec![0, 0, 0, 1];
///
/// let mut ros = RandomOverSampler::new().with_random_state(42);
/// let resampled = ros.fit_sample(&x, &y).unwrap();
/// assert_eq!(resampled.class_counts()[&1], 3);
/// ```
#[derive(Debug, Clone)]
pub struct RandomOverSampler<L> {
    sampling_strategy: SamplingStrategy<L>,
    random_state: RandomState,
    return_indices: bool,
    state: Option<FitState<L>>,
}

impl<L: Label> RandomOverSampler<L> {
    pub fn new() -> Self {
        RandomOverSampler {
            sampling_strategy: SamplingStrategy::Auto,
            random_state: RandomState::Entropy,
            return_indices: false,
            state: None,
        }
    }

    pub fn with_sampling_strategy(mut self, strategy: SamplingStrategy<L>) -> Self {
        self.sampling_strategy = strategy;
        self
    }

    /// Seed the generator so that every call draws the same samples
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = RandomState::Seed(seed);
        self
    }

    /// Use `random_state` as the source of randomness
    pub fn with_rng(mut self, random_state: RandomState) -> Self {
        self.random_state = random_state;
        self
    }

    /// Also return the positions of the output rows in the input
    pub fn with_return_indices(mut self, return_indices: bool) -> Self {
        self.return_indices = return_indices;
        self
    }

    pub fn sampling_strategy(&self) -> &SamplingStrategy<L> {
        &self.sampling_strategy
    }

    pub fn random_state(&self) -> RandomState {
        self.random_state
    }

    pub fn return_indices(&self) -> bool {
        self.return_indices
    }

    /// Positions of the original rows followed by the drawn duplicates
    fn sample_indices(&self, y: &[L], targets: &BTreeMap<L, usize>) -> Vec<usize> {
        let mut rng = self.random_state.rng();
        let total: usize = targets.values().sum();
        let mut indices: Vec<usize> = Vec::with_capacity(y.len() + total);
        indices.extend(0..y.len());

        for (class, &num_samples) in targets {
            let class_indices: Vec<usize> = y
                .iter()
                .enumerate()
                .filter(|(_, label)| *label == class)
                .map(|(i, _)| i)
                .collect();

            if num_samples == 0 || class_indices.is_empty() {
                continue;
            }

            // draw with replacement
            indices.extend(
                (0..num_samples).map(|_| class_indices[rng.random_range(0..class_indices.len())]),
            );
            log::debug!(
                "RandomOverSampler: drew {} samples for class {:?} from {} candidates",
                num_samples,
                class,
                class_indices.len()
            );
        }

        indices
    }
}

impl<L: Label> Default for RandomOverSampler<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> Estimator for RandomOverSampler<L> {
    fn name(&self) -> &str {
        "RandomOverSampler"
    }
}

impl<R, L> Sampler<R, L> for RandomOverSampler<L>
where
    R: Clone + Debug,
    L: Label,
{
    fn sampling_type(&self) -> SamplingType {
        SamplingType::OverSampling
    }

    fn fit(&mut self, x: &[R], y: &[L]) -> Result<()> {
        self.state = None;
        self.state = Some(FitState::new(
            &self.sampling_strategy,
            x,
            y,
            SamplingType::OverSampling,
        )?);
        Ok(())
    }

    fn sample(&self, x: &[R], y: &[L]) -> Result<Resampled<R, L>> {
        let state = fitted(&self.state, "RandomOverSampler")?;
        state.check_same_data(x, y)?;

        let indices = self.sample_indices(y, &state.sampling_strategy);
        Ok(Resampled::from_indices(x, y, indices, self.return_indices))
    }

    fn sampling_strategy_(&self) -> Option<&BTreeMap<L, usize>> {
        self.state.as_ref().map(|s| &s.sampling_strategy)
    }
}

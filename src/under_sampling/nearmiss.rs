//! NearMiss under-sampling
//!
//! Keeps the samples of each majority class that are selected by their
//! distances to the minority class:
//!
//! - version 1: samples whose mean distance to their `n_neighbors` nearest
//!   minority samples is the smallest;
//! - version 2: samples whose mean distance to their `n_neighbors` farthest
//!   minority samples is the smallest;
//! - version 3: a two-step selection. The `n_neighbors_ver3` nearest class
//!   samples of every minority sample form a candidate pool, and the pool
//!   members whose mean distance to their `n_neighbors` nearest minority
//!   samples is the largest are kept.
//!
//! Classes not named by the resolved sampling strategy are kept as they are.

use crate::error::{Error, Result};
use crate::neighbors::{check_neighbors_object, Estimator, KNeighbors, NeighborsParam};
use crate::sampling::{
    class_counts, fitted, minority_class, FitState, Label, Resampled, Sampler, SamplingStrategy,
    SamplingType,
};
use crate::utils::validation::check_numeric_rows;
use crate::utils::RandomState;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Versions of the NearMiss heuristic
pub const SUPPORTED_VERSIONS: [usize; 3] = [1, 2, 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Nearest,
    Farthest,
}

/// Indices kept by NearMiss, with the ranking behind them
#[derive(Debug, Clone, PartialEq)]
pub struct NearMissSelection<L> {
    /// Positions of the kept rows in the input, class by class
    pub indices: Vec<usize>,
    /// For every under-sampled class, the kept positions within the ranked
    /// set: the class itself for versions 1 and 2, the candidate pool for
    /// version 3
    pub ranks: BTreeMap<L, Vec<usize>>,
}

/// NearMiss under-sampler
pub struct NearMiss<L> {
    sampling_strategy: SamplingStrategy<L>,
    random_state: RandomState,
    return_indices: bool,
    version: usize,
    n_neighbors: NeighborsParam,
    n_neighbors_ver3: NeighborsParam,
    state: Option<FitState<L>>,
    nn: Option<Box<dyn KNeighbors>>,
    nn_ver3: Option<Box<dyn KNeighbors>>,
}

impl<L: Label> NearMiss<L> {
    pub fn new() -> Self {
        NearMiss {
            sampling_strategy: SamplingStrategy::Auto,
            random_state: RandomState::Entropy,
            return_indices: false,
            version: 1,
            n_neighbors: NeighborsParam::Count(3),
            n_neighbors_ver3: NeighborsParam::Count(3),
            state: None,
            nn: None,
            nn_ver3: None,
        }
    }

    pub fn with_sampling_strategy(mut self, strategy: SamplingStrategy<L>) -> Self {
        self.sampling_strategy = strategy;
        self
    }

    /// Accepted for symmetry with the other samplers; the selection itself is
    /// deterministic
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = RandomState::Seed(seed);
        self
    }

    pub fn with_return_indices(mut self, return_indices: bool) -> Self {
        self.return_indices = return_indices;
        self
    }

    /// Heuristic version, one of [`SUPPORTED_VERSIONS`]. Checked by `fit`.
    pub fn with_version(mut self, version: usize) -> Self {
        self.version = version;
        self
    }

    /// Neighbors used to score samples against the minority class
    pub fn with_n_neighbors(mut self, n_neighbors: NeighborsParam) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    /// Neighbors used to build the candidate pool of version 3
    pub fn with_n_neighbors_ver3(mut self, n_neighbors_ver3: NeighborsParam) -> Self {
        self.n_neighbors_ver3 = n_neighbors_ver3;
        self
    }

    pub fn version(&self) -> usize {
        self.version
    }

    pub fn n_neighbors(&self) -> &NeighborsParam {
        &self.n_neighbors
    }

    pub fn n_neighbors_ver3(&self) -> &NeighborsParam {
        &self.n_neighbors_ver3
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

    fn validate_estimator(&mut self) -> Result<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(Error::InvalidParameter(format!(
                "version should be 1, 2 or 3, got {}",
                self.version
            )));
        }

        self.nn = Some(check_neighbors_object("n_neighbors", &self.n_neighbors, 0)?);
        self.nn_ver3 = if self.version == 3 {
            Some(check_neighbors_object(
                "n_neighbors_ver3",
                &self.n_neighbors_ver3,
                0,
            )?)
        } else {
            None
        };
        Ok(())
    }

    /// Select the rows to keep from the fitted data
    pub fn select(&self, x: &[Vec<f64>], y: &[L]) -> Result<NearMissSelection<L>> {
        let state = fitted(&self.state, "NearMiss")?;
        state.check_same_data(x, y)?;

        let nn_prototype = self
            .nn
            .as_ref()
            .ok_or_else(|| Error::NotFitted("NearMiss must be fitted before sampling".into()))?;

        let counts = class_counts(y);
        let minority = minority_class(&counts)
            .cloned()
            .ok_or_else(|| Error::EmptyData("no samples to select from".to_string()))?;
        let minority_rows = gather(x, &class_indices(y, &minority));

        let mut nn = nn_prototype.box_clone();
        nn.fit(&minority_rows)?;
        let k = nn.n_neighbors();

        let mut indices = Vec::new();
        let mut ranks = BTreeMap::new();

        for class in counts.keys() {
            let target_indices = class_indices(y, class);
            let n_samples = match state.sampling_strategy.get(class) {
                Some(&n) => n,
                None => {
                    indices.extend(target_indices);
                    continue;
                }
            };

            let class_rows = gather(x, &target_indices);
            let (positions, kept_ranks) = match self.version {
                1 => {
                    let neighborhood = nn.kneighbors(&class_rows, Some(k))?;
                    let scores = mean_of_last(&neighborhood.distances, k);
                    let kept = rank(&scores, n_samples, Selection::Nearest);
                    (kept.clone(), kept)
                }
                2 => {
                    let neighborhood = nn.kneighbors(&class_rows, Some(minority_rows.len()))?;
                    let scores = mean_of_last(&neighborhood.distances, k);
                    let kept = rank(&scores, n_samples, Selection::Nearest);
                    (kept.clone(), kept)
                }
                _ => self.select_version_3(
                    nn.as_ref(),
                    &minority_rows,
                    &class_rows,
                    n_samples,
                    class,
                )?,
            };

            log::debug!(
                "NearMiss-{}: kept {} of {} samples of class {:?}",
                self.version,
                positions.len(),
                target_indices.len(),
                class
            );
            indices.extend(positions.iter().map(|&p| target_indices[p]));
            ranks.insert(class.clone(), kept_ranks);
        }

        Ok(NearMissSelection { indices, ranks })
    }

    /// Returns the kept class-relative positions and their ranks in the pool
    fn select_version_3(
        &self,
        nn: &dyn KNeighbors,
        minority_rows: &[Vec<f64>],
        class_rows: &[Vec<f64>],
        n_samples: usize,
        class: &L,
    ) -> Result<(Vec<usize>, Vec<usize>)> {
        let mut nn_ver3 = self
            .nn_ver3
            .as_ref()
            .ok_or_else(|| Error::NotFitted("NearMiss must be fitted before sampling".into()))?
            .box_clone();
        nn_ver3.fit(class_rows)?;

        // class samples close to at least one minority sample
        let closest = nn_ver3.kneighbors(minority_rows, None)?;
        let pool: Vec<usize> = closest
            .indices
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if pool.len() < n_samples {
            log::warn!(
                "NearMiss-3: only {} samples of class {:?} are close to the minority class, \
                 {} were requested; all of them are kept",
                pool.len(),
                class,
                n_samples
            );
        }

        let pool_rows = gather(class_rows, &pool);
        let k = nn.n_neighbors();
        let neighborhood = nn.kneighbors(&pool_rows, Some(k))?;
        let scores = mean_of_last(&neighborhood.distances, k);
        let kept = rank(&scores, n_samples, Selection::Farthest);

        Ok((kept.iter().map(|&r| pool[r]).collect(), kept))
    }
}

fn class_indices<L: PartialEq>(y: &[L], class: &L) -> Vec<usize> {
    y.iter()
        .enumerate()
        .filter(|(_, label)| *label == class)
        .map(|(i, _)| i)
        .collect()
}

fn gather(x: &[Vec<f64>], indices: &[usize]) -> Vec<Vec<f64>> {
    indices.iter().map(|&i| x[i].clone()).collect()
}

/// Mean of the `k` largest distances of each row (rows are sorted ascending)
fn mean_of_last(distances: &[Vec<f64>], k: usize) -> Vec<f64> {
    distances
        .iter()
        .map(|row| {
            let tail = &row[row.len().saturating_sub(k)..];
            if tail.is_empty() {
                0.0
            } else {
                tail.iter().sum::<f64>() / tail.len() as f64
            }
        })
        .collect()
}

/// Positions of the first `n` scores in selection order
///
/// The sort is stable, so equal scores keep their original order.
fn rank(scores: &[f64], n: usize, selection: Selection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    match selection {
        Selection::Nearest => order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b])),
        Selection::Farthest => order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a])),
    }
    order.truncate(n);
    order
}

impl<L: Label> Default for NearMiss<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> Clone for NearMiss<L> {
    fn clone(&self) -> Self {
        NearMiss {
            sampling_strategy: self.sampling_strategy.clone(),
            random_state: self.random_state,
            return_indices: self.return_indices,
            version: self.version,
            n_neighbors: self.n_neighbors.clone(),
            n_neighbors_ver3: self.n_neighbors_ver3.clone(),
            state: self.state.clone(),
            nn: self.nn.as_ref().map(|nn| nn.box_clone()),
            nn_ver3: self.nn_ver3.as_ref().map(|nn| nn.box_clone()),
        }
    }
}

impl<L: Label> fmt::Debug for NearMiss<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NearMiss")
            .field("sampling_strategy", &self.sampling_strategy)
            .field("random_state", &self.random_state)
            .field("return_indices", &self.return_indices)
            .field("version", &self.version)
            .field("n_neighbors", &self.n_neighbors)
            .field("n_neighbors_ver3", &self.n_neighbors_ver3)
            .field("fitted", &self.state.is_some())
            .finish()
    }
}

impl<L: Label> Estimator for NearMiss<L> {
    fn name(&self) -> &str {
        "NearMiss"
    }
}

impl<L: Label> Sampler<Vec<f64>, L> for NearMiss<L> {
    fn sampling_type(&self) -> SamplingType {
        SamplingType::UnderSampling
    }

    fn fit(&mut self, x: &[Vec<f64>], y: &[L]) -> Result<()> {
        self.state = None;
        self.validate_estimator()?;
        let state = FitState::new(&self.sampling_strategy, x, y, SamplingType::UnderSampling)?;
        check_numeric_rows(x)?;
        self.state = Some(state);
        Ok(())
    }

    fn sample(&self, x: &[Vec<f64>], y: &[L]) -> Result<Resampled<Vec<f64>, L>> {
        let selection = self.select(x, y)?;
        Ok(Resampled::from_indices(
            x,
            y,
            selection.indices,
            self.return_indices,
        ))
    }

    fn sampling_strategy_(&self) -> Option<&BTreeMap<L, usize>> {
        self.state.as_ref().map(|s| &s.sampling_strategy)
    }
}

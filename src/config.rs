//! Declarative sampler configuration
//!
//! A [`SamplerConfig`] describes one sampler and can be read from TOML, JSON
//! or YAML:
//!
//! ```toml
//! kind = "near_miss"
//! sampling_strategy = "auto"
//! version = 3
//! n_neighbors = 3
//! n_neighbors_ver3 = { n_neighbors = 3, metric = "manhattan" }
//! return_indices = true
//! ```
//!
//! Parsing only checks the shape of the document. Parameter values are
//! validated by [`SamplerConfig::build`] and by the sampler's `fit`.

use crate::error::{Error, Result};
use crate::neighbors::{DistanceMetric, NearestNeighbors, NeighborsParam};
use crate::over_sampling::RandomOverSampler;
use crate::sampling::{Label, Resampled, Sampler, SamplingStrategy};
use crate::under_sampling::NearMiss;
use crate::utils::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Sampler to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    RandomOverSampler,
    NearMiss,
}

/// Sampling strategy as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrategyConfig {
    /// Bare number, read as a ratio
    Float(f64),
    /// Named policy such as `"auto"` or `"not minority"`
    Named(String),
    Ratio { ratio: f64 },
    /// Class labels are written as strings and parsed when building
    Targets { targets: BTreeMap<String, usize> },
}

/// Neighbor search parameter as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NeighborsConfig {
    Count(usize),
    Searcher {
        n_neighbors: usize,
        #[serde(default)]
        metric: DistanceMetric,
    },
    /// Anything else; rejected when building
    Other(String),
}

/// Configuration of one sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub kind: SamplerKind,
    #[serde(default)]
    pub sampling_strategy: Option<StrategyConfig>,
    #[serde(default)]
    pub random_state: Option<u64>,
    #[serde(default)]
    pub return_indices: bool,
    #[serde(default)]
    pub version: Option<usize>,
    #[serde(default)]
    pub n_neighbors: Option<NeighborsConfig>,
    #[serde(default)]
    pub n_neighbors_ver3: Option<NeighborsConfig>,
}

/// A sampler built from a configuration
#[derive(Debug, Clone)]
pub enum ConfiguredSampler<L: Label> {
    RandomOverSampler(RandomOverSampler<L>),
    NearMiss(NearMiss<L>),
}

impl<L: Label> ConfiguredSampler<L> {
    pub fn as_sampler_mut(&mut self) -> &mut dyn Sampler<Vec<f64>, L> {
        match self {
            ConfiguredSampler::RandomOverSampler(s) => s,
            ConfiguredSampler::NearMiss(s) => s,
        }
    }

    pub fn fit_sample(&mut self, x: &[Vec<f64>], y: &[L]) -> Result<Resampled<Vec<f64>, L>> {
        self.as_sampler_mut().fit_sample(x, y)
    }
}

impl SamplerConfig {
    /// Read a configuration file, choosing the format from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        log::debug!("loading sampler configuration from {}", path.display());
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::Config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the configured sampler for labels of type `L`
    pub fn build<L>(&self) -> Result<ConfiguredSampler<L>>
    where
        L: Label + FromStr,
    {
        let strategy = match &self.sampling_strategy {
            Some(config) => strategy_from_config(config)?,
            None => SamplingStrategy::Auto,
        };

        match self.kind {
            SamplerKind::RandomOverSampler => {
                if self.version.is_some()
                    || self.n_neighbors.is_some()
                    || self.n_neighbors_ver3.is_some()
                {
                    return Err(Error::Config(
                        "version and neighbor settings only apply to near_miss".to_string(),
                    ));
                }
                let sampler = RandomOverSampler::new()
                    .with_sampling_strategy(strategy)
                    .with_rng(RandomState::from(self.random_state))
                    .with_return_indices(self.return_indices);
                Ok(ConfiguredSampler::RandomOverSampler(sampler))
            }
            SamplerKind::NearMiss => {
                let mut sampler = NearMiss::new()
                    .with_sampling_strategy(strategy)
                    .with_return_indices(self.return_indices);
                if let Some(version) = self.version {
                    sampler = sampler.with_version(version);
                }
                if let Some(config) = &self.n_neighbors {
                    sampler =
                        sampler.with_n_neighbors(neighbors_from_config("n_neighbors", config)?);
                }
                if let Some(config) = &self.n_neighbors_ver3 {
                    sampler = sampler
                        .with_n_neighbors_ver3(neighbors_from_config("n_neighbors_ver3", config)?);
                }
                if let Some(seed) = self.random_state {
                    sampler = sampler.with_random_state(seed);
                }
                Ok(ConfiguredSampler::NearMiss(sampler))
            }
        }
    }
}

fn strategy_from_config<L>(config: &StrategyConfig) -> Result<SamplingStrategy<L>>
where
    L: Label + FromStr,
{
    match config {
        StrategyConfig::Float(ratio) | StrategyConfig::Ratio { ratio } => {
            Ok(SamplingStrategy::Ratio(*ratio))
        }
        StrategyConfig::Named(name) => name.parse(),
        StrategyConfig::Targets { targets } => {
            let mut parsed = BTreeMap::new();
            for (key, &n) in targets {
                let label = key.parse::<L>().map_err(|_| {
                    Error::Config(format!("cannot parse class label '{}'", key))
                })?;
                parsed.insert(label, n);
            }
            Ok(SamplingStrategy::Targets(parsed))
        }
    }
}

fn neighbors_from_config(name: &str, config: &NeighborsConfig) -> Result<NeighborsParam> {
    match config {
        NeighborsConfig::Count(n) => Ok(NeighborsParam::Count(*n)),
        NeighborsConfig::Searcher {
            n_neighbors,
            metric,
        } => Ok(NearestNeighbors::new(*n_neighbors)
            .with_metric(*metric)
            .into()),
        NeighborsConfig::Other(value) => Err(Error::InvalidEstimator(format!(
            "{} has to be a number of neighbors or a neighbor searcher, got '{}'",
            name, value
        ))),
    }
}

//! Sampling strategy resolution
//!
//! A [`SamplingStrategy`] is a policy. [`check_sampling_strategy`] resolves it
//! against the observed class frequencies into a mapping from class label to a
//! sample count: the number of samples to *add* when over-sampling, or the
//! number to *keep* when under-sampling.

use crate::error::{Error, Result};
use crate::sampling::Label;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Number of samples per class
pub type ClassCounts<L> = BTreeMap<L, usize>;

/// User supplied function computing per-class targets from class counts
pub type StrategyFn<L> = Arc<dyn Fn(&ClassCounts<L>) -> BTreeMap<L, usize> + Send + Sync>;

/// Direction of a resampling method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingType {
    OverSampling,
    UnderSampling,
}

/// Policy deciding how many samples each class ends up with
#[derive(Clone, Default)]
pub enum SamplingStrategy<L> {
    /// `NotMajority` when over-sampling, `NotMinority` when under-sampling
    #[default]
    Auto,
    /// Only the minority class
    Minority,
    /// Only the majority class
    Majority,
    /// Every class but the minority class
    NotMinority,
    /// Every class but the majority class
    NotMajority,
    /// Every class
    All,
    /// Desired ratio between the minority and majority class sizes, in (0, 1]
    Ratio(f64),
    /// Desired number of samples per class after resampling
    Targets(BTreeMap<L, usize>),
    /// Function returning the desired number of samples per class
    Callable(StrategyFn<L>),
}

impl<L> SamplingStrategy<L> {
    /// Wrap a closure as a strategy
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&ClassCounts<L>) -> BTreeMap<L, usize> + Send + Sync + 'static,
    {
        SamplingStrategy::Callable(Arc::new(f))
    }

    /// Name of a named policy, `None` for ratio, targets and callables
    pub fn name(&self) -> Option<&'static str> {
        match self {
            SamplingStrategy::Auto => Some("auto"),
            SamplingStrategy::Minority => Some("minority"),
            SamplingStrategy::Majority => Some("majority"),
            SamplingStrategy::NotMinority => Some("not minority"),
            SamplingStrategy::NotMajority => Some("not majority"),
            SamplingStrategy::All => Some("all"),
            _ => None,
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for SamplingStrategy<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingStrategy::Ratio(ratio) => f.debug_tuple("Ratio").field(ratio).finish(),
            SamplingStrategy::Targets(targets) => f.debug_tuple("Targets").field(targets).finish(),
            SamplingStrategy::Callable(_) => f.write_str("Callable(..)"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

impl<L> FromStr for SamplingStrategy<L> {
    type Err = Error;

    /// Parse a named policy, or a float as a ratio
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "auto" => Ok(SamplingStrategy::Auto),
            "minority" => Ok(SamplingStrategy::Minority),
            "majority" => Ok(SamplingStrategy::Majority),
            "not minority" => Ok(SamplingStrategy::NotMinority),
            "not majority" => Ok(SamplingStrategy::NotMajority),
            "all" => Ok(SamplingStrategy::All),
            other => other
                .parse::<f64>()
                .map(SamplingStrategy::Ratio)
                .map_err(|_| {
                    Error::InvalidStrategy(format!(
                        "unknown sampling strategy '{}', expected one of auto, minority, \
                         majority, not minority, not majority, all or a ratio",
                        s
                    ))
                }),
        }
    }
}

/// Count the samples of each class
pub fn class_counts<L: Label>(y: &[L]) -> ClassCounts<L> {
    let mut counts = BTreeMap::new();
    for label in y {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Class with the fewest samples; ties go to the smallest label
pub fn minority_class<L: Label>(counts: &ClassCounts<L>) -> Option<&L> {
    let mut best: Option<(&L, usize)> = None;
    for (label, &count) in counts {
        if best.map_or(true, |(_, c)| count < c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Class with the most samples; ties go to the smallest label
pub fn majority_class<L: Label>(counts: &ClassCounts<L>) -> Option<&L> {
    let mut best: Option<(&L, usize)> = None;
    for (label, &count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Resolve a sampling strategy against the labels `y`
pub fn check_sampling_strategy<L: Label>(
    strategy: &SamplingStrategy<L>,
    y: &[L],
    sampling_type: SamplingType,
) -> Result<BTreeMap<L, usize>> {
    let counts = class_counts(y);
    if counts.is_empty() {
        return Err(Error::EmptyData(
            "cannot resolve a sampling strategy without samples".to_string(),
        ));
    }

    let resolved = match strategy {
        SamplingStrategy::Ratio(ratio) => resolve_ratio(*ratio, &counts, sampling_type)?,
        SamplingStrategy::Targets(targets) => resolve_targets(targets, &counts, sampling_type)?,
        SamplingStrategy::Callable(f) => resolve_targets(&f(&counts), &counts, sampling_type)?,
        named => resolve_named(named, &counts, sampling_type)?,
    };

    log::debug!(
        "resolved sampling strategy {:?} ({:?}) to {:?}",
        strategy,
        sampling_type,
        resolved
    );
    Ok(resolved)
}

fn resolve_named<L: Label>(
    strategy: &SamplingStrategy<L>,
    counts: &ClassCounts<L>,
    sampling_type: SamplingType,
) -> Result<BTreeMap<L, usize>> {
    // counts is non-empty here
    let minority = minority_class(counts).cloned();
    let majority = majority_class(counts).cloned();
    let n_min = minority.as_ref().map_or(0, |l| counts[l]);
    let n_max = majority.as_ref().map_or(0, |l| counts[l]);

    let selected: Box<dyn Fn(&L) -> bool> = match (strategy, sampling_type) {
        (SamplingStrategy::Minority, SamplingType::UnderSampling) => {
            return Err(Error::InvalidStrategy(
                "'minority' cannot be used with under-sampling methods".to_string(),
            ))
        }
        (SamplingStrategy::Majority, SamplingType::OverSampling) => {
            return Err(Error::InvalidStrategy(
                "'majority' cannot be used with over-sampling methods".to_string(),
            ))
        }
        (SamplingStrategy::Minority, _) => Box::new(move |l| Some(l) == minority.as_ref()),
        (SamplingStrategy::Majority, _) => Box::new(move |l| Some(l) == majority.as_ref()),
        (SamplingStrategy::NotMinority, _)
        | (SamplingStrategy::Auto, SamplingType::UnderSampling) => {
            Box::new(move |l| Some(l) != minority.as_ref())
        }
        (SamplingStrategy::NotMajority, _)
        | (SamplingStrategy::Auto, SamplingType::OverSampling) => {
            Box::new(move |l| Some(l) != majority.as_ref())
        }
        (SamplingStrategy::All, _) => Box::new(|_| true),
        (other, _) => {
            return Err(Error::InvalidStrategy(format!(
                "{:?} is not a named strategy",
                other
            )))
        }
    };

    Ok(counts
        .iter()
        .filter(|(label, _)| selected(*label))
        .map(|(label, &count)| {
            let n = match sampling_type {
                SamplingType::OverSampling => n_max - count,
                SamplingType::UnderSampling => n_min,
            };
            (label.clone(), n)
        })
        .collect())
}

fn resolve_ratio<L: Label>(
    ratio: f64,
    counts: &ClassCounts<L>,
    sampling_type: SamplingType,
) -> Result<BTreeMap<L, usize>> {
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(Error::InvalidStrategy(format!(
            "a ratio strategy must be in (0, 1], got {}",
            ratio
        )));
    }

    let mut resolved = BTreeMap::new();
    match sampling_type {
        SamplingType::OverSampling => {
            let majority = majority_class(counts).cloned();
            let n_max = majority.as_ref().map_or(0, |l| counts[l]) as f64;
            for (label, &count) in counts {
                if Some(label) == majority.as_ref() {
                    continue;
                }
                let n = n_max * ratio - count as f64;
                if n < 0.0 {
                    return Err(Error::InvalidStrategy(format!(
                        "ratio {} would remove samples from class {:?} while over-sampling",
                        ratio, label
                    )));
                }
                resolved.insert(label.clone(), n.trunc() as usize);
            }
        }
        SamplingType::UnderSampling => {
            let minority = minority_class(counts).cloned();
            let n_min = minority.as_ref().map_or(0, |l| counts[l]) as f64;
            for (label, &count) in counts {
                if Some(label) == minority.as_ref() {
                    continue;
                }
                let n = (n_min / ratio).trunc() as usize;
                if n > count {
                    return Err(Error::InvalidStrategy(format!(
                        "ratio {} would add samples to class {:?} while under-sampling",
                        ratio, label
                    )));
                }
                resolved.insert(label.clone(), n);
            }
        }
    }
    Ok(resolved)
}

fn resolve_targets<L: Label>(
    targets: &BTreeMap<L, usize>,
    counts: &ClassCounts<L>,
    sampling_type: SamplingType,
) -> Result<BTreeMap<L, usize>> {
    let n_max = majority_class(counts).map_or(0, |l| counts[l]);
    let mut resolved = BTreeMap::new();
    for (label, &n_samples) in targets {
        let count = *counts.get(label).ok_or_else(|| {
            Error::InvalidStrategy(format!("class {:?} is not present in the target", label))
        })?;

        let n = match sampling_type {
            SamplingType::OverSampling => {
                if n_samples < count {
                    return Err(Error::InvalidStrategy(format!(
                        "with over-sampling the number of samples of class {:?} must be at \
                         least its original count {}, got {}",
                        label, count, n_samples
                    )));
                }
                if n_samples > n_max {
                    log::warn!(
                        "after over-sampling, class {:?} will have {} samples, more than the \
                         {} samples of the majority class",
                        label,
                        n_samples,
                        n_max
                    );
                }
                n_samples - count
            }
            SamplingType::UnderSampling => {
                if n_samples > count {
                    return Err(Error::InvalidStrategy(format!(
                        "with under-sampling the number of samples of class {:?} must be at \
                         most its original count {}, got {}",
                        label, count, n_samples
                    )));
                }
                n_samples
            }
        };
        resolved.insert(label.clone(), n);
    }
    Ok(resolved)
}

//! Nearest neighbor search used by the distance based samplers
//!
//! Samplers accept their neighbor searcher either as a plain neighbor count or
//! as a pre-configured estimator object. An estimator object is only usable if
//! it exposes the k-nearest-neighbor query capability; this is checked at
//! runtime by [`check_neighbors_object`].

pub mod brute;

pub use brute::{DistanceMetric, NearestNeighbors};

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Result of a k-nearest-neighbor query, one row per query point
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood {
    /// Distances to the neighbors, ascending
    pub distances: Vec<Vec<f64>>,
    /// Positions of the neighbors in the fitted data
    pub indices: Vec<Vec<usize>>,
}

/// k-nearest-neighbor query interface
pub trait KNeighbors: Send + Sync {
    /// Index the points `x`
    fn fit(&mut self, x: &[Vec<f64>]) -> Result<()>;

    /// Find the nearest fitted points of every query row
    ///
    /// `n_neighbors` overrides the configured neighbor count for this query.
    fn kneighbors(&self, query: &[Vec<f64>], n_neighbors: Option<usize>) -> Result<Neighborhood>;

    /// Configured neighbor count
    fn n_neighbors(&self) -> usize;

    /// Unfitted copy carrying the same parameters
    fn box_clone(&self) -> Box<dyn KNeighbors>;
}

/// Anything that can be handed to a sampler as a parameter object
pub trait Estimator: Send + Sync {
    fn name(&self) -> &str;

    /// The k-nearest-neighbor capability, if the estimator has it
    fn as_kneighbors(&self) -> Option<&dyn KNeighbors> {
        None
    }
}

/// Neighbor search parameter: a count or an estimator object
#[derive(Clone)]
pub enum NeighborsParam {
    Count(usize),
    Estimator(Arc<dyn Estimator>),
}

impl NeighborsParam {
    pub fn estimator<E: Estimator + 'static>(estimator: E) -> Self {
        NeighborsParam::Estimator(Arc::new(estimator))
    }
}

impl From<usize> for NeighborsParam {
    fn from(n: usize) -> Self {
        NeighborsParam::Count(n)
    }
}

impl From<NearestNeighbors> for NeighborsParam {
    fn from(nn: NearestNeighbors) -> Self {
        NeighborsParam::estimator(nn)
    }
}

impl fmt::Debug for NeighborsParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeighborsParam::Count(n) => f.debug_tuple("Count").field(n).finish(),
            NeighborsParam::Estimator(e) => f.debug_tuple("Estimator").field(&e.name()).finish(),
        }
    }
}

/// Turn a neighbor parameter into an unfitted neighbor searcher
///
/// A count `k` becomes a [`NearestNeighbors`] with `k + additional_neighbor`
/// neighbors. An estimator object is copied if it supports k-nearest-neighbor
/// queries and rejected otherwise.
pub fn check_neighbors_object(
    name: &str,
    param: &NeighborsParam,
    additional_neighbor: usize,
) -> Result<Box<dyn KNeighbors>> {
    match param {
        NeighborsParam::Count(0) => Err(Error::InvalidEstimator(format!(
            "{} must be a positive number of neighbors",
            name
        ))),
        NeighborsParam::Count(n) => Ok(Box::new(NearestNeighbors::new(n + additional_neighbor))),
        NeighborsParam::Estimator(estimator) => match estimator.as_kneighbors() {
            Some(knn) => Ok(knn.box_clone()),
            None => Err(Error::InvalidEstimator(format!(
                "{} has to be a number of neighbors or an object supporting k-nearest-neighbor \
                 queries, got {}",
                name,
                estimator.name()
            ))),
        },
    }
}

//! Exact k-nearest-neighbor search by exhaustive distance computation

use crate::error::{Error, Result};
use crate::neighbors::{Estimator, KNeighbors, Neighborhood};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Distance metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance
    #[default]
    Euclidean,
    /// Manhattan distance
    Manhattan,
    /// Cosine distance
    Cosine,
}

impl DistanceMetric {
    /// Distance between two points of equal dimension
    pub fn distance(&self, x: &[f64], y: &[f64]) -> f64 {
        match self {
            DistanceMetric::Euclidean => x
                .iter()
                .zip(y.iter())
                .map(|(&xi, &yi)| (xi - yi).powi(2))
                .sum::<f64>()
                .sqrt(),
            DistanceMetric::Manhattan => x
                .iter()
                .zip(y.iter())
                .map(|(&xi, &yi)| (xi - yi).abs())
                .sum(),
            DistanceMetric::Cosine => {
                let dot_product: f64 = x.iter().zip(y.iter()).map(|(&xi, &yi)| xi * yi).sum();
                let norm_x: f64 = x.iter().map(|&xi| xi.powi(2)).sum::<f64>().sqrt();
                let norm_y: f64 = y.iter().map(|&yi| yi.powi(2)).sum::<f64>().sqrt();

                if norm_x > 0.0 && norm_y > 0.0 {
                    1.0 - dot_product / (norm_x * norm_y)
                } else {
                    1.0 // maximum distance
                }
            }
        }
    }
}

/// Brute-force nearest neighbor index
///
/// Queries are answered in parallel over the query rows. Neighbors come back
/// sorted by increasing distance; equal distances keep the order in which the
/// points were fitted.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    n_neighbors: usize,
    metric: DistanceMetric,
    data: Vec<Vec<f64>>,
    fitted: bool,
}

impl NearestNeighbors {
    /// New index returning `n_neighbors` neighbors by default
    pub fn new(n_neighbors: usize) -> Self {
        NearestNeighbors {
            n_neighbors,
            metric: DistanceMetric::Euclidean,
            data: Vec::new(),
            fitted: false,
        }
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Number of fitted points
    pub fn n_samples_fit(&self) -> usize {
        self.data.len()
    }

    fn nearest(&self, point: &[f64], k: usize) -> (Vec<f64>, Vec<usize>) {
        let mut distances: Vec<(usize, f64)> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, other)| (i, self.metric.distance(point, other)))
            .collect();

        // stable sort, ties keep index order
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));

        distances.into_iter().take(k).map(|(i, d)| (d, i)).unzip()
    }
}

impl Default for NearestNeighbors {
    fn default() -> Self {
        Self::new(5)
    }
}

impl KNeighbors for NearestNeighbors {
    fn fit(&mut self, x: &[Vec<f64>]) -> Result<()> {
        crate::utils::check_numeric_rows(x)?;
        self.data = x.to_vec();
        self.fitted = true;
        Ok(())
    }

    fn kneighbors(&self, query: &[Vec<f64>], n_neighbors: Option<usize>) -> Result<Neighborhood> {
        if !self.fitted {
            return Err(Error::NotFitted(
                "NearestNeighbors must be fitted before querying".to_string(),
            ));
        }

        let k = n_neighbors.unwrap_or(self.n_neighbors);
        if k == 0 {
            return Err(Error::InvalidParameter(
                "n_neighbors must be greater than 0".to_string(),
            ));
        }
        let n_samples_fit = self.n_samples_fit();
        if k > n_samples_fit {
            return Err(Error::InvalidParameter(format!(
                "expected n_neighbors <= n_samples_fit, got n_neighbors = {} and \
                 n_samples_fit = {}",
                k, n_samples_fit
            )));
        }

        let n_features = self.data[0].len();
        if let Some((i, row)) = query.iter().enumerate().find(|(_, r)| r.len() != n_features) {
            return Err(Error::DimensionMismatch(format!(
                "query row {} has {} features, the index was fitted with {}",
                i,
                row.len(),
                n_features
            )));
        }

        let (distances, indices) = query
            .par_iter()
            .map(|point| self.nearest(point, k))
            .collect::<Vec<_>>()
            .into_iter()
            .unzip();

        Ok(Neighborhood { distances, indices })
    }

    fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    fn box_clone(&self) -> Box<dyn KNeighbors> {
        // an unfitted copy with the same parameters
        Box::new(NearestNeighbors::new(self.n_neighbors).with_metric(self.metric))
    }
}

impl Estimator for NearestNeighbors {
    fn name(&self) -> &str {
        "NearestNeighbors"
    }

    fn as_kneighbors(&self) -> Option<&dyn KNeighbors> {
        Some(self)
    }
}

//! # imbrs
//!
//! Resampling methods for class-imbalanced datasets.
//!
//! - [`over_sampling::RandomOverSampler`] duplicates samples of the smaller
//!   classes, drawn at random with replacement.
//! - [`under_sampling::NearMiss`] keeps the samples of the larger classes
//!   selected by their distances to the minority class.
//!
//! Every sampler implements [`sampling::Sampler`]: `fit` validates the data and
//! resolves the [`sampling::SamplingStrategy`], `sample` builds the resampled
//! data, and `fit_sample` does both.
//!
//! ```
//! use imbrs::prelude::*;
//!
//! let x = vec![
//!     vec![0.0, 0.0], vec![0.1, 0.2], vec![0.2, 0.1],
//!     vec![1.0, 1.0], vec![1.1, 0.9], vec![5.0, 5.0],
//! ];
//! let y = vec![0, 0, 0, 0, 1, 1];
//!
//! let mut nm = NearMiss::new().with_version(3).with_n_neighbors(NeighborsParam::Count(2));
//! let resampled = nm.fit_sample(&x, &y).unwrap();
//! assert_eq!(resampled.class_counts()[&0], 2);
//! ```

pub mod config;
pub mod error;
pub mod neighbors;
pub mod over_sampling;
pub mod sampling;
pub mod under_sampling;
pub mod utils;

// Re-export commonly used types
pub use config::{ConfiguredSampler, SamplerConfig};
pub use error::{Error, ImbrsError, Result};
pub use neighbors::{KNeighbors, NearestNeighbors, NeighborsParam};
pub use over_sampling::RandomOverSampler;
pub use sampling::{Resampled, Sampler, SamplingStrategy};
pub use under_sampling::NearMiss;

/// Commonly used items in one import
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::neighbors::{
        DistanceMetric, Estimator, KNeighbors, NearestNeighbors, NeighborsParam,
    };
    pub use crate::over_sampling::RandomOverSampler;
    pub use crate::sampling::{Resampled, Sampler, SamplingStrategy, SamplingType};
    pub use crate::under_sampling::NearMiss;
    pub use crate::utils::RandomState;
}

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

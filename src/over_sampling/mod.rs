//! Over-sampling methods

pub mod random_over_sampler;

pub use random_over_sampler::RandomOverSampler;

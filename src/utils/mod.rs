//! Shared helpers: input validation and random state handling

pub mod random;
pub mod validation;

pub use random::RandomState;
pub use validation::{
    check_numeric_rows, check_target_type, check_x_y, from_one_hot, to_one_hot, type_of_target,
    TargetType,
};

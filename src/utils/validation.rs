//! Input validation for samplers
//!
//! Checks applied to `(x, y)` before any sampling happens. Every check returns
//! an error instead of coercing silently.

use crate::error::{Error, Result};
use num_traits::ToPrimitive;
use std::collections::BTreeSet;

/// Kind of target vector, as inferred from its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    /// Two or fewer distinct integral values
    Binary,
    /// More than two distinct integral values
    Multiclass,
    /// At least one non-integral value
    Continuous,
    /// Empty input, non-finite values or an unusable matrix
    Unknown,
}

impl TargetType {
    /// Whether samplers in this crate can work with the target
    pub fn is_supported(self) -> bool {
        matches!(self, TargetType::Binary | TargetType::Multiclass)
    }
}

/// Check that `x` and `y` are non-empty and have the same number of samples
pub fn check_x_y<R, L>(x: &[R], y: &[L]) -> Result<()> {
    if x.is_empty() {
        return Err(Error::EmptyData("X contains no samples".to_string()));
    }

    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }

    Ok(())
}

/// Check a numeric feature matrix and return its number of features
///
/// All rows must have the same, non-zero width and contain finite values.
pub fn check_numeric_rows(x: &[Vec<f64>]) -> Result<usize> {
    let n_features = match x.first() {
        Some(row) => row.len(),
        None => return Err(Error::EmptyData("X contains no samples".to_string())),
    };

    if n_features == 0 {
        return Err(Error::DimensionMismatch(
            "X must contain at least one feature".to_string(),
        ));
    }

    for (i, row) in x.iter().enumerate() {
        if row.len() != n_features {
            return Err(Error::DimensionMismatch(format!(
                "row {} has {} features, expected {}",
                i,
                row.len(),
                n_features
            )));
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidValue(format!(
                "row {} contains NaN or infinite values",
                i
            )));
        }
    }

    Ok(n_features)
}

/// Infer the target type of a numeric label vector
pub fn type_of_target<T: ToPrimitive>(y: &[T]) -> TargetType {
    if y.is_empty() {
        return TargetType::Unknown;
    }

    let mut distinct = BTreeSet::new();
    for value in y {
        let v = match value.to_f64() {
            Some(v) if v.is_finite() => v,
            _ => return TargetType::Unknown,
        };
        if v.fract() != 0.0 {
            return TargetType::Continuous;
        }
        distinct.insert(v as i64);
    }

    if distinct.len() <= 2 {
        TargetType::Binary
    } else {
        TargetType::Multiclass
    }
}

/// Validate a numeric target and convert it to integer class labels
///
/// Continuous targets (any value with a fractional part) and non-finite values
/// are rejected.
pub fn check_target_type<T: ToPrimitive>(y: &[T]) -> Result<Vec<i64>> {
    match type_of_target(y) {
        target if target.is_supported() => {}
        TargetType::Continuous => {
            return Err(Error::InvalidTarget(
                "continuous targets are not supported, expected binary or multiclass labels"
                    .to_string(),
            ))
        }
        other => {
            return Err(Error::InvalidTarget(format!(
                "unsupported target type {:?}",
                other
            )))
        }
    }

    y.iter()
        .map(|v| {
            v.to_i64()
                .ok_or_else(|| Error::InvalidTarget("label does not fit in i64".to_string()))
        })
        .collect()
}

/// Decode a one-hot target matrix into class positions
///
/// Each row must contain exactly one `1` and zeros elsewhere. Rows with several
/// active classes are multilabel targets, which are not supported.
pub fn from_one_hot(y: &[Vec<u8>]) -> Result<Vec<usize>> {
    let n_classes = match y.first() {
        Some(row) => row.len(),
        None => return Err(Error::EmptyData("target contains no samples".to_string())),
    };

    y.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != n_classes {
                return Err(Error::DimensionMismatch(format!(
                    "target row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_classes
                )));
            }
            if row.iter().any(|&v| v > 1) {
                return Err(Error::InvalidTarget(format!(
                    "target row {} is not a binary indicator",
                    i
                )));
            }
            let mut active = row.iter().enumerate().filter(|(_, &v)| v == 1);
            match (active.next(), active.next()) {
                (Some((class, _)), None) => Ok(class),
                _ => Err(Error::InvalidTarget(
                    "multilabel and multioutput targets are not supported".to_string(),
                )),
            }
        })
        .collect()
}

/// Encode class positions as a one-hot matrix with `n_classes` columns
pub fn to_one_hot(labels: &[usize], n_classes: usize) -> Result<Vec<Vec<u8>>> {
    labels
        .iter()
        .map(|&label| {
            if label >= n_classes {
                return Err(Error::InvalidTarget(format!(
                    "class {} is out of range for {} classes",
                    label, n_classes
                )));
            }
            let mut row = vec![0u8; n_classes];
            row[label] = 1;
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_x_y() {
        let x = vec![vec![1.0], vec![2.0]];
        assert!(check_x_y(&x, &[0, 1]).is_ok());

        let err = check_x_y(&x, &[0, 1, 1]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 2, actual: 3 }));

        let empty: Vec<Vec<f64>> = vec![];
        let labels: Vec<i32> = vec![];
        assert!(matches!(check_x_y(&empty, &labels), Err(Error::EmptyData(_))));
    }

    #[test]
    fn test_check_numeric_rows() {
        assert_eq!(check_numeric_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(), 2);
        assert!(check_numeric_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(check_numeric_rows(&[vec![f64::NAN]]).is_err());
        assert!(check_numeric_rows(&[vec![]]).is_err());
    }

    #[test]
    fn test_type_of_target() {
        assert_eq!(type_of_target(&[0, 1, 1, 0]), TargetType::Binary);
        assert_eq!(type_of_target(&[0.0, 1.0, 2.0]), TargetType::Multiclass);
        assert_eq!(type_of_target(&[0.5, 1.0]), TargetType::Continuous);
        assert_eq!(type_of_target(&[f64::NAN]), TargetType::Unknown);
        let empty: [f64; 0] = [];
        assert_eq!(type_of_target(&empty), TargetType::Unknown);

        assert!(TargetType::Binary.is_supported());
        assert!(TargetType::Multiclass.is_supported());
        assert!(!TargetType::Continuous.is_supported());
        assert!(!TargetType::Unknown.is_supported());
    }

    #[test]
    fn test_check_target_type() {
        assert_eq!(check_target_type(&[2.0, 0.0, 1.0]).unwrap(), vec![2, 0, 1]);
        let err = check_target_type(&[0.1, 0.7, 0.3]).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
    }

    #[test]
    fn test_one_hot() {
        let y = vec![vec![0, 1, 0], vec![1, 0, 0], vec![0, 0, 1]];
        let decoded = from_one_hot(&y).unwrap();
        assert_eq!(decoded, vec![1, 0, 2]);
        assert_eq!(to_one_hot(&decoded, 3).unwrap(), y);

        // two active classes in one row
        assert!(from_one_hot(&[vec![1, 1, 0]]).is_err());
        assert!(from_one_hot(&[vec![0, 0, 0]]).is_err());
        assert!(to_one_hot(&[3], 3).is_err());
    }
}

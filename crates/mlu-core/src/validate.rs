//! Argument validation for count-like parameters.

use serde_json::Value;

use crate::error::{Error, Result};

/// A single count or a list of counts, as accepted by batch/sampler options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositiveInts {
    One(i64),
    Many(Vec<i64>),
}

impl From<i64> for PositiveInts {
    fn from(value: i64) -> Self {
        PositiveInts::One(value)
    }
}

impl From<Vec<i64>> for PositiveInts {
    fn from(values: Vec<i64>) -> Self {
        PositiveInts::Many(values)
    }
}

impl From<&[i64]> for PositiveInts {
    fn from(values: &[i64]) -> Self {
        PositiveInts::Many(values.to_vec())
    }
}

impl PositiveInts {
    /// Read a count option named `name` out of a parsed config value.
    ///
    /// Only integers are accepted, as a single value or as list items. The
    /// error names `name` and the offending JSON value.
    pub fn from_value(value: &Value, name: &str) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| integer(item, name))
                .collect::<Result<Vec<_>>>()
                .map(PositiveInts::Many),
            Value::Number(_) => integer(value, name).map(PositiveInts::One),
            other => Err(Error::invalid(
                name,
                format!(
                    "unsupported argument type. Expected int or list of ints, but got {}",
                    other
                ),
            )),
        }
    }
}

fn integer(value: &Value, name: &str) -> Result<i64> {
    if let Some(v) = value.as_i64() {
        return Ok(v);
    }
    let reason = if value.is_u64() {
        format!("{} is out of range for a count, got {}", name, value)
    } else {
        format!("{} is expected to contain integers, but got {}", name, value)
    };
    Err(Error::invalid(name, reason))
}

impl TryFrom<&Value> for PositiveInts {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        PositiveInts::from_value(value, "value")
    }
}

/// Check that `var` is a positive integer or a non-empty list of positive integers.
///
/// `name` is the argument name reported in the error.
pub fn check_if_nonempty_positive_integers(var: &PositiveInts, name: &str) -> Result<()> {
    match var {
        PositiveInts::Many(values) => {
            if values.is_empty() || values.iter().any(|&x| x <= 0) {
                return Err(Error::invalid(
                    name,
                    format!(
                        "{} is expected to be non-empty and contain positive integers, but got {:?}",
                        name, values
                    ),
                ));
            }
        }
        PositiveInts::One(value) => {
            if *value <= 0 {
                return Err(Error::invalid(
                    name,
                    format!("{} is expected to be a positive integer, but got {}", name, value),
                ));
            }
        }
    }
    Ok(())
}

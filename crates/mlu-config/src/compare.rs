//! Recursive comparison of state dicts (checkpoints, metric dumps, configs).
//!
//! Unlike plain `==`, the comparison reports where two trees differ: the key
//! path plus both values. Tensor leaves are compared approximately.

use std::collections::BTreeMap;
use std::fmt;

use ndarray::{Array, ArrayD, Dimension, Zip};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CompareError;

/// String-keyed tree of tensors and plain values.
pub type StateDict = BTreeMap<String, StateValue>;

/// A node of a [`StateDict`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Dict(StateDict),
    Tensor(ArrayD<f64>),
    Scalar(Value),
}

impl From<Value> for StateValue {
    /// JSON objects become nested dicts; everything else is a scalar leaf.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                StateValue::Dict(map.into_iter().map(|(k, v)| (k, StateValue::from(v))).collect())
            }
            other => StateValue::Scalar(other),
        }
    }
}

impl<D: Dimension> From<Array<f64, D>> for StateValue {
    fn from(array: Array<f64, D>) -> Self {
        StateValue::Tensor(array.into_dyn())
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Dict(d) => {
                write!(f, "{{")?;
                for (i, (k, v)) in d.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            StateValue::Tensor(t) => write!(f, "tensor(shape={:?}, {})", t.shape(), t),
            StateValue::Scalar(v) => write!(f, "{}", v),
        }
    }
}

/// Build a [`StateDict`] from a JSON object.
pub fn state_dict_from_json(map: serde_json::Map<String, Value>) -> StateDict {
    map.into_iter()
        .map(|(k, v)| (k, StateValue::from(v)))
        .collect()
}

/// Tolerances for tensor leaves: `|a - b| <= atol + rtol * |a|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    /// Element-wise closeness of two tensors of identical shape.
    ///
    /// NaN is never close to anything; equal infinities are close.
    pub fn allclose(&self, a: &ArrayD<f64>, b: &ArrayD<f64>) -> bool {
        if a.shape() != b.shape() {
            return false;
        }
        Zip::from(a)
            .and(b)
            .all(|&x, &y| x == y || (x - y).abs() <= self.atol + self.rtol * x.abs())
    }
}

/// Check that `d1` and `d2` hold the same tree.
///
/// Key sets must match at every level. Tensors are compared with the default
/// [`Tolerance`], everything else exactly. Returns the first difference as an
/// error carrying the key path and both values.
pub fn compare_dicts_recursively(d1: &StateDict, d2: &StateDict) -> Result<bool, CompareError> {
    compare_dicts_recursively_with(d1, d2, Tolerance::default())
}

/// [`compare_dicts_recursively`] with explicit tensor tolerances.
pub fn compare_dicts_recursively_with(
    d1: &StateDict,
    d2: &StateDict,
    tol: Tolerance,
) -> Result<bool, CompareError> {
    let mut diffs = Vec::new();
    diff_dicts(d1, d2, "", tol, true, &mut diffs);
    match diffs.into_iter().next() {
        Some(diff) => Err(diff),
        None => Ok(true),
    }
}

/// Every difference between `d1` and `d2`, in key order.
///
/// Subtrees under mismatching key sets are not descended into.
pub fn diff_state_dicts(d1: &StateDict, d2: &StateDict, tol: Tolerance) -> Vec<CompareError> {
    let mut diffs = Vec::new();
    diff_dicts(d1, d2, "", tol, false, &mut diffs);
    diffs
}

/// Value equality where numbers compare by value, so `1 == 1.0`.
fn scalars_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                x == y
            } else if a.is_f64() || b.is_f64() {
                a.as_f64() == b.as_f64()
            } else {
                // a negative i64 against a u64 above i64::MAX
                false
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| scalars_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, x)| b.get(k).is_some_and(|y| scalars_equal(x, y)))
        }
        _ => l == r,
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Returns false once `first_only` is set and a diff has been recorded.
fn diff_dicts(
    d1: &StateDict,
    d2: &StateDict,
    path: &str,
    tol: Tolerance,
    first_only: bool,
    diffs: &mut Vec<CompareError>,
) -> bool {
    if !d1.keys().eq(d2.keys()) {
        diffs.push(CompareError::KeySetMismatch {
            path: if path.is_empty() { "<root>".into() } else { path.to_string() },
            left: d1.keys().cloned().collect(),
            right: d2.keys().cloned().collect(),
        });
        return !first_only;
    }

    for (key, left) in d1 {
        let Some(right) = d2.get(key) else {
            continue;
        };
        let field = child_path(path, key);
        let same = match (left, right) {
            (StateValue::Dict(l), StateValue::Dict(r)) => {
                if !diff_dicts(l, r, &field, tol, first_only, diffs) {
                    return false;
                }
                continue;
            }
            (StateValue::Tensor(l), StateValue::Tensor(r)) => tol.allclose(l, r),
            (StateValue::Scalar(l), StateValue::Scalar(r)) => scalars_equal(l, r),
            _ => false,
        };
        if !same {
            diffs.push(CompareError::ValueMismatch {
                path: field,
                left: left.to_string(),
                right: right.to_string(),
            });
            if first_only {
                return false;
            }
        }
    }
    true
}

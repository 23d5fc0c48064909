//! Flattening of nested mappings into path-keyed single-level mappings.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// How [`flatten_dict`] builds keys and which subtrees it skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Prefix for every produced key (empty for none)
    pub parent_key: String,
    /// Joins ancestor keys
    pub sep: String,
    /// Key names whose whole subtree is dropped, at any depth
    pub ignored_keys: HashSet<String>,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            parent_key: String::new(),
            sep: "/".to_string(),
            ignored_keys: HashSet::new(),
        }
    }
}

impl FlattenOptions {
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    pub fn with_parent_key(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = parent_key.into();
        self
    }

    pub fn ignore<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_keys.extend(keys.into_iter().map(Into::into));
        self
    }
}

/// Flatten `d` depth-first into `{ "a/b/c": leaf }` form.
///
/// Mapping values are recursed into; everything else (lists included) is a
/// leaf. If two paths produce the same key, the later one wins.
pub fn flatten_dict(d: &Map<String, Value>, opts: &FlattenOptions) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(d, &opts.parent_key, opts, &mut out);
    out
}

fn flatten_into(
    d: &Map<String, Value>,
    parent_key: &str,
    opts: &FlattenOptions,
    out: &mut Map<String, Value>,
) {
    for (k, v) in d {
        if opts.ignored_keys.contains(k) {
            continue;
        }
        let new_key = if parent_key.is_empty() {
            k.clone()
        } else {
            format!("{}{}{}", parent_key, opts.sep, k)
        };
        match v {
            Value::Object(child) => flatten_into(child, &new_key, opts, out),
            leaf => {
                if out.insert(new_key.clone(), leaf.clone()).is_some() {
                    warn!(key = %new_key, "flattened key collision, keeping the later value");
                }
            }
        }
    }
}

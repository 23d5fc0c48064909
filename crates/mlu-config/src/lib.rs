//! mlu-config: structured configs and nested-mapping utilities
//!
//! Provides interpolation-aware configs, conversion to plain mappings,
//! flattening into path-keyed mappings, and recursive state-dict comparison
//! with diagnostics.

pub mod compare;
pub mod config;
pub mod convert;
pub mod error;
pub mod flatten;

pub use compare::{
    StateDict, StateValue, Tolerance, compare_dicts_recursively, compare_dicts_recursively_with,
    diff_state_dicts, state_dict_from_json,
};
pub use config::{DictConfig, MISSING};
pub use convert::{ConfigSource, dictconfig_to_dict};
pub use error::{CompareError, ConfigError, Result};
pub use flatten::{FlattenOptions, flatten_dict};

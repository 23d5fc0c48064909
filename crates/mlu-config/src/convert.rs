//! Conversion of structured or plain configs into plain nested mappings.

use serde_json::{Map, Value};

use crate::config::{DictConfig, type_name};
use crate::error::{ConfigError, Result};

/// Anything that can be read as a plain nested mapping.
pub trait ConfigSource {
    fn to_plain(&self) -> Result<Map<String, Value>>;
}

impl ConfigSource for DictConfig {
    fn to_plain(&self) -> Result<Map<String, Value>> {
        self.to_container(true)
    }
}

impl ConfigSource for Map<String, Value> {
    fn to_plain(&self) -> Result<Map<String, Value>> {
        Ok(self.clone())
    }
}

impl ConfigSource for Value {
    fn to_plain(&self) -> Result<Map<String, Value>> {
        match self {
            Value::Object(map) => Ok(map.clone()),
            other => Err(ConfigError::NotAMapping(type_name(other).to_string())),
        }
    }
}

/// Resolve `cfg` into a plain nested mapping, keeping key order and nesting.
pub fn dictconfig_to_dict<C>(cfg: &C) -> Result<Map<String, Value>>
where
    C: ConfigSource + ?Sized,
{
    cfg.to_plain()
}

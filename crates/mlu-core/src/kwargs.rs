//! Keyword-argument adaptation against a callee's declared parameter names.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Keyword arguments keyed by parameter name.
pub type Kwargs = Map<String, Value>;

/// Parameter names a callable accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<String>,
}

impl Signature {
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepts(&self, parameter: &str) -> bool {
        self.parameters.iter().any(|p| p == parameter)
    }
}

/// Pass `value` under the first candidate name that `signature` accepts.
pub fn adapt_argument_as_kwarg(
    signature: &Signature,
    candidates: &[&str],
    value: Value,
) -> Result<Kwargs> {
    match candidates.iter().find(|name| signature.accepts(name)) {
        Some(name) => {
            let mut kwargs = Kwargs::new();
            kwargs.insert((*name).to_string(), value);
            Ok(kwargs)
        }
        None => Err(Error::Compatibility {
            callee: signature.name.clone(),
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            available: signature.parameters.clone(),
        }),
    }
}

/// Drop every keyword argument `signature` does not declare.
pub fn remove_unused_kwargs(kwargs: &Kwargs, signature: &Signature) -> Kwargs {
    kwargs
        .iter()
        .filter(|(k, _)| signature.accepts(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

//! Structured configs with lazily resolved `${...}` interpolations.
//!
//! A [`DictConfig`] keeps the raw tree as written. String leaves may reference
//! other nodes and are only resolved when the config is converted or a node is
//! selected:
//!
//! * `${a.b}`: absolute key path, list items addressed by index (`${a.0}`)
//! * `${.b}`, `${..b}`: relative to the enclosing mapping, one level up per extra dot
//! * `${oc.env:NAME}` / `${oc.env:NAME,default}`: environment variable
//! * `???`: mandatory value that must be overridden before use
//!
//! A string that is exactly one interpolation takes the referenced node as is
//! (any type). Interpolations embedded in a longer string must resolve to scalars.

use mlu_core::{PositiveInts, check_if_nonempty_positive_integers};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Placeholder for a mandatory value that was never set.
pub const MISSING: &str = "???";

const ENV_RESOLVER: &str = "oc.env";

/// Nested mapping whose string leaves may be interpolations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DictConfig {
    root: Map<String, Value>,
}

impl DictConfig {
    pub fn new(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self::new(root)),
            other => Err(ConfigError::NotAMapping(type_name(&other).to_string())),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// The tree as written, interpolations untouched.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Set (or override) the raw value at a dotted key path, creating
    /// intermediate mappings as needed.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let keys: Vec<&str> = path.split('.').collect();
        let (last, parents) = keys
            .split_last()
            .ok_or_else(|| ConfigError::NotAMapping(path.to_string()))?;

        let mut node = &mut self.root;
        for key in parents {
            let child = node
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match child {
                Value::Object(map) => map,
                other => return Err(ConfigError::NotAMapping(type_name(other).to_string())),
            };
        }
        node.insert(last.to_string(), value);
        Ok(())
    }

    /// Resolved value at a dotted key path.
    pub fn select(&self, path: &str) -> Result<Value> {
        let keys: Vec<String> = path.split('.').map(str::to_string).collect();
        let mut resolver = Resolver::new(&self.root);
        resolver.resolve_path(&keys, path, "<select>")
    }

    /// Resolved count option at `path`: a positive integer or a non-empty
    /// list of positive integers.
    pub fn positive_ints(&self, path: &str) -> Result<PositiveInts> {
        let value = self.select(path)?;
        let ints = PositiveInts::from_value(&value, path)?;
        check_if_nonempty_positive_integers(&ints, path)?;
        Ok(ints)
    }

    /// Copy the tree into plain containers, optionally resolving interpolations.
    pub fn to_container(&self, resolve: bool) -> Result<Map<String, Value>> {
        if !resolve {
            return Ok(self.root.clone());
        }
        let mut resolver = Resolver::new(&self.root);
        resolver.resolve_map(&self.root, &mut Vec::new())
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

enum Segment<'a> {
    Literal(&'a str),
    Interp(&'a str),
}

/// Split `value` into literal text and `${...}` bodies.
fn parse_segments<'a>(value: &'a str, at: &str) -> Result<Vec<Segment<'a>>> {
    let mut segments = Vec::new();
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        if start > 0 {
            segments.push(Segment::Literal(&rest[..start]));
        }
        let body = &rest[start + 2..];
        let end = body.find('}').ok_or_else(|| ConfigError::Syntax {
            value: value.to_string(),
            at: at.to_string(),
        })?;
        segments.push(Segment::Interp(body[..end].trim()));
        rest = &body[end + 1..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

fn join_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

/// Walks the raw tree, tracking which nodes are being resolved to catch cycles.
struct Resolver<'a> {
    root: &'a Map<String, Value>,
    in_progress: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(root: &'a Map<String, Value>) -> Self {
        Self {
            root,
            in_progress: Vec::new(),
        }
    }

    fn resolve_map(
        &mut self,
        map: &Map<String, Value>,
        path: &mut Vec<String>,
    ) -> Result<Map<String, Value>> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            path.push(key.clone());
            let resolved = self.resolve_value(value, path)?;
            path.pop();
            out.insert(key.clone(), resolved);
        }
        Ok(out)
    }

    fn resolve_value(&mut self, value: &Value, path: &mut Vec<String>) -> Result<Value> {
        match value {
            Value::Object(map) => Ok(Value::Object(self.resolve_map(map, path)?)),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    path.push(i.to_string());
                    let resolved = self.resolve_value(item, path)?;
                    path.pop();
                    out.push(resolved);
                }
                Ok(Value::Array(out))
            }
            Value::String(s) if s == MISSING => Err(ConfigError::MissingValue(join_path(path))),
            Value::String(s) if s.contains("${") => self.interpolate(s, path),
            other => Ok(other.clone()),
        }
    }

    fn interpolate(&mut self, value: &str, path: &[String]) -> Result<Value> {
        let at = join_path(path);
        let segments = parse_segments(value, &at)?;

        if let [Segment::Interp(expr)] = segments.as_slice() {
            return self.resolve_expr(expr, path, &at);
        }

        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Interp(expr) => match self.resolve_expr(expr, path, &at)? {
                    Value::String(s) => out.push_str(&s),
                    Value::Object(_) | Value::Array(_) => {
                        return Err(ConfigError::NonScalarInterpolation {
                            expr: expr.to_string(),
                            at,
                        });
                    }
                    scalar => out.push_str(&scalar.to_string()),
                },
            }
        }
        Ok(Value::String(out))
    }

    fn resolve_expr(&mut self, expr: &str, path: &[String], at: &str) -> Result<Value> {
        if let Some((resolver, args)) = expr.split_once(':') {
            if resolver.trim() != ENV_RESOLVER {
                return Err(ConfigError::UnsupportedResolver {
                    resolver: resolver.trim().to_string(),
                    at: at.to_string(),
                });
            }
            return resolve_env(args);
        }

        let target = if expr.starts_with('.') {
            let ups = expr.chars().take_while(|&c| c == '.').count();
            // the node itself sits in its parent mapping; each extra dot climbs one more level
            let base_len = path.len().saturating_sub(ups);
            let mut target: Vec<String> = path[..base_len].to_vec();
            let rest = &expr[ups..];
            if !rest.is_empty() {
                target.extend(rest.split('.').map(str::to_string));
            }
            target
        } else {
            expr.split('.').map(str::to_string).collect()
        };

        self.resolve_path(&target, expr, at)
    }

    fn resolve_path(&mut self, target: &[String], expr: &str, at: &str) -> Result<Value> {
        let key = join_path(target);
        if self.in_progress.contains(&key) {
            let mut chain = self.in_progress.clone();
            chain.push(key);
            return Err(ConfigError::InterpolationCycle(chain.join(" -> ")));
        }

        let root = self.root;
        let node = lookup(root, target).ok_or_else(|| ConfigError::KeyNotFound {
            key: key.clone(),
            expr: expr.to_string(),
            at: at.to_string(),
        })?;

        self.in_progress.push(key);
        let resolved = self.resolve_value(node, &mut target.to_vec());
        self.in_progress.pop();
        resolved
    }
}

fn lookup<'v>(root: &'v Map<String, Value>, target: &[String]) -> Option<&'v Value> {
    let (first, rest) = target.split_first()?;
    let mut node = root.get(first)?;
    for key in rest {
        node = match node {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

fn resolve_env(args: &str) -> Result<Value> {
    let (name, default) = match args.split_once(',') {
        Some((name, default)) => (name.trim(), Some(default.trim())),
        None => (args.trim(), None),
    };
    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(Value::String(value)),
        (Err(_), Some(default)) => Ok(Value::String(default.to_string())),
        (Err(_), None) => Err(ConfigError::EnvNotFound(name.to_string())),
    }
}

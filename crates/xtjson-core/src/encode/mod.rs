//! Module: encode
//! Responsibility: render a value tree to JSON text, delegating non-native
//! nodes to a fallback hook.
//! Does not own: the JSON forms of domain objects (see `domain`, `query`, `tx`).
//! Boundary: the only place `Value` becomes `serde_json` output.

mod fallback;
mod format;
mod path;

#[cfg(test)]
mod tests;

use crate::{
    config::{EncodeConfig, OutputStyle},
    error::Error,
    value::Value,
};
use format::SpacedFormatter;
use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::{Map, Number, Value as JsonValue};
use std::io;
use thiserror::Error as ThisError;

pub use fallback::{BaseFallback, DomainFallback, Fallback};
pub use path::JsonPath;

///
/// EncodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EncodeError {
    #[error("object of type {type_name} is not JSON serializable (at {path})")]
    Unsupported { type_name: String, path: String },

    #[error("float value {value} is not JSON compliant (at {path})")]
    NonFiniteFloat { value: String, path: String },

    #[error("fallback conversions nest deeper than limit {limit} (at {path})")]
    DepthLimitExceeded { limit: usize, path: String },

    #[error("render failed: {0}")]
    Render(String),
}

///
/// Encoder
///
/// Recursive JSON encoder. Native nodes are emitted directly; every other
/// node goes to the fallback hook and the hook's result is encoded again
/// through the same entry point, so nested domain values resolve at any
/// depth.
///

#[derive(Clone, Debug, Default)]
pub struct Encoder<F = DomainFallback> {
    fallback: F,
    config: EncodeConfig,
}

impl Encoder {
    /// Domain-aware encoder with the given configuration.
    #[must_use]
    pub fn new(config: EncodeConfig) -> Self {
        Self {
            fallback: DomainFallback::default(),
            config,
        }
    }
}

impl<F: Fallback> Encoder<F> {
    #[must_use]
    pub const fn with_fallback(fallback: F, config: EncodeConfig) -> Self {
        Self { fallback, config }
    }

    #[must_use]
    pub const fn config(&self) -> &EncodeConfig {
        &self.config
    }

    /// Resolve the tree into a JSON-native `serde_json` tree.
    pub fn to_json_value(&self, value: &Value) -> Result<JsonValue, Error> {
        let mut path = JsonPath::root();

        self.resolve(value, &mut path, 0).map_err(|err| {
            tracing::debug!(error = %err, "encode failed");
            Error::from(err)
        })
    }

    /// Encode the tree to JSON text.
    pub fn to_string(&self, value: &Value) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out, value)?;

        let text = String::from_utf8(out).map_err(|err| EncodeError::Render(err.to_string()))?;
        tracing::debug!(bytes = text.len(), style = ?self.config.style, "encoded value tree");

        Ok(text)
    }

    /// Encode the tree as JSON text into `writer`.
    pub fn to_writer<W>(&self, writer: W, value: &Value) -> Result<(), Error>
    where
        W: io::Write,
    {
        let resolved = self.to_json_value(value)?;

        render(writer, &resolved, self.config.style)
            .map_err(|err| EncodeError::Render(err.to_string()).into())
    }

    // `depth` counts nested fallback conversions only. Owned native
    // containers cannot form cycles, so they nest without limit.
    fn resolve(
        &self,
        value: &Value,
        path: &mut JsonPath,
        depth: usize,
    ) -> Result<JsonValue, EncodeError> {
        if depth > self.config.max_depth {
            return Err(EncodeError::DepthLimitExceeded {
                limit: self.config.max_depth,
                path: path.to_string(),
            });
        }

        match value {
            Value::Null => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(JsonValue::Bool(*b)),
            Value::Int(i) => Ok(JsonValue::Number(Number::from(*i))),
            Value::Uint(u) => Ok(JsonValue::Number(Number::from(*u))),
            Value::Float(f) => Number::from_f64(*f).map(JsonValue::Number).ok_or_else(|| {
                EncodeError::NonFiniteFloat {
                    value: f.to_string(),
                    path: path.to_string(),
                }
            }),
            Value::Text(text) => Ok(JsonValue::String(text.clone())),
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push_index(index);
                    let resolved = self.resolve(item, path, depth);
                    path.pop();
                    out.push(resolved?);
                }

                Ok(JsonValue::Array(out))
            }
            Value::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    path.push_key(key);
                    let resolved = self.resolve(item, path, depth);
                    path.pop();
                    out.insert(key.clone(), resolved?);
                }

                Ok(JsonValue::Object(out))
            }
            Value::Domain(_) | Value::Foreign(_) => {
                let converted = self.fallback.fallback(value, path)?;
                tracing::trace!(
                    type_name = value.type_name(),
                    path = %path,
                    "fallback converted non-native value"
                );

                self.resolve(&converted, path, depth + 1)
            }
        }
    }
}

fn render<W>(writer: W, resolved: &JsonValue, style: OutputStyle) -> Result<(), serde_json::Error>
where
    W: io::Write,
{
    match style {
        OutputStyle::Spaced => {
            resolved.serialize(&mut serde_json::Serializer::with_formatter(writer, SpacedFormatter))
        }
        OutputStyle::Compact => serde_json::to_writer(writer, resolved),
        OutputStyle::Pretty => serde_json::to_writer_pretty(writer, resolved),
    }
}

/// Encode with the default domain-aware encoder.
pub fn to_string(value: &Value) -> Result<String, Error> {
    Encoder::new(EncodeConfig::default()).to_string(value)
}

/// Resolve with the default domain-aware encoder.
pub fn to_json_value(value: &Value) -> Result<JsonValue, Error> {
    Encoder::new(EncodeConfig::default()).to_json_value(value)
}

// Lets a `Value` sit inside any serde-serializable request struct.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        to_json_value(self)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

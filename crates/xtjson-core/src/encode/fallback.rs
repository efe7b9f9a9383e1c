use crate::{
    domain::ToJson,
    encode::{EncodeError, JsonPath},
    value::Value,
};

///
/// Fallback
///
/// Hook the encoder calls for every node that is not JSON-native.
/// Returns the node's replacement, which the encoder encodes in turn,
/// or fails.
///

pub trait Fallback {
    fn fallback(&self, value: &Value, path: &JsonPath) -> Result<Value, EncodeError>;
}

///
/// BaseFallback
///
/// Generic encoder behavior: nothing outside the JSON data model is
/// serializable.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BaseFallback;

impl Fallback for BaseFallback {
    fn fallback(&self, value: &Value, path: &JsonPath) -> Result<Value, EncodeError> {
        Err(EncodeError::Unsupported {
            type_name: value.type_name().to_string(),
            path: path.to_string(),
        })
    }
}

///
/// DomainFallback
///
/// Accepts queries, query tails and transaction operations by calling
/// their conversion; defers everything else to [`BaseFallback`].
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DomainFallback {
    base: BaseFallback,
}

impl Fallback for DomainFallback {
    fn fallback(&self, value: &Value, path: &JsonPath) -> Result<Value, EncodeError> {
        match value {
            Value::Domain(domain) => Ok(domain.to_json()),
            other => self.base.fallback(other, path),
        }
    }
}

mod map;
mod tag;


use crate::domain::{DomainValue, Query, QueryTail, TxOp};
use std::{fmt, sync::Arc};

// re-exports
pub use map::ValueMap;
pub use tag::ValueKind;

///
/// Value
///
/// Value tree submitted to the encoder.
///
/// Null .. Map  → JSON-native nodes, rendered directly.
/// Domain       → embedded query, query tail, or transaction operation;
///                rendered through its own conversion.
/// Foreign      → host value with no JSON form; always rejected.
///

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    /// Ordered sequence; order is preserved in the rendered array.
    List(Vec<Self>),
    Map(ValueMap),
    Domain(DomainValue),
    Foreign(Foreign),
}

impl Value {
    /// Wrap a query as an embedded domain value.
    pub fn query(query: impl Query + 'static) -> Self {
        Self::Domain(DomainValue::Query(Arc::new(query)))
    }

    /// Wrap a query tail as an embedded domain value.
    pub fn query_tail(tail: impl QueryTail + 'static) -> Self {
        Self::Domain(DomainValue::QueryTail(Arc::new(tail)))
    }

    /// Wrap a transaction operation as an embedded domain value.
    pub fn tx_op(op: impl TxOp + 'static) -> Self {
        Self::Domain(DomainValue::TxOp(Arc::new(op)))
    }

    /// Capture a host value that has no JSON representation.
    pub fn foreign<T>(value: &T) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        Self::Foreign(Foreign::new(value))
    }

    /// Build a `Value::Map` from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(entries.into_iter().collect())
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        tag::value_kind(self)
    }

    /// Returns `true` if this node is directly representable in JSON.
    #[must_use]
    pub const fn is_json_native(&self) -> bool {
        self.kind().is_json_native()
    }

    /// Name of the node's type as reported in unsupported-type errors.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Domain(domain) => domain.kind().label(),
            Self::Foreign(foreign) => foreign.type_name(),
            other => other.kind().label(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_domain(&self) -> Option<&DomainValue> {
        match self {
            Self::Domain(domain) => Some(domain),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            // JSON has one number type; equal magnitudes compare equal.
            (Self::Int(a), Self::Uint(b)) | (Self::Uint(b), Self::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Domain(a), Self::Domain(b)) => a == b,
            (Self::Foreign(a), Self::Foreign(b)) => a == b,
            _ => false,
        }
    }
}

///
/// Foreign
///
/// Snapshot of a host value that the JSON data model cannot represent.
/// Keeps the Rust type name for the unsupported-type error.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Foreign {
    type_name: &'static str,
    repr: String,
}

impl Foreign {
    pub fn new<T>(value: &T) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            repr: format!("{value:?}"),
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn repr(&self) -> &str {
        &self.repr
    }
}

//
// Conversions
//

macro_rules! impl_from_signed {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Uint(u64::from(value))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::Null, Self::Uint)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Self::Map(value)
    }
}

impl From<DomainValue> for Value {
    fn from(value: DomainValue) -> Self {
        Self::Domain(value)
    }
}

impl From<Foreign> for Value {
    fn from(value: Foreign) -> Self {
        Self::Foreign(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Self>,
{
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

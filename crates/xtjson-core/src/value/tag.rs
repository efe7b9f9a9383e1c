use crate::value::Value;
use std::fmt;

///
/// ValueKind
///
/// Stable value-variant tag used by diagnostics and error messages.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    Text,
    List,
    Map,
    Domain,
    Foreign,
}

impl ValueKind {
    /// Stable human-readable value kind label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Text => "text",
            Self::List => "list",
            Self::Map => "map",
            Self::Domain => "domain",
            Self::Foreign => "foreign",
        }
    }

    /// Returns `true` for kinds the JSON data model represents directly.
    #[must_use]
    pub const fn is_json_native(self) -> bool {
        !matches!(self, Self::Domain | Self::Foreign)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[must_use]
pub(super) const fn value_kind(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Bool,
        Value::Int(_) => ValueKind::Int,
        Value::Uint(_) => ValueKind::Uint,
        Value::Float(_) => ValueKind::Float,
        Value::Text(_) => ValueKind::Text,
        Value::List(_) => ValueKind::List,
        Value::Map(_) => ValueKind::Map,
        Value::Domain(_) => ValueKind::Domain,
        Value::Foreign(_) => ValueKind::Foreign,
    }
}

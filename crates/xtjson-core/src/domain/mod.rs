//! Module: domain
//! Responsibility: the closed set of domain kinds the encoder accepts and the
//! single conversion capability they share.
//! Does not own: the concrete query and transaction builders.


use crate::value::Value;
use std::{fmt, sync::Arc};

///
/// ToJson
///
/// Conversion of a domain object into its JSON form.
///
/// The result may embed further domain values; the encoder resolves them
/// through the same entry point. Implementations must be deterministic,
/// side-effect free, and must not produce cycles.
///

pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// A database query expression.
pub trait Query: ToJson + fmt::Debug + Send + Sync {}

/// A trailing modifier appended to a query (ordering, limiting, projection).
pub trait QueryTail: ToJson + fmt::Debug + Send + Sync {}

/// A single transaction operation.
pub trait TxOp: ToJson + fmt::Debug + Send + Sync {}

///
/// DomainKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DomainKind {
    Query,
    QueryTail,
    TxOp,
}

impl DomainKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::QueryTail => "query_tail",
            Self::TxOp => "tx_op",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// DomainValue
///
/// Tagged union over the recognized domain kinds.
/// Cloning shares the underlying object.
///

#[derive(Clone, Debug)]
pub enum DomainValue {
    Query(Arc<dyn Query>),
    QueryTail(Arc<dyn QueryTail>),
    TxOp(Arc<dyn TxOp>),
}

impl DomainValue {
    #[must_use]
    pub const fn kind(&self) -> DomainKind {
        match self {
            Self::Query(_) => DomainKind::Query,
            Self::QueryTail(_) => DomainKind::QueryTail,
            Self::TxOp(_) => DomainKind::TxOp,
        }
    }
}

impl ToJson for DomainValue {
    fn to_json(&self) -> Value {
        match self {
            Self::Query(query) => query.to_json(),
            Self::QueryTail(tail) => tail.to_json(),
            Self::TxOp(op) => op.to_json(),
        }
    }
}

// Conversions are pure, so two domain values are equal exactly when they
// are the same kind and convert to equal trees.
impl PartialEq for DomainValue {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.to_json() == other.to_json()
    }
}

//! Module: tx
//! Responsibility: transaction operations, the transaction request, and
//! their JSON forms.
//! Does not own: submission or transport of the request body.

mod op;


use crate::{
    domain::{ToJson, TxOp},
    value::{Value, ValueMap},
};

pub use op::{Call, Delete, Erase, Put, Sql, Xtql};

///
/// TxOperation
///
/// Closed set of operations a transaction request may carry.
/// Produced by the transaction decoder and accepted by [`Tx::push`].
///

#[derive(Clone, Debug, PartialEq)]
pub enum TxOperation {
    Put(Put),
    Delete(Delete),
    Erase(Erase),
    Sql(Sql),
    Xtql(Xtql),
    Call(Call),
}

impl TxOperation {
    /// Operation key as it appears in the JSON form.
    #[must_use]
    pub const fn op_key(&self) -> &'static str {
        match self {
            Self::Put(_) => "put",
            Self::Delete(_) => "delete",
            Self::Erase(_) => "erase",
            Self::Sql(_) => "sql",
            Self::Xtql(_) => "xtql",
            Self::Call(_) => "call",
        }
    }
}

impl ToJson for TxOperation {
    fn to_json(&self) -> Value {
        match self {
            Self::Put(op) => op.to_json(),
            Self::Delete(op) => op.to_json(),
            Self::Erase(op) => op.to_json(),
            Self::Sql(op) => op.to_json(),
            Self::Xtql(op) => op.to_json(),
            Self::Call(op) => op.to_json(),
        }
    }
}

impl TxOp for TxOperation {}

macro_rules! impl_tx_operation_from {
    ( $( $variant:ident ),* ) => {
        $(
            impl From<$variant> for TxOperation {
                fn from(op: $variant) -> Self {
                    Self::$variant(op)
                }
            }

            impl From<$variant> for Value {
                fn from(op: $variant) -> Self {
                    Self::tx_op(op)
                }
            }
        )*
    };
}

impl_tx_operation_from!(Put, Delete, Erase, Sql, Xtql, Call);

impl From<TxOperation> for Value {
    fn from(op: TxOperation) -> Self {
        Self::tx_op(op)
    }
}

///
/// TxOptions
///
/// Per-transaction options. Timestamps are RFC 3339 text and the time
/// zone is an IANA zone id; neither is interpreted here.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TxOptions {
    pub system_time: Option<String>,
    pub default_tz: Option<String>,
}

impl TxOptions {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.system_time.is_none() && self.default_tz.is_none()
    }

    fn to_value(&self) -> Value {
        let mut opts = ValueMap::new();
        opts.insert_opt("system_time", self.system_time.clone());
        opts.insert_opt("default_tz", self.default_tz.clone());

        Value::Map(opts)
    }
}

///
/// Tx
///
/// Transaction request body: an ordered list of operations plus options.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tx {
    pub ops: Vec<TxOperation>,
    pub opts: TxOptions,
}

impl Tx {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ops: Vec::new(),
            opts: TxOptions {
                system_time: None,
                default_tz: None,
            },
        }
    }

    #[must_use]
    pub fn from_ops(ops: Vec<TxOperation>) -> Self {
        Self {
            ops,
            opts: TxOptions::default(),
        }
    }

    /// Append one operation.
    #[must_use]
    pub fn push(mut self, op: impl Into<TxOperation>) -> Self {
        self.ops.push(op.into());
        self
    }

    #[must_use]
    pub fn system_time(mut self, system_time: impl Into<String>) -> Self {
        self.opts.system_time = Some(system_time.into());
        self
    }

    #[must_use]
    pub fn default_tz(mut self, default_tz: impl Into<String>) -> Self {
        self.opts.default_tz = Some(default_tz.into());
        self
    }

    /// Build the request body. Operations stay embedded as domain values
    /// and are converted by the encoder.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let ops: Vec<Value> = self.ops.iter().cloned().map(Value::tx_op).collect();

        let mut body = ValueMap::new().with("tx_ops", ops);
        if !self.opts.is_empty() {
            body.insert("opts", self.opts.to_value());
        }

        Value::Map(body)
    }
}

impl From<Tx> for Value {
    fn from(tx: Tx) -> Self {
        tx.to_value()
    }
}

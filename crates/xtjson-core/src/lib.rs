//! Core of xtjson: the value tree, the domain conversion capability, the
//! query and transaction vocabulary, and the domain-aware JSON encoder and
//! decoders built on `serde_json`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod decode;
pub mod domain;
pub mod encode;
pub mod error;
pub mod query;
pub mod tx;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, encoders or decoders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        domain::{Query, QueryTail, ToJson, TxOp},
        query::{Binding, FromTable, Limit, OrderBy, OrderSpec, Pipeline, Where},
        tx::{Delete, Put, Tx},
        value::{Value, ValueMap},
    };
}

//! xtjson: domain-aware JSON for database client request and response bodies.
//!
//! This is the public meta-crate. Downstream users depend on **xtjson** only.
//!
//! It re-exports the stable public API from `xtjson-core` (value tree,
//! domain capability, query and transaction builders, encoder, decoders)
//! and adds the configured [`Codec`] entry point.

mod codec;

pub use xtjson_core as core;
pub use xtjson_core::{config, decode, domain, encode, error, query, tx, value};

pub use codec::Codec;
pub use error::Error;

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Prelude
//

pub mod prelude {
    pub use crate::Codec;
    pub use xtjson_core::prelude::*;
}

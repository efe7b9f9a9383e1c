use crate::{
    config::CodecConfig,
    decode::{self, Row},
    encode::Encoder,
    error::Error,
    query::Without,
    tx::Tx,
    value::Value,
};
use std::io;

///
/// Codec
///
/// Configured entry point: one domain-aware encoder plus the decoders,
/// both driven by a single validated [`CodecConfig`].
///

#[derive(Clone, Debug)]
pub struct Codec {
    config: CodecConfig,
    encoder: Encoder,
}

impl Codec {
    /// Build a codec from a validated configuration.
    pub fn new(config: CodecConfig) -> Result<Self, Error> {
        config.validate()?;
        tracing::debug!(
            style = ?config.encode.style,
            max_depth = config.encode.max_depth,
            key_fn = ?config.decode.key_fn,
            "codec configured"
        );

        Ok(Self {
            encoder: Encoder::new(config.encode.clone()),
            config,
        })
    }

    /// Build a codec from a TOML configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Self::new(CodecConfig::from_toml_str(text)?)
    }

    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a value tree to JSON text.
    pub fn encode(&self, value: &Value) -> Result<String, Error> {
        self.encoder.to_string(value)
    }

    /// Encode a value tree as JSON text into `writer`.
    pub fn encode_to_writer<W>(&self, writer: W, value: &Value) -> Result<(), Error>
    where
        W: io::Write,
    {
        self.encoder.to_writer(writer, value)
    }

    /// Encode a transaction request body.
    pub fn encode_tx(&self, tx: &Tx) -> Result<String, Error> {
        self.encode(&tx.to_value())
    }

    pub fn decode_tx(&self, text: &str) -> Result<Tx, Error> {
        decode::decode_tx(text)
    }

    pub fn decode_without(&self, text: &str) -> Result<Without, Error> {
        decode::decode_without(text)
    }

    /// Decode result rows using the configured key function.
    pub fn decode_rows(&self, text: &str) -> Result<Vec<Row>, Error> {
        decode::decode_rows(text, self.config.decode.key_fn)
    }
}

impl Default for Codec {
    fn default() -> Self {
        let config = CodecConfig::default();

        Self {
            encoder: Encoder::new(config.encode.clone()),
            config,
        }
    }
}

///
/// TESTS
///

use crate::decode::KeyFn;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Default limit on nested fallback conversions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Upper bound accepted for `encode.max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 1024;

///
/// ConfigError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

///
/// CodecConfig
///
/// Codec configuration, loadable from TOML:
///
/// ```toml
/// [encode]
/// style = "spaced"
/// max_depth = 128
///
/// [decode]
/// key_fn = "SNAKE_CASE_STRING"
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub encode: EncodeConfig,
    pub decode: DecodeConfig,
}

impl CodecConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.encode.validate()
    }
}

///
/// EncodeConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeConfig {
    /// Text layout of the rendered output.
    pub style: OutputStyle,

    /// Maximum number of nested fallback conversions. Native containers
    /// do not count.
    pub max_depth: usize,
}

impl EncodeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "encode.max_depth",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid {
                field: "encode.max_depth",
                reason: format!("must not exceed {MAX_DEPTH_LIMIT}"),
            });
        }

        Ok(())
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            style: OutputStyle::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

///
/// OutputStyle
///
/// Spaced → `", "` and `": "` separators on one line (the default).
/// Compact → no whitespace.
/// Pretty → two-space indented, one entry per line.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    #[default]
    Spaced,
    Compact,
    Pretty,
}

///
/// DecodeConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
    /// Key function applied to result row keys.
    pub key_fn: KeyFn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CodecConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.encode.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.encode.style, OutputStyle::Spaced);
        assert_eq!(config.decode.key_fn, KeyFn::SnakeCaseString);
    }

    #[test]
    fn full_document_overrides_every_field() {
        let config = CodecConfig::from_toml_str(
            r#"
            [encode]
            style = "pretty"
            max_depth = 16

            [decode]
            key_fn = "KEBAB_CASE_STRING"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.encode.style, OutputStyle::Pretty);
        assert_eq!(config.encode.max_depth, 16);
        assert_eq!(config.decode.key_fn, KeyFn::KebabCaseString);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = CodecConfig::from_toml_str("[encode]\nmax_depth = 0\n")
            .expect_err("zero depth must be rejected");

        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "encode.max_depth",
                reason: "must be greater than zero".to_string(),
            }
        );
    }

    #[test]
    fn depth_above_limit_is_rejected() {
        let err = CodecConfig::from_toml_str("[encode]\nmax_depth = 10000000\n")
            .expect_err("oversized depth must be rejected");

        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "encode.max_depth",
                reason: format!("must not exceed {MAX_DEPTH_LIMIT}"),
            }
        );

        let config = CodecConfig::from_toml_str(&format!("[encode]\nmax_depth = {MAX_DEPTH_LIMIT}\n"))
            .expect("limit itself should be accepted");
        assert_eq!(config.encode.max_depth, MAX_DEPTH_LIMIT);
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = CodecConfig::from_toml_str("[encode]\nstyle = \"loose\"\n")
            .expect_err("unknown style must be rejected");

        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CodecConfig::from_toml_str("[encode]\nindent = 2\n")
            .expect_err("unknown field must be rejected");

        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn unknown_key_fn_is_rejected() {
        let err = CodecConfig::from_toml_str("[decode]\nkey_fn = \"SHOUTING\"\n")
            .expect_err("unknown key fn must be rejected");

        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err:?}");
    }
}

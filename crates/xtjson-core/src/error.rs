use crate::{config::ConfigError, decode::DecodeError, encode::EncodeError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured codec error with a stable classification.
/// Every public operation of the crate fails with this type; the origin
/// module's own error is kept in `detail`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    /// Construct an error without origin-specific detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Return the encode detail, if this error came from the encoder.
    #[must_use]
    pub const fn encode_detail(&self) -> Option<&EncodeError> {
        match &self.detail {
            Some(ErrorDetail::Encode(err)) => Some(err),
            _ => None,
        }
    }

    /// Return the decode detail, if this error came from a decoder.
    #[must_use]
    pub const fn decode_detail(&self) -> Option<&DecodeError> {
        match &self.detail {
            Some(ErrorDetail::Decode(err)) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.class, ErrorClass::Unsupported)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`Error`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Encode(EncodeError),
    #[error("{0}")]
    Decode(DecodeError),
    #[error("{0}")]
    Config(ConfigError),
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Self {
        let class = match err {
            EncodeError::Unsupported { .. } | EncodeError::NonFiniteFloat { .. } => {
                ErrorClass::Unsupported
            }
            EncodeError::DepthLimitExceeded { .. } => ErrorClass::InvariantViolation,
            EncodeError::Render(_) => ErrorClass::Internal,
        };

        Self {
            class,
            origin: ErrorOrigin::Encode,
            message: err.to_string(),
            detail: Some(ErrorDetail::Encode(err)),
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self {
            class: ErrorClass::Malformed,
            origin: ErrorOrigin::Decode,
            message: err.to_string(),
            detail: Some(ErrorDetail::Decode(err)),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self {
            class: ErrorClass::Invalid,
            origin: ErrorOrigin::Config,
            message: err.to_string(),
            detail: Some(ErrorDetail::Config(err)),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Unsupported,
    Malformed,
    InvariantViolation,
    Invalid,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unsupported => "unsupported",
            Self::Malformed => "malformed",
            Self::InvariantViolation => "invariant_violation",
            Self::Invalid => "invalid",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Encode,
    Decode,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

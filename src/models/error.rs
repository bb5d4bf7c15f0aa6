use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Display, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SError {
    #[display("malformed version: {_0}")]
    MalformedVersion(String),
    #[display("unknown catalog provider: {_0}")]
    ProviderUnknown(String),
    #[display("network failure: {message}")]
    NetworkFailure {
        message: String,
        cause: Option<String>,
    },
    #[display("invalid catalog response: {message}")]
    InvalidResponse {
        message: String,
        cause: Option<String>,
    },
    #[display("no catalog match for {_0}")]
    NoMatch(String),
    #[display("catalog call timed out: {_0}")]
    Timeout(String),
    #[display("io error: {_0}")]
    IOError(String),
    #[display("parse error: {_0}")]
    ParseError(String),
    #[display("config error: {_0}")]
    ConfigError(String),
    #[display("unexpected error: {_0}")]
    Unexpected(String),
}

/// Fieldless view of [`SError`] for matching without caring about payloads.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedVersion,
    ProviderUnknown,
    NetworkFailure,
    InvalidResponse,
    NoMatch,
    Timeout,
    Io,
    Parse,
    Config,
    Unexpected,
}

impl SError {
    pub fn network(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::NetworkFailure {
            message: message.into(),
            cause,
        }
    }

    pub fn invalid_response(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            cause,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedVersion(_) => ErrorKind::MalformedVersion,
            Self::ProviderUnknown(_) => ErrorKind::ProviderUnknown,
            Self::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::NoMatch(_) => ErrorKind::NoMatch,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::IOError(_) => ErrorKind::Io,
            Self::ParseError(_) => ErrorKind::Parse,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Underlying cause reported by a catalog provider, if any.
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::NetworkFailure { cause, .. } | Self::InvalidResponse { cause, .. } => {
                cause.as_deref()
            }
            _ => None,
        }
    }
}

impl std::error::Error for SError {}

impl From<std::io::Error> for SError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for SError {
    fn from(e: serde_json::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

impl From<zip::result::ZipError> for SError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::IOError(e.to_string())
    }
}

impl From<toml::de::Error> for SError {
    fn from(e: toml::de::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

impl From<toml::ser::Error> for SError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ParseError(e.to_string())
    }
}

impl From<confy::ConfyError> for SError {
    fn from(e: confy::ConfyError) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<tokio::task::JoinError> for SError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Unexpected(e.to_string())
    }
}

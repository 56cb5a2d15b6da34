use thiserror::Error;

use crate::notifier::NotifyError;
use crate::practicum::ApiError;

/// Errors raised while loading or checking configuration. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The payload did not have the shape the status diff needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("{what} is not a JSON object")]
    NotAnObject { what: &'static str },

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),

    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

/// Anything that can go wrong inside one poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("failed to send status notification: {0}")]
    NotifyFailed(#[from] NotifyError),
}

/// Coarse class of a cycle error, used to pick log severity and whether the
/// operator gets an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transport,
    Shape,
    Notify,
}

impl CycleError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CycleError::Api(_) => ErrorClass::Transport,
            CycleError::Shape(_) => ErrorClass::Shape,
            CycleError::NotifyFailed(_) => ErrorClass::Notify,
        }
    }

    /// Whether this error should be reported to the operator over the
    /// messaging channel. A failed notification is not, since the channel
    /// itself is what failed.
    pub fn alerts_operator(&self) -> bool {
        !matches!(self.class(), ErrorClass::Notify)
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorClass::Transport => write!(f, "Transport"),
            ErrorClass::Shape => write!(f, "Shape"),
            ErrorClass::Notify => write!(f, "Notify"),
        }
    }
}

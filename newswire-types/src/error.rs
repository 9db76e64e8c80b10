use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the newswire workspace.
///
/// Variants fall into two classes. Configuration errors (an unknown content
/// type, an unregistered provider, an invalid argument) are returned to the
/// caller as `Err`. Everything else describes an operational provider failure
/// and is recovered through fallback or folded into an error response.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NewswireError {
    /// The requested content type is not one of `news`, `analysis`, `sentiment`, `events`.
    #[error("unsupported content type: {value}")]
    UnsupportedContentType {
        /// The rejected value as supplied by the caller.
        value: String,
    },

    /// An explicit provider name was never registered.
    #[error("provider not registered: {name}")]
    ProviderNotRegistered {
        /// Requested provider name.
        name: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A resolved provider does not serve the requested content type.
    #[error("{provider} does not support {content_type}")]
    ProviderUnsupportedType {
        /// Provider name.
        provider: String,
        /// Content type label (e.g. "events").
        content_type: String,
    },

    /// A provider answered with a failure status or a failure payload.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Transport status, when a response was received.
        status: Option<u16>,
        /// Human-readable error message.
        msg: String,
    },

    /// The transport could not produce a response at all.
    #[error("transport error: {0}")]
    Transport(String),

    /// Issues with the returned payload (missing fields, wrong shapes).
    #[error("data issue: {0}")]
    Data(String),

    /// The cache store rejected an operation.
    #[error("cache error: {0}")]
    Cache(String),

    /// Every candidate of a fallback cascade failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<NewswireError>),

    /// A provider health probe failed to run.
    #[error("health check failed for {provider}: {msg}")]
    ProviderHealthCheckFailed {
        /// Provider name.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },
}

impl NewswireError {
    /// Helper: build an `UnsupportedContentType` error.
    pub fn unsupported_content_type(value: impl Into<String>) -> Self {
        Self::UnsupportedContentType {
            value: value.into(),
        }
    }

    /// Helper: build a `ProviderNotRegistered` error.
    pub fn not_registered(name: impl Into<String>) -> Self {
        Self::ProviderNotRegistered { name: name.into() }
    }

    /// Helper: build a `ProviderUnsupportedType` error.
    pub fn unsupported_type(provider: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::ProviderUnsupportedType {
            provider: provider.into(),
            content_type: content_type.into(),
        }
    }

    /// Helper: build a `Provider` error with an optional transport status.
    pub fn provider(provider: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderHealthCheckFailed` error.
    pub fn health_check_failed(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProviderHealthCheckFailed {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Returns true for caller/programmer mistakes that must stop execution.
    ///
    /// These are never retried on another provider and are never folded into
    /// an error response.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedContentType { .. }
                | Self::ProviderNotRegistered { .. }
                | Self::InvalidArg(_)
        )
    }

    /// HTTP-like status used when this error is rendered as a response.
    ///
    /// Provider failures keep the upstream status when it is an error status;
    /// unsupported content types map to 400; everything else is 500.
    #[must_use]
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::Provider {
                status: Some(s), ..
            } if *s >= 400 => *s,
            Self::UnsupportedContentType { .. } | Self::InvalidArg(_) => 400,
            Self::ProviderNotRegistered { .. } => 404,
            Self::ProviderUnsupportedType { .. } => 501,
            _ => 500,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

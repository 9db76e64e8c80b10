//! Newswire data transfer objects, configuration primitives and the unified error type.
#![warn(missing_docs)]

mod capability;
mod config;
mod content;
mod error;
mod response;
mod sentiment;

pub use capability::{Capabilities, ProviderDescriptor};
pub use config::{ANALYSIS, CacheConfig, NATIVE, NewswireConfig, RoutingTable, SENTIMENT};
pub use content::{ContentOptions, ContentRequest, ContentType, SourcePreference, normalize_symbol};
pub use error::NewswireError;
pub use response::{
    AggregateResponse, CanonicalResponse, HealthStatus, ProviderHealth, now_ts,
};
pub use sentiment::{Mood, SentimentLabel};

//! newswire-core
//!
//! Core traits shared across the newswire ecosystem.
//!
//! - `provider`: the `ContentProvider` capability interface and content-type dispatch.
//! - `transport`: the request-execution primitive adapters are built on.
//! - `cache`: the TTL cache contract and deterministic key derivation.
//! - `registry`: lazily constructed providers addressed by name or alias.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Provider and transport calls are `async` and the registry relies on
//! `tokio::sync::OnceCell`, so callers must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// TTL cache contract and cache key derivation.
pub mod cache;
/// Provider capability interface and dispatch.
pub mod provider;
/// Provider registry.
pub mod registry;
pub mod transport;

pub use cache::{CacheStore, NoopCache, cache_key, cache_key_for};
pub use provider::{ContentProvider, dispatch};
pub use registry::{ProviderFactory, ProviderRegistry};
pub use transport::{Method, Params, Transport, TransportResponse, params};

pub use newswire_types::*;

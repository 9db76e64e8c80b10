use std::sync::Arc;

use newswire::{NewsManager, NewswireError};
use newswire_mock::MockTransport;
use newswire_providers::{HttpTransport, ProviderTransports, default_registry};

/// Backend base URLs read from the environment.
const BASE_VARS: [&str; 3] = [
    "NEWSWIRE_NATIVE_URL",
    "NEWSWIRE_ANALYSIS_URL",
    "NEWSWIRE_SENTIMENT_URL",
];

/// Transports for the demos.
///
/// Fixture-backed unless all three `NEWSWIRE_*_URL` variables are set.
///
/// # Errors
/// Returns `InvalidArg` when a configured base URL does not parse.
pub fn get_transports() -> Result<ProviderTransports, NewswireError> {
    let urls: Vec<String> = BASE_VARS
        .iter()
        .filter_map(|v| std::env::var(v).ok())
        .collect();
    let [native, analysis, sentiment] = urls.as_slice() else {
        println!("--- (Using fixture transport) ---");
        return Ok(ProviderTransports::shared(Arc::new(MockTransport::new())));
    };
    Ok(ProviderTransports {
        native: Arc::new(HttpTransport::new(native)?),
        analysis: Arc::new(HttpTransport::new(analysis)?),
        sentiment: Arc::new(HttpTransport::new(sentiment)?),
    })
}

/// Manager over the standard providers with default configuration.
///
/// # Errors
/// Propagates transport and registry construction failures.
pub fn get_manager() -> Result<NewsManager, NewswireError> {
    NewsManager::builder()
        .registry(default_registry(get_transports()?)?)
        .build()
}

/// Render a JSON value for terminal output.
#[must_use]
pub fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

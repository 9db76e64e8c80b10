use newswire::{ContentOptions, ContentType};
use newswire_demos::common::get_manager;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=debug,newswire=trace,newswire_providers=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let manager = get_manager()?;

    // Auto-routed news, then the same call again to show the cache hit.
    let opts = ContentOptions::new().content_type(ContentType::News);
    let first = manager.get("AAPL", &opts).await?;
    tracing::info!(provider = %first.provider, "first call");
    let second = manager.get("AAPL", &opts).await?;
    tracing::info!(cached = %second.payload["cached"], "second call");

    // Explicit source that fails for every backend, exercising the cascade.
    let failing = ContentOptions::new().source("analysis");
    let resp = manager.get(newswire_mock::FAIL_SYMBOL, &failing).await?;
    tracing::info!(
        status = resp.status,
        error = resp.error_message().unwrap_or_default(),
        "failing symbol"
    );

    Ok(())
}

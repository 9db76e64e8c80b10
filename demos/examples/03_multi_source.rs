use newswire::{ContentOptions, ContentType};
use newswire_demos::common::get_manager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manager = get_manager()?;

    let opts = ContentOptions::new().content_type(ContentType::Analysis);
    let report = manager
        .get_from_multiple_sources("MSFT", &["native", "analysis", "sentiment"], &opts)
        .await?;
    println!(
        "{}: {}/{} sources answered",
        report.symbol, report.success_count, report.total_sources
    );
    for (source, payload) in &report.results {
        println!("  {source}: {}", payload["analysis"]["kind"]);
    }
    for (source, err) in &report.errors {
        println!("  {source} failed: {err}");
    }
    Ok(())
}

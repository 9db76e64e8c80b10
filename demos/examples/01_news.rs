use newswire::{ContentOptions, ContentType};
use newswire_demos::common::{get_manager, pretty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manager = get_manager()?;

    let opts = ContentOptions::new()
        .content_type(ContentType::News)
        .limit(3);
    let resp = manager.get("AAPL", &opts).await?;
    println!("news from {} (status {})", resp.provider, resp.status);
    if let Some(articles) = resp.payload["articles"].as_array() {
        for a in articles {
            println!("  - {}", a["title"].as_str().unwrap_or("(untitled)"));
        }
    }

    let events = manager
        .get("AAPL", &ContentOptions::new().content_type(ContentType::Events))
        .await?;
    println!("events:\n{}", pretty(&events.payload["events"]));
    Ok(())
}

use newswire::{ContentOptions, ContentType};
use newswire_demos::common::{get_manager, pretty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manager = get_manager()?;

    for symbol in ["AAPL", "TSLA"] {
        let opts = ContentOptions::new()
            .content_type(ContentType::Sentiment)
            .timeframe("7d");
        let resp = manager.get(symbol, &opts).await?;
        let s = &resp.payload["sentiment"];
        println!(
            "{symbol}: mood {} (index {}, trend {}, volatility {})",
            s["mood"], s["mood_index"], s["trend"], s["volatility"]
        );
    }

    // Only the negative posts.
    let opts = ContentOptions::new()
        .content_type(ContentType::News)
        .source("social")
        .sentiment_filter("negative");
    let resp = manager.get("AAPL", &opts).await?;
    println!("negative posts:\n{}", pretty(&resp.payload["posts"]));
    Ok(())
}

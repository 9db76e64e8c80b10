use serde_json::{Value, json};

fn article(id: u32, symbol: &str, title: &str, summary: &str, published_at: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "summary": summary,
        "content": format!("{summary} Coverage for {symbol}."),
        "url": format!("https://news.example.com/{}/{id}", symbol.to_ascii_lowercase()),
        "source": "Mock Wire",
        "published_at": published_at,
    })
}

pub fn by_symbol(s: &str) -> Vec<Value> {
    match s {
        "AAPL" => vec![
            article(101, s, "Apple beats quarterly earnings estimates", "Services revenue hit a record.", 1_760_000_400),
            article(102, s, "Apple raises dividend by 4%", "The board approved a higher payout.", 1_760_000_300),
            article(103, s, "Apple unveils new headset", "Product launch draws crowds.", 1_760_000_200),
            article(104, s, "Analysts weigh supply chain risk", "Component costs remain elevated.", 1_760_000_100),
        ],
        "MSFT" => vec![
            article(201, s, "Microsoft completes acquisition of game studio", "Regulators cleared the deal.", 1_760_000_500),
            article(202, s, "Microsoft announces cloud partnership", "A strategic partnership announcement with a chip maker.", 1_760_000_400),
        ],
        "TSLA" => vec![
            article(301, s, "Tesla deliveries slip", "Quarterly deliveries came in light.", 1_760_000_600),
            article(302, s, "Tesla stock split approved", "Shareholders voted for a 3-for-1 split.", 1_760_000_500),
        ],
        _ => Vec::new(),
    }
}

/// Same headlines with a model summary attached.
pub fn ai_by_symbol(s: &str) -> Vec<Value> {
    by_symbol(s)
        .into_iter()
        .map(|mut a| {
            let title = a["title"].as_str().unwrap_or_default().to_string();
            a["ai_summary"] = json!(format!("In short: {title}."));
            a
        })
        .collect()
}

use serde_json::{Value, json};

fn post(id: u32, label: &str, ts: i64, tickers: &[&str], sectors: &[&str], content: &str) -> Value {
    json!({
        "id": id.to_string(),
        "summary": content.chars().take(40).collect::<String>(),
        "content": content,
        "sentimentLabel": label,
        "timestamp": ts,
        "sectors": sectors,
        "affectedSecurities": tickers.iter().map(|t| json!({"ticker": t})).collect::<Vec<_>>(),
    })
}

/// Posts labeled in the default backend vocabulary, newest first.
pub fn posts_by_symbol(s: &str) -> Vec<Value> {
    match s {
        "AAPL" => vec![
            post(1, "optimistic", 1_760_000_900, &["AAPL", "MSFT", "GOOGL"], &["technology"], "Big tech rally led by Apple after the earnings beat."),
            post(2, "optimistic", 1_760_000_800, &["AAPL"], &["technology"], "Services growth looks durable."),
            post(3, "indifferent", 1_760_000_700, &["AAPL"], &[], "Holding my position for now."),
            post(4, "optimistic", 1_760_000_600, &["AAPL"], &["technology", "consumer"], "Headset demand is stronger than expected across retail channels."),
            post(5, "pessimistic", 1_760_000_500, &["AAPL"], &[], "Valuation is stretched."),
            post(6, "indifferent", 1_760_000_400, &[], &[], "Waiting for guidance."),
            post(7, "pessimistic", 1_760_000_300, &["AAPL", "TSM"], &["semiconductors"], "Supply chain costs keep rising."),
        ],
        "MSFT" => vec![
            post(11, "indifferent", 1_760_000_900, &["MSFT"], &["technology"], "Cloud numbers in line."),
            post(12, "pessimistic", 1_760_000_800, &["MSFT"], &[], "Deal integration will take years."),
        ],
        "TSLA" => vec![
            post(21, "pessimistic", 1_760_000_900, &["TSLA"], &["automotive"], "Deliveries miss again."),
            post(22, "pessimistic", 1_760_000_800, &["TSLA", "RIVN", "F"], &["automotive", "energy"], "EV demand is cooling across the board."),
            post(23, "optimistic", 1_760_000_700, &["TSLA"], &[], "Split makes shares accessible."),
        ],
        _ => Vec::new(),
    }
}

/// Mood index reported by the backend, if it has one for `s`.
pub fn mood_by_symbol(s: &str) -> Option<f64> {
    match s {
        "AAPL" => Some(0.72),
        "MSFT" => Some(0.45),
        _ => None,
    }
}

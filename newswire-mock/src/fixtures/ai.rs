use serde_json::{Value, json};

pub fn ai_analysis(s: &str) -> Value {
    match s {
        "AAPL" => json!({
            "summary": "Apple's ecosystem keeps compounding services revenue.",
            "key_points": ["Record services revenue", "Dividend raised", "New hardware category"],
            "outlook": "bullish",
            "confidence": 0.8,
        }),
        "TSLA" => json!({
            "summary": "Delivery softness weighs on near-term sentiment.",
            "key_points": ["Deliveries below estimates", "Stock split approved"],
            "outlook": "bearish",
            "confidence": 0.6,
        }),
        _ => json!({
            "summary": format!("No notable developments for {s}."),
            "key_points": [],
            "outlook": "neutral",
            "confidence": 0.3,
        }),
    }
}

pub fn ai_sentiment(s: &str) -> Value {
    match s {
        "AAPL" => json!({"label": "Bullish", "score": 0.6}),
        "TSLA" => json!({"label": "negative", "score": -0.4}),
        _ => json!({"label": "neutral", "score": 0.0}),
    }
}

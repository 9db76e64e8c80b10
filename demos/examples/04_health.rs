use newswire_demos::common::get_manager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manager = get_manager()?;

    for (name, health) in manager.providers_health().await {
        let types = health
            .capabilities
            .map(|c| {
                c.content_types
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();
        println!("{name:<10} {:?} [{types}]", health.status);
        if let Some(msg) = health.message {
            println!("           {msg}");
        }
    }
    Ok(())
}

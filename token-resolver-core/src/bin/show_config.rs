use anyhow::Context;
use token_resolver_core::{BlockchainType, CoreConfig, NAME, VERSION};

fn main() -> anyhow::Result<()> {
    let config = CoreConfig::load().context("failed to load token core configuration")?;

    println!("{} v{} configuration:\n", NAME, VERSION);
    for blockchain_type in BlockchainType::ALL {
        let endpoint = config
            .endpoint_for(blockchain_type)
            .with_context(|| format!("no endpoint for {}", blockchain_type.uid()))?;
        let key = match &endpoint.api_key {
            Some(key) => format!(" ({} set)", key.header),
            None => String::new(),
        };
        println!("  {:<22} {}{}", blockchain_type.name(), endpoint.url, key);
    }
    println!();
    println!("  Request timeout: {}s", config.request_timeout_secs);
    println!("  Log level: {}", config.log_level);
    println!();
    println!("{}", serde_json::to_string_pretty(&config.summary())?);

    Ok(())
}

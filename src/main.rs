//! mchdump - MCH roster → wallet → MCHINU balance CSV exporter
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- saved_roster_page.html
//! ```
//!
//! ## Environment Variables
//!
//! - MCH_API_BASE - User proxy API base URL (default: https://www.mycryptoheroes.net)
//! - OASYS_RPC_URL - JSON-RPC endpoint (default: https://rpc.mainnet.oasys.games)
//! - INU_TOKEN_CONTRACT - MCHINU token contract address
//! - REQUEST_DELAY_MS - Pause between users in milliseconds (default: 100)
//! - OUTPUT_DIR - Directory for the CSV file (default: .)
//! - RUST_LOG - Logging level (optional, default: info)

#[cfg(test)]
mod tests;

pub mod balance;
pub mod config;
pub mod export;
pub mod html;
pub mod layout;
pub mod pipeline;
pub mod resolver;
pub mod types;

use {
    balance::EthCallFetcher,
    config::Config,
    export::CsvExporter,
    resolver::MchApiResolver,
    std::time::Duration,
};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    // Write logs to stderr so stdout stays clean for shell plumbing.
    // Default to info unless RUST_LOG says otherwise.
    let mut builder = if config.rust_log.is_some() {
        env_logger::Builder::from_default_env()
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    };
    builder.target(env_logger::Target::Stderr).init();

    log::info!("🚀 Starting mchdump...");
    log::info!("📋 Configuration:");
    log::info!("   Page: {}", config.page_path.display());
    log::info!("   API base: {}", config.api_base);
    log::info!("   RPC: {}", config.rpc_url);
    log::info!("   Token contract: {}", config.token_contract);
    log::info!("   Delay: {}ms", config.request_delay_ms);

    let page = std::fs::read_to_string(&config.page_path)?;

    let roster = layout::detect_roster(&page);
    if roster.is_empty() {
        log::error!(
            "❌ No user roster found on the page. Save a league or tournament page and retry."
        );
        return Err("no user roster found on the page".into());
    }
    log::info!("✅ Found {} users in the roster", roster.len());

    let resolver = MchApiResolver::new(&config.api_base)?;
    let fetcher = EthCallFetcher::new(&config.rpc_url, &config.token_contract)?;

    let records = pipeline::collect_records(
        &roster,
        &resolver,
        &fetcher,
        Duration::from_millis(config.request_delay_ms),
    )
    .await;

    let exporter = CsvExporter::new(&config.output_dir);
    let path = exporter.export(&records)?;

    log::info!("✅ Exported {} users to {}", records.len(), path.display());

    Ok(())
}

use std::env;
use std::path::PathBuf;

/// Configuration loaded from environment variables plus the page path
/// positional argument. Every variable has a default matching the live
/// endpoints, so a plain `.env`-less run works.
#[derive(Debug, Clone)]
pub struct Config {
    /// Saved roster page to read (league or tournament layout).
    pub page_path: PathBuf,
    pub api_base: String,
    pub rpc_url: String,
    pub token_contract: String,
    pub request_delay_ms: u64,
    pub output_dir: PathBuf,
    pub rust_log: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingArgument(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingArgument(arg) => write!(f, "Missing argument: {}", arg),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_API_BASE: &str = "https://www.mycryptoheroes.net";
pub const DEFAULT_RPC_URL: &str = "https://rpc.mainnet.oasys.games";
pub const DEFAULT_TOKEN_CONTRACT: &str = "0x6b7b5F6D7411F374694595d05719ad2f060aAC61";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().collect();
        let page_path = page_path_from_args(&args).ok_or_else(|| {
            ConfigError::MissingArgument("path to a saved roster page (HTML)".to_string())
        })?;

        let api_base = env::var("MCH_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "MCH_API_BASE must start with http:// or https://".to_string(),
            ));
        }

        let rpc_url = env::var("OASYS_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "OASYS_RPC_URL must start with http:// or https://".to_string(),
            ));
        }

        let token_contract =
            env::var("INU_TOKEN_CONTRACT").unwrap_or_else(|_| DEFAULT_TOKEN_CONTRACT.to_string());
        if !token_contract.starts_with("0x") || token_contract.len() != 42 {
            return Err(ConfigError::InvalidValue(format!(
                "INU_TOKEN_CONTRACT must be a 0x-prefixed 20-byte address, got '{}'",
                token_contract
            )));
        }

        let request_delay_ms = env::var("REQUEST_DELAY_MS")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|_| {
                log::warn!("Invalid REQUEST_DELAY_MS, defaulting to 100");
                100
            });

        let output_dir = env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let rust_log = env::var("RUST_LOG").ok();

        Ok(Self {
            page_path,
            api_base,
            rpc_url,
            token_contract,
            request_delay_ms,
            output_dir,
            rust_log,
        })
    }
}

/// First argument that is not a flag, skipping the binary name.
pub fn page_path_from_args(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path_skips_binary_and_flags() {
        let args: Vec<String> = ["mchdump", "--verbose", "page.html"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(page_path_from_args(&args), Some(PathBuf::from("page.html")));
    }

    #[test]
    fn test_page_path_missing() {
        let args = vec!["mchdump".to_string()];
        assert_eq!(page_path_from_args(&args), None);
    }
}

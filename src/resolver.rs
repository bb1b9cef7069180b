//! Wallet address resolution via the MCH user proxy API.
//!
//! Endpoint: `{base}/api/proxy/mch/users/{userId}`
//! Returns: JSON with a nested `user_data.eth` wallet field.
//!
//! Lookup failures are non-fatal by contract: the batch substitutes an empty
//! address and moves on, so `resolve` never returns an error.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Proxy API response. Fields the exporter does not read are left out;
/// missing nesting decodes to `None` instead of failing.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user_data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub eth: Option<String>,
}

#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve a user id to a wallet address, or "" when unavailable.
    async fn resolve(&self, user_id: &str) -> String;
}

/// Live resolver backed by the game's proxy API.
pub struct MchApiResolver {
    client: reqwest::Client,
    base_url: String,
}

impl MchApiResolver {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(
        &self,
        user_id: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/proxy/mch/users/{}", self.base_url, user_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(format!("user API error: {}", response.status()).into());
        }

        let body: UserResponse = response.json().await?;
        Ok(body.user_data.and_then(|d| d.eth).unwrap_or_default())
    }
}

#[async_trait]
impl AddressResolver for MchApiResolver {
    async fn resolve(&self, user_id: &str) -> String {
        match self.fetch(user_id).await {
            Ok(address) => address,
            Err(e) => {
                log::warn!("⚠️  Address lookup failed (user {}): {}", user_id, e);
                String::new()
            }
        }
    }
}

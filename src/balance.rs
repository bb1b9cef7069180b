//! MCHINU balance lookup via `eth_call` against the Oasys JSON-RPC endpoint.
//!
//! The call invokes `balanceOf(address)` (selector `0x70a08231`) on the token
//! contract with the address left-zero-padded to a 32-byte word. The token
//! has zero decimals, so the raw quantity is the displayed balance.
//!
//! Like the address resolver, this step never fails the batch: every error
//! path collapses to the "0" sentinel with a warning log.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ERC-20 `balanceOf(address)` function selector.
pub const BALANCE_OF_SELECTOR: &str = "0x70a08231";

#[derive(Debug, Serialize)]
struct CallObject<'a> {
    to: &'a str,
    data: &'a str,
}

/// JSON-RPC 2.0 request envelope. The params tuple serializes as the
/// two-element array `[{to, data}, "latest"]`.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    method: &'a str,
    params: (CallObject<'a>, &'a str),
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
}

#[async_trait]
pub trait BalanceFetcher: Send + Sync {
    /// Fetch the token balance for a wallet as a base-10 string, or "0"
    /// when it is zero or unavailable. `user_id` is only for log context.
    async fn fetch_balance(&self, address: &str, user_id: &str) -> String;
}

/// Live fetcher issuing `eth_call` against a JSON-RPC endpoint.
pub struct EthCallFetcher {
    client: reqwest::Client,
    rpc_url: String,
    contract: String,
}

impl EthCallFetcher {
    pub fn new(rpc_url: &str, contract: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
            contract: contract.to_string(),
        })
    }

    async fn fetch(
        &self,
        address: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let data = balance_call_data(address);
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "eth_call",
            params: (
                CallObject {
                    to: &self.contract,
                    data: &data,
                },
                "latest",
            ),
            id: 1,
        };

        let response = self.client.post(&self.rpc_url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(format!("RPC error: {}", response.status()).into());
        }

        let body: RpcResponse = response.json().await?;
        Ok(decode_quantity(body.result.as_deref()))
    }
}

#[async_trait]
impl BalanceFetcher for EthCallFetcher {
    async fn fetch_balance(&self, address: &str, user_id: &str) -> String {
        match self.fetch(address).await {
            Ok(balance) => balance,
            Err(e) => {
                log::warn!("⚠️  Balance lookup failed (user {}): {}", user_id, e);
                "0".to_string()
            }
        }
    }
}

/// Build the `balanceOf` calldata: selector + address left-zero-padded to
/// 64 hex chars (the 32-byte ABI word).
pub fn balance_call_data(address: &str) -> String {
    let stripped = address.strip_prefix("0x").unwrap_or(address);
    format!("{}{:0>64}", BALANCE_OF_SELECTOR, stripped)
}

/// Decode an `eth_call` result into a base-10 balance string.
///
/// Absent, `"0x"` and `"0x0"` results all mean "no balance". Anything else
/// is a hex quantity of up to 32 bytes, converted without precision loss.
pub fn decode_quantity(result: Option<&str>) -> String {
    let hex_str = match result {
        Some("0x") | Some("0x0") | None => return "0".to_string(),
        Some(r) => r.strip_prefix("0x").unwrap_or(r),
    };
    hex_to_decimal(hex_str).unwrap_or_else(|| "0".to_string())
}

/// Arbitrary-precision hex → decimal conversion (×256 accumulator over the
/// decoded bytes). Returns `None` for non-hex input.
fn hex_to_decimal(hex_str: &str) -> Option<String> {
    let trimmed = hex_str.trim();
    if trimmed.is_empty() {
        return None;
    }
    // hex::decode requires an even number of nibbles.
    let padded = if trimmed.len() % 2 == 1 {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    };
    let bytes = hex::decode(&padded).ok()?;

    // Little-endian decimal digits.
    let mut digits: Vec<u8> = vec![0];
    for &byte in &bytes {
        let mut carry = byte as u32;
        for d in digits.iter_mut() {
            let v = (*d as u32) * 256 + carry;
            *d = (v % 10) as u8;
            carry = v / 10;
        }
        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }
    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    Some(digits.iter().rev().map(|d| (b'0' + d) as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_data_padding() {
        let data = balance_call_data("0x6b7b5F6D7411F374694595d05719ad2f060aAC61");
        assert_eq!(
            data,
            "0x70a082310000000000000000000000006b7b5F6D7411F374694595d05719ad2f060aAC61"
        );
        assert_eq!(data.len(), 2 + 8 + 64);
    }

    #[test]
    fn test_decode_empty_and_zero_results() {
        assert_eq!(decode_quantity(None), "0");
        assert_eq!(decode_quantity(Some("0x")), "0");
        assert_eq!(decode_quantity(Some("0x0")), "0");
    }

    #[test]
    fn test_decode_small_quantities() {
        assert_eq!(decode_quantity(Some("0x5")), "5");
        assert_eq!(decode_quantity(Some("0x64")), "100");
        assert_eq!(decode_quantity(Some("0xff")), "255");
    }

    #[test]
    fn test_decode_full_word_result() {
        // 100 as a 32-byte eth_call return word.
        let word = format!("0x{:0>64}", "64");
        assert_eq!(decode_quantity(Some(&word)), "100");
    }

    #[test]
    fn test_decode_beyond_u128() {
        // 2^128 does not fit in u128.
        let hex = format!("0x01{}", "00".repeat(16));
        assert_eq!(
            decode_quantity(Some(&hex)),
            "340282366920938463463374607431768211456"
        );
    }

    #[test]
    fn test_decode_garbage_is_zero() {
        assert_eq!(decode_quantity(Some("0xzz")), "0");
        assert_eq!(decode_quantity(Some("not hex")), "0");
    }

    #[tokio::test]
    async fn test_fetch_network_failure_yields_zero() {
        let fetcher = EthCallFetcher::new(
            "http://127.0.0.1:9",
            "0x6b7b5F6D7411F374694595d05719ad2f060aAC61",
        )
        .unwrap();
        assert_eq!(fetcher.fetch_balance("0xabc", "123").await, "0");
    }
}

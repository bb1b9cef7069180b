//! Sequential per-user batch: resolve address, fetch balance, accumulate.
//!
//! Strictly one user at a time with a fixed pause after each, out of courtesy
//! to the proxy API's informal rate limit. No retries: a failed lookup leaves
//! its sentinel ("" / "0") in the record and the batch moves on.

use crate::balance::BalanceFetcher;
use crate::resolver::AddressResolver;
use crate::types::{UserRecord, UserRef};
use tokio::time::{sleep, Duration};

/// Run the full per-user pipeline over the roster, in order.
///
/// Every roster entry produces exactly one record; missing data shows up as
/// sentinel values, never as a dropped row.
pub async fn collect_records(
    roster: &[UserRef],
    resolver: &dyn AddressResolver,
    fetcher: &dyn BalanceFetcher,
    delay: Duration,
) -> Vec<UserRecord> {
    let total = roster.len();
    let mut records = Vec::with_capacity(total);

    for (i, user) in roster.iter().enumerate() {
        log::info!("📊 Processing user {} ({}/{})", user.user_id, i + 1, total);

        let address = resolver.resolve(&user.user_id).await;

        let mut yukichi_coin = String::new();
        let mut inu_balance = "0".to_string();
        if !address.is_empty() {
            yukichi_coin = issued_coins(&address, &user.user_id);
            inu_balance = fetcher.fetch_balance(&address, &user.user_id).await;
        }

        records.push(UserRecord {
            user_id: user.user_id.clone(),
            user_name: user.user_name.clone(),
            address,
            yukichi_coin,
            inu_balance,
        });

        // Pause between users, including after the last one.
        sleep(delay).await;
    }

    records
}

/// The yukichi issued-coin lookup was removed upstream; the column is kept
/// empty so existing sheets keep their shape.
fn issued_coins(_address: &str, _user_id: &str) -> String {
    String::new()
}

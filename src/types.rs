use serde::{Deserialize, Serialize};

/// A roster entry as it appears on the page: display name plus the numeric
/// user id shown next to it (leading `#` already stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub user_name: String,
    pub user_id: String,
}

/// One fully-populated export row.
///
/// Missing data is carried as sentinels, never by dropping the row:
/// `address` is "" when the lookup failed, `inu_balance` is "0" when the
/// balance could not be fetched. `yukichi_coin` is always "" (the issuance
/// lookup was removed upstream; the column survives so existing sheets keep
/// their shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub user_name: String,
    pub address: String,
    pub yukichi_coin: String,
    pub inu_balance: String,
}

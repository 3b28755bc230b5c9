pub const NATIVE_CURRENCY: &str = "XRP";

pub const DROPS_PER_XRP: u64 = 1_000_000;

pub const TES_SUCCESS: &str = "tesSUCCESS";

pub const ACCOUNT_NOT_FOUND: &str = "actNotFound";

pub const MAINNET_RPC_URL: &str = "https://xrplcluster.com";

pub const TESTNET_RPC_URL: &str = "https://s.altnet.rippletest.net:51234";

pub const MAINNET_EXPLORER_URL: &str = "https://livenet.xrpl.org/transactions/";

pub const TESTNET_EXPLORER_URL: &str = "https://testnet.xrpl.org/transactions/";

pub const ACCOUNT_LINES_PAGE_LIMIT: u32 = 400;

/// Reference cost of one payment.
pub const BASE_FEE_DROPS: u64 = 12;

/// XRP a sender keeps locked after the batch.
pub const ACCOUNT_RESERVE_XRP: f64 = 10.0;

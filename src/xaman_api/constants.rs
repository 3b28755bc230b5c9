pub const PAYLOAD_PATH: &str = "payload";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_SECRET_HEADER: &str = "x-api-secret";

pub const SIGN_IN_TX_TYPE: &str = "SignIn";
/// Shortest payload lifetime, in minutes.
pub const MIN_PAYLOAD_EXPIRE_MINUTES: u64 = 1;

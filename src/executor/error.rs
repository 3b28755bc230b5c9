use thiserror::Error;

/// Why a single payment did not go through. Recorded on the outcome, never
/// propagated out of a running batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentFailure {
    #[error("MissingTrustLine")]
    MissingTrustLine,

    #[error("Rejected")]
    Rejected,

    #[error("Timeout")]
    Timeout,

    #[error("LedgerError: {0}")]
    LedgerError(String),

    #[error("NetworkError: {0}")]
    NetworkError(String),
}

/// Conditions that stop an airdrop before the first payment is signed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreconditionError {
    #[error("no wallet connected")]
    WalletNotConnected,

    #[error("token is not configured")]
    TokenNotConfigured,

    #[error("no recipients to pay")]
    NoRecipients,

    #[error("distribution is not configured: set a positive amount")]
    PreviewEmpty,

    #[error("insufficient balance: need {needed} {currency} but only {available} is available")]
    InsufficientBalance {
        currency: String,
        needed: f64,
        available: f64,
    },

    #[error("{} recipient(s) have no {currency} trust line: {}", .addresses.len(), .addresses.join(", "))]
    MissingTrustLine {
        currency: String,
        addresses: Vec<String>,
    },

    #[error("ledger query failed: {0}")]
    Ledger(String),
}

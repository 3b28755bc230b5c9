use async_trait::async_trait;

use crate::onchain::typedefs::PaymentInstruction;

use super::{error::PaymentFailure, typedefs::WalletInfo};

/// Holder of the sender's credential. Authorises and submits payments.
#[async_trait]
pub trait PaymentSigner: Send + Sync {
    async fn connect(&mut self) -> eyre::Result<WalletInfo>;

    /// Returns the hash of the validated transaction.
    async fn sign_and_submit(&self, instruction: &PaymentInstruction)
        -> Result<String, PaymentFailure>;

    /// Withdraws a request abandoned by the caller. Returns the outcome
    /// instead when the request was already answered.
    async fn cancel_pending(&self) -> Option<Result<String, PaymentFailure>> {
        None
    }

    async fn disconnect(&mut self);
}

/// Read access to the ledger.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    async fn get_balance(
        &self,
        address: &str,
        currency: &str,
        issuer: Option<&str>,
    ) -> eyre::Result<f64>;

    async fn has_trust_line(&self, address: &str, currency: &str, issuer: &str)
        -> eyre::Result<bool>;

    async fn validate_address(&self, address: &str) -> eyre::Result<bool>;
}

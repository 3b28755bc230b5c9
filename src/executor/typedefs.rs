use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::onchain::{
    constants::{ACCOUNT_RESERVE_XRP, BASE_FEE_DROPS},
    tx::drops_to_xrp,
    typedefs::Network,
};

use super::error::PaymentFailure;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WalletInfo {
    pub address: String,
    /// XRP balance at connection time.
    pub balance: f64,
    pub network: Network,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub recipient: String,
    pub amount: f64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionOutcome {
    pub fn succeeded(recipient: &str, amount: f64, tx_hash: String) -> Self {
        Self {
            recipient: recipient.to_string(),
            amount,
            success: true,
            tx_hash: Some(tx_hash),
            error: None,
        }
    }

    pub fn failed(recipient: &str, amount: f64, failure: &PaymentFailure) -> Self {
        Self {
            recipient: recipient.to_string(),
            amount,
            success: false,
            tx_hash: None,
            error: Some(failure.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ExecutionResult {
    pub results: Vec<TransactionOutcome>,
    pub success_count: usize,
    pub fail_count: usize,
}

impl ExecutionResult {
    pub fn from_outcomes(results: Vec<TransactionOutcome>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count();

        Self {
            fail_count: results.len() - success_count,
            success_count,
            results,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Ledger time of one payment once it is signed.
const SECS_PER_PAYMENT: u64 = 1;

#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    /// Pause between two submissions.
    pub tx_delay: Duration,
    /// Upper bound for signing and confirming one payment.
    pub sign_timeout: Duration,
    pub check_trust_lines: bool,
    pub fee_drops: u64,
    /// XRP that must stay in the sender account.
    pub reserve_xrp: f64,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            tx_delay: Duration::from_secs(1),
            sign_timeout: Duration::from_secs(300),
            check_trust_lines: true,
            fee_drops: BASE_FEE_DROPS,
            reserve_xrp: ACCOUNT_RESERVE_XRP,
        }
    }
}

impl ExecutorSettings {
    /// Fees, reserve and ledger time of a batch of `transactions` payments.
    /// Time spent approving each payload on the phone is not included.
    pub fn estimate(&self, transactions: usize) -> CostEstimate {
        let pauses = transactions.saturating_sub(1) as u32;

        CostEstimate {
            transactions,
            fee_xrp: drops_to_xrp(self.fee_drops.saturating_mul(transactions as u64)),
            reserve_xrp: self.reserve_xrp,
            duration: Duration::from_secs(SECS_PER_PAYMENT * transactions as u64)
                + self.tx_delay * pauses,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub transactions: usize,
    pub fee_xrp: f64,
    pub reserve_xrp: f64,
    pub duration: Duration,
}

impl CostEstimate {
    /// XRP the sender needs on top of the airdropped amount.
    pub fn xrp_overhead(&self) -> f64 {
        self.fee_xrp + self.reserve_xrp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_counts_fees_reserve_and_pauses() {
        let estimate = ExecutorSettings::default().estimate(250);

        assert_eq!(estimate.transactions, 250);
        assert_eq!(estimate.fee_xrp, 0.003);
        assert!((estimate.xrp_overhead() - 10.003).abs() < 1e-9);
        assert_eq!(estimate.duration, Duration::from_secs(250 + 249));

        let empty = ExecutorSettings::default().estimate(0);
        assert_eq!(empty.fee_xrp, 0.0);
        assert_eq!(empty.duration, Duration::ZERO);
    }
}

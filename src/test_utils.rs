use std::{
    collections::{HashSet, VecDeque},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    executor::{
        capabilities::{LedgerQuery, PaymentSigner},
        error::PaymentFailure,
        typedefs::WalletInfo,
    },
    onchain::typedefs::{Network, PaymentInstruction},
};

pub const ADDR_A: &str = "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH";
pub const ADDR_B: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";
pub const ADDR_C: &str = "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn";
pub const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
pub const SENDER: &str = "rsLCgu1WmSN2nHVjZQTjC6x5HtJCM5hvHk";

/// Signer answering from a script, then succeeding once the script runs out.
#[derive(Default)]
pub struct MockSigner {
    script: Mutex<VecDeque<Result<String, PaymentFailure>>>,
    submitted: Mutex<Vec<PaymentInstruction>>,
    delay: Option<Duration>,
    cancels: Mutex<usize>,
    late_outcome: Option<Result<String, PaymentFailure>>,
}

impl MockSigner {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn scripted(responses: Vec<Result<String, PaymentFailure>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Outcome reported when a timed out request is cancelled.
    pub fn with_late_outcome(mut self, outcome: Result<String, PaymentFailure>) -> Self {
        self.late_outcome = Some(outcome);
        self
    }

    pub fn cancels(&self) -> usize {
        *self.cancels.lock().unwrap()
    }

    pub fn submitted(&self) -> Vec<PaymentInstruction> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentSigner for MockSigner {
    async fn connect(&mut self) -> eyre::Result<WalletInfo> {
        Ok(WalletInfo {
            address: SENDER.to_string(),
            balance: 1_000.0,
            network: Network::Testnet,
        })
    }

    async fn sign_and_submit(
        &self,
        instruction: &PaymentInstruction,
    ) -> Result<String, PaymentFailure> {
        let call = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(instruction.clone());
            submitted.len()
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("HASH{call}")))
    }

    async fn cancel_pending(&self) -> Option<Result<String, PaymentFailure>> {
        *self.cancels.lock().unwrap() += 1;
        self.late_outcome.clone()
    }

    async fn disconnect(&mut self) {}
}

/// In-memory ledger with one balance for every currency, unless XRP is set apart.
#[derive(Default)]
pub struct MockLedger {
    balance: f64,
    native_balance: Option<f64>,
    trust_lines: HashSet<String>,
    unreachable: bool,
}

impl MockLedger {
    pub fn with_balance(balance: f64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    /// XRP balance distinct from the issued one.
    pub fn with_native_balance(mut self, balance: f64) -> Self {
        self.native_balance = Some(balance);
        self
    }

    pub fn with_trust_lines(mut self, holders: &[&str]) -> Self {
        self.trust_lines = holders.iter().map(|h| h.to_string()).collect();
        self
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    fn check_reachable(&self) -> eyre::Result<()> {
        if self.unreachable {
            eyre::bail!("connection refused")
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerQuery for MockLedger {
    async fn get_balance(
        &self,
        _address: &str,
        _currency: &str,
        issuer: Option<&str>,
    ) -> eyre::Result<f64> {
        self.check_reachable()?;
        match (issuer, self.native_balance) {
            (None, Some(native)) => Ok(native),
            _ => Ok(self.balance),
        }
    }

    async fn has_trust_line(
        &self,
        address: &str,
        _currency: &str,
        _issuer: &str,
    ) -> eyre::Result<bool> {
        self.check_reachable()?;
        Ok(self.trust_lines.contains(address))
    }

    async fn validate_address(&self, address: &str) -> eyre::Result<bool> {
        self.check_reachable()?;
        Ok(address != ISSUER)
    }
}

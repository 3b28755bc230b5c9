use std::collections::HashSet;

use crate::{
    distribution::{token::TokenConfig, typedefs::PricedRecipient},
    onchain::{
        constants::{DROPS_PER_XRP, NATIVE_CURRENCY},
        tx::{build_payment, format_value},
    },
    utils::misc::shorten_address,
};

use super::{
    capabilities::{LedgerQuery, PaymentSigner},
    error::{PaymentFailure, PreconditionError},
    typedefs::{ExecutionResult, ExecutorSettings, TransactionOutcome, WalletInfo},
};

const ISSUED_TOLERANCE: f64 = 1e-12;

/// Pays a priced recipient list one transaction at a time.
///
/// Payments from one sender must not overlap (the account sequence number is
/// shared), so each submission is awaited before the next one is built.
pub struct PaymentExecutor<'a, S: ?Sized, L: ?Sized> {
    signer: &'a S,
    ledger: &'a L,
    settings: ExecutorSettings,
}

impl<'a, S, L> PaymentExecutor<'a, S, L>
where
    S: PaymentSigner + ?Sized,
    L: LedgerQuery + ?Sized,
{
    pub fn new(signer: &'a S, ledger: &'a L, settings: ExecutorSettings) -> Self {
        Self {
            signer,
            ledger,
            settings,
        }
    }

    /// Runs the whole batch. Only precondition failures are returned as
    /// errors; once the first payment is attempted every recipient gets
    /// exactly one outcome.
    pub async fn execute<F>(
        &self,
        wallet: &WalletInfo,
        recipients: &[PricedRecipient],
        token: &TokenConfig,
        mut on_progress: F,
    ) -> Result<ExecutionResult, PreconditionError>
    where
        F: FnMut(f64, &str),
    {
        self.check_preconditions(wallet, recipients, token).await?;

        let total = recipients.len();
        let mut results = Vec::with_capacity(total);

        tracing::info!(
            "Starting airdrop of {} {} to {total} recipients from `{}`",
            format_value(recipients.iter().map(|r| r.amount).sum()),
            token.currency,
            wallet.address
        );

        for (index, recipient) in recipients.iter().enumerate() {
            let instruction = build_payment(&wallet.address, recipient, token, index, total);

            let outcome = match self.submit(&instruction).await {
                Ok(tx_hash) => {
                    tracing::info!(
                        "Payment {}/{total} to `{}` confirmed: {}",
                        index + 1,
                        recipient.address,
                        wallet.network.explorer_tx_url(&tx_hash)
                    );
                    TransactionOutcome::succeeded(&recipient.address, recipient.amount, tx_hash)
                }
                Err(failure) => {
                    tracing::error!(
                        "Payment {}/{total} to `{}` failed: {failure}",
                        index + 1,
                        recipient.address
                    );
                    TransactionOutcome::failed(&recipient.address, recipient.amount, &failure)
                }
            };

            let message = format!(
                "Transaction {}/{total} to {}: {}",
                index + 1,
                shorten_address(&recipient.address),
                if outcome.success { "success" } else { "failed" }
            );
            results.push(outcome);

            on_progress((index + 1) as f64 / total as f64 * 100.0, &message);

            if index + 1 < total && !self.settings.tx_delay.is_zero() {
                tokio::time::sleep(self.settings.tx_delay).await;
            }
        }

        let result = ExecutionResult::from_outcomes(results);

        tracing::info!(
            "Airdrop finished: {}/{} successful, {} failed",
            result.success_count,
            result.total(),
            result.fail_count
        );

        Ok(result)
    }

    async fn submit(
        &self,
        instruction: &crate::onchain::typedefs::PaymentInstruction,
    ) -> Result<String, PaymentFailure> {
        let signing = tokio::time::timeout(
            self.settings.sign_timeout,
            self.signer.sign_and_submit(instruction),
        );

        match signing.await {
            Ok(result) => result,
            // the request may still be answered later, withdraw it first
            Err(_) => self
                .signer
                .cancel_pending()
                .await
                .unwrap_or(Err(PaymentFailure::Timeout)),
        }
    }

    async fn check_preconditions(
        &self,
        wallet: &WalletInfo,
        recipients: &[PricedRecipient],
        token: &TokenConfig,
    ) -> Result<(), PreconditionError> {
        if recipients.is_empty() {
            return Err(PreconditionError::NoRecipients);
        }

        let currency = token.ledger_currency_code();
        let issuer = token.issuer.as_deref();

        let amount: f64 = recipients.iter().map(|r| r.amount).sum();
        let overhead = self.settings.estimate(recipients.len()).xrp_overhead();

        match issuer {
            None => {
                self.check_balance(wallet, &currency, None, &token.currency, amount + overhead)
                    .await?
            }
            Some(issuer) => {
                self.check_balance(wallet, &currency, Some(issuer), &token.currency, amount)
                    .await?;
                self.check_balance(wallet, NATIVE_CURRENCY, None, NATIVE_CURRENCY, overhead)
                    .await?;
            }
        }

        if let Some(issuer) = issuer.filter(|_| self.settings.check_trust_lines) {
            self.check_trust_lines(recipients, token, &currency, issuer)
                .await?;
        }

        Ok(())
    }

    async fn check_balance(
        &self,
        wallet: &WalletInfo,
        currency: &str,
        issuer: Option<&str>,
        label: &str,
        needed: f64,
    ) -> Result<(), PreconditionError> {
        let available = self
            .ledger
            .get_balance(&wallet.address, currency, issuer)
            .await
            .map_err(|e| PreconditionError::Ledger(e.to_string()))?;

        if exceeds(needed, available, issuer.is_none()) {
            tracing::warn!(
                "Not enough {label} in `{}`: {} - required: {}",
                wallet.address,
                format_value(available),
                format_value(needed)
            );
            return Err(PreconditionError::InsufficientBalance {
                currency: label.to_string(),
                needed,
                available,
            });
        }

        Ok(())
    }

    async fn check_trust_lines(
        &self,
        recipients: &[PricedRecipient],
        token: &TokenConfig,
        currency: &str,
        issuer: &str,
    ) -> Result<(), PreconditionError> {
        let mut checked = HashSet::new();
        let mut missing = vec![];

        for recipient in recipients {
            let address = recipient.address.as_str();
            if address == issuer || !checked.insert(address) {
                continue;
            }

            let has_line = self
                .ledger
                .has_trust_line(address, currency, issuer)
                .await
                .map_err(|e| PreconditionError::Ledger(e.to_string()))?;

            if !has_line {
                tracing::warn!(
                    "`{address}` cannot receive {}: {}",
                    token.currency,
                    PaymentFailure::MissingTrustLine
                );
                missing.push(address.to_string());
            }
        }

        if missing.is_empty() {
            return Ok(());
        }

        Err(PreconditionError::MissingTrustLine {
            currency: token.currency.clone(),
            addresses: missing,
        })
    }
}

/// XRP is compared at drop precision, issued values with a relative
/// tolerance, so float noise in the sum cannot block a batch.
fn exceeds(needed: f64, available: f64, native: bool) -> bool {
    if available.is_infinite() {
        return false;
    }
    if native {
        let scale = DROPS_PER_XRP as f64;
        return (needed * scale).round() > (available * scale).round();
    }
    needed - available > needed.abs().max(available.abs()) * ISSUED_TOLERANCE
}

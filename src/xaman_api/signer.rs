use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    executor::{
        capabilities::{LedgerQuery, PaymentSigner},
        error::PaymentFailure,
        typedefs::WalletInfo,
    },
    onchain::{
        client::XrplClient,
        constants::{NATIVE_CURRENCY, TES_SUCCESS},
        typedefs::{Network, PaymentInstruction},
    },
};

use super::{
    api::{PayloadApi, XamanApi},
    constants::SIGN_IN_TX_TYPE,
    schemas::{CreatedPayload, PayloadDetails, PayloadOptions, SignInTx},
    typedefs::PayloadSettings,
};

const SIGN_IN_INSTRUCTION: &str = "Sign in to connect your wallet to the XRPL Airdrop Tool";

/// Signs through the Xaman mobile wallet: every request becomes a payload
/// the user approves on their phone, then the payload is polled until it
/// resolves.
pub struct XamanSigner<A = XamanApi> {
    api: A,
    ledger: XrplClient,
    network: Network,
    settings: PayloadSettings,
    account: Option<String>,
    /// Payment payload still waiting for an answer.
    pending: Mutex<Option<String>>,
}

impl<A: PayloadApi> XamanSigner<A> {
    pub fn new(api: A, ledger: XrplClient, network: Network, settings: PayloadSettings) -> Self {
        Self {
            api,
            ledger,
            network,
            settings,
            account: None,
            pending: Mutex::new(None),
        }
    }

    fn options(&self, submit: bool) -> PayloadOptions {
        PayloadOptions {
            submit,
            expire: self.settings.expire_minutes,
        }
    }

    fn set_pending(&self, uuid: Option<String>) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = uuid;
        }
    }

    fn take_pending(&self) -> Option<String> {
        self.pending.lock().ok()?.take()
    }

    async fn wait_for<T>(
        &self,
        uuid: &str,
        resolve: impl Fn(&PayloadDetails) -> Option<T>,
    ) -> eyre::Result<T> {
        loop {
            let details = self.api.get_payload(uuid).await?;

            if let Some(resolved) = resolve(&details) {
                return Ok(resolved);
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

fn announce(payload: &CreatedPayload, what: &str) {
    tracing::info!("Open in Xaman to {what}: {}", payload.next.always);
    if let Some(qr) = &payload.refs.qr_png {
        tracing::info!("QR code: {qr}");
    }
}

/// Final state of a sign-in payload: the signing account, or why there is none.
pub fn resolve_sign_in(details: &PayloadDetails) -> Option<eyre::Result<String>> {
    let meta = &details.meta;

    if meta.signed {
        return Some(
            details
                .response
                .account
                .clone()
                .ok_or_else(|| eyre::eyre!("signed sign-in payload carries no account")),
        );
    }
    if meta.expired {
        return Some(Err(eyre::eyre!("sign-in request expired")));
    }
    if meta.resolved || meta.cancelled {
        return Some(Err(eyre::eyre!("sign-in request was rejected")));
    }

    None
}

/// Final state of a payment payload, `None` while it is still pending.
pub fn resolve_payment(details: &PayloadDetails) -> Option<Result<String, PaymentFailure>> {
    let meta = &details.meta;
    let response = &details.response;

    if meta.signed {
        return match response.dispatched_result.as_deref() {
            Some(TES_SUCCESS) => Some(response.txid.clone().ok_or_else(|| {
                PaymentFailure::LedgerError("no transaction hash returned".to_string())
            })),
            Some(code) if !code.is_empty() => Some(Err(PaymentFailure::LedgerError(code.to_string()))),
            // signed, not yet dispatched
            _ => None,
        };
    }
    if meta.expired {
        return Some(Err(PaymentFailure::Timeout));
    }
    if meta.resolved || meta.cancelled {
        return Some(Err(PaymentFailure::Rejected));
    }

    None
}

#[async_trait]
impl<A: PayloadApi> PaymentSigner for XamanSigner<A> {
    async fn connect(&mut self) -> eyre::Result<WalletInfo> {
        let sign_in = serde_json::to_value(SignInTx {
            transaction_type: SIGN_IN_TX_TYPE,
        })?;
        let payload = self
            .api
            .create_payload(sign_in, self.options(false), SIGN_IN_INSTRUCTION)
            .await?;
        announce(&payload, "connect your wallet");

        let address = self.wait_for(&payload.uuid, resolve_sign_in).await??;
        let balance = self
            .ledger
            .get_balance(&address, NATIVE_CURRENCY, None)
            .await?;

        tracing::info!("Connected `{address}` on {} with {balance} XRP", self.network);
        self.account = Some(address.clone());

        Ok(WalletInfo {
            address,
            balance,
            network: self.network,
        })
    }

    async fn sign_and_submit(
        &self,
        instruction: &PaymentInstruction,
    ) -> Result<String, PaymentFailure> {
        let network_error = |e: eyre::Report| PaymentFailure::NetworkError(e.to_string());

        let txjson = serde_json::to_value(instruction).map_err(|e| network_error(e.into()))?;
        let payload = self
            .api
            .create_payload(txjson, self.options(true), &instruction.description)
            .await
            .map_err(network_error)?;
        announce(&payload, &instruction.description);

        self.set_pending(Some(payload.uuid.clone()));
        let outcome = self.wait_for(&payload.uuid, resolve_payment).await;
        self.set_pending(None);

        outcome.map_err(network_error)?
    }

    async fn cancel_pending(&self) -> Option<Result<String, PaymentFailure>> {
        let uuid = self.take_pending()?;

        let cancel = match self.api.cancel_payload(&uuid).await {
            Ok(cancel) => cancel,
            Err(e) => {
                tracing::warn!("Failed to cancel payload {uuid}: {e}");
                return None;
            }
        };

        if cancel.result.cancelled {
            tracing::info!("Cancelled payload {uuid}");
            return None;
        }

        // answered in the meantime, keep whatever the ledger recorded
        tracing::warn!("Payload {uuid} was not cancelled: {}", cancel.result.reason);
        match self.api.get_payload(&uuid).await {
            Ok(details) => resolve_payment(&details),
            Err(e) => {
                tracing::warn!("Failed to read payload {uuid}: {e}");
                None
            }
        }
    }

    async fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            tracing::info!("Disconnected `{account}`");
        }
    }
}

use crate::{executor::capabilities::PaymentSigner, onchain::tx::format_value, session::Session};

pub async fn connect_wallet<S: PaymentSigner>(
    session: &mut Session,
    signer: &mut S,
) -> eyre::Result<()> {
    if let Some(wallet) = session.wallet() {
        tracing::warn!("Wallet `{}` is already connected", wallet.address);
        return Ok(());
    }

    let wallet = signer.connect().await?;

    tracing::info!(
        "Wallet `{}` connected on {} | Balance: {} XRP",
        wallet.address,
        wallet.network,
        format_value(wallet.balance)
    );
    session.connect(wallet);

    Ok(())
}

pub async fn disconnect_wallet<S: PaymentSigner>(session: &mut Session, signer: &mut S) {
    signer.disconnect().await;

    match session.disconnect() {
        Some(wallet) => tracing::info!("Wallet `{}` disconnected", wallet.address),
        None => tracing::warn!("No wallet connected"),
    }
}

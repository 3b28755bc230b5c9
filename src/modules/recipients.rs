use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::{
    distribution::typedefs::FileFormat,
    executor::capabilities::LedgerQuery,
    recipients::parser::parse_file,
    session::Session,
    utils::misc::shorten_address,
};

pub async fn load_file(session: &mut Session) -> eyre::Result<()> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Path to a .txt or .csv recipient list")
        .interact_text()?;
    let path = path.trim();

    let method = session.distribution().method();
    let parsed = parse_file(path, method).await?;
    session.load_parsed(parsed, FileFormat::from_path(path))?;

    tracing::info!(
        "Loaded {} unique recipients for {method} distribution",
        session.recipients().len()
    );

    if session.awaiting_values() {
        collect_individual_values(session)?;
    }

    Ok(())
}

/// Asks for the count or amount of every recipient of a plain address list.
pub fn collect_individual_values(session: &mut Session) -> eyre::Result<()> {
    let method = session.distribution().method();
    let total = session.recipients().len();

    let same_for_all = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "The list has no per-address values. Apply one {method} value to all {total} recipients?"
        ))
        .default(true)
        .interact()?;

    let values = if same_for_all {
        let value: f64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Value")
            .interact_text()?;
        vec![value; total]
    } else {
        let addresses: Vec<String> = session
            .recipients()
            .iter()
            .map(|r| r.address.clone())
            .collect();

        let mut values = Vec::with_capacity(total);
        for (index, address) in addresses.iter().enumerate() {
            let value: f64 = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("[{}/{total}] {address}", index + 1))
                .default(0.0)
                .interact_text()?;
            values.push(value);
        }
        values
    };

    session.apply_values(&values)?;

    Ok(())
}

pub fn paste_addresses(session: &mut Session) -> eyre::Result<()> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Addresses (separated by spaces or commas)")
        .interact_text()?;

    let report = session.validate_pasted(&text)?;

    for invalid in &report.invalid {
        tracing::warn!("Invalid address skipped: {invalid}");
    }
    tracing::info!(
        "{} valid, {} invalid addresses",
        report.valid.len(),
        report.invalid.len()
    );

    Ok(())
}

pub async fn add_recipient<L: LedgerQuery>(session: &mut Session, ledger: &L) -> eyre::Result<()> {
    let address: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Recipient address")
        .interact_text()?;
    let address = address.trim();

    session.add_recipient(address)?;
    tracing::info!("Added `{address}` ({} recipients)", session.recipients().len());

    match ledger.validate_address(address).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!("`{address}` is not activated on the ledger yet"),
        Err(e) => tracing::warn!("Could not look up `{address}` on the ledger: {e}"),
    }

    Ok(())
}

pub fn remove_recipient(session: &mut Session) -> eyre::Result<()> {
    if session.recipients().is_empty() {
        tracing::warn!("Recipient list is empty");
        return Ok(());
    }

    let items: Vec<String> = session
        .recipients()
        .iter()
        .map(|r| shorten_address(&r.address))
        .collect();

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Remove:")
        .items(&items)
        .default(0)
        .interact()?;

    if let Some(removed) = session.remove_recipient(index) {
        tracing::info!("Removed `{}`", removed.address);
    }

    Ok(())
}

pub fn clear_recipients(session: &mut Session) -> eyre::Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Remove all {} recipients?", session.recipients().len()))
        .default(false)
        .interact()?;

    if confirmed {
        session.clear_recipients();
        tracing::info!("Recipient list cleared");
    }

    Ok(())
}

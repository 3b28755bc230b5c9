use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::{
    distribution::{token::TokenConfig, typedefs::DistributionMethod},
    executor::typedefs::ExecutorSettings,
    onchain::{constants::NATIVE_CURRENCY, tx::format_value},
    session::Session,
};

use super::recipients::collect_individual_values;

pub fn configure_token(session: &mut Session, settings: &ExecutorSettings) -> eyre::Result<()> {
    let currency: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Currency code")
        .default(NATIVE_CURRENCY.to_string())
        .interact_text()?;

    let issuer = if currency.trim().eq_ignore_ascii_case(NATIVE_CURRENCY) {
        None
    } else {
        let issuer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Issuer address")
            .interact_text()?;
        Some(issuer)
    };

    let methods: Vec<String> = DistributionMethod::ALL
        .iter()
        .map(ToString::to_string)
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Distribution method:")
        .items(&methods)
        .default(0)
        .interact()?;
    let method = DistributionMethod::ALL[selection];

    let amount = if method.uses_base_amount() {
        Input::<f64>::with_theme(&ColorfulTheme::default())
            .with_prompt(match method {
                DistributionMethod::Proportional => "Amount per count unit",
                _ => "Amount per recipient",
            })
            .interact_text()?
    } else {
        0.0
    };

    let token = TokenConfig::new(&currency, issuer.as_deref(), amount, method)?;
    tracing::info!(
        "Token set to {}{} with {method} distribution",
        token.currency,
        token
            .issuer
            .as_deref()
            .map(|i| format!(" issued by `{i}`"))
            .unwrap_or_default()
    );
    session.set_token(token);

    if session.awaiting_values() || missing_values(session, method) {
        collect_individual_values(session)?;
    }

    show_preview(session, settings);

    Ok(())
}

/// Custom and proportional distribution with a list that carries no values.
fn missing_values(session: &Session, method: DistributionMethod) -> bool {
    let recipients = session.recipients();

    !recipients.is_empty()
        && match method {
            DistributionMethod::Equal => false,
            DistributionMethod::Proportional => recipients.iter().all(|r| r.count.is_none()),
            DistributionMethod::Custom => recipients.iter().all(|r| r.amount.is_none()),
        }
}

pub fn show_preview(session: &Session, settings: &ExecutorSettings) {
    let distribution = session.distribution();
    let preview = distribution.preview();
    let currency = session
        .token()
        .map(|t| t.currency.as_str())
        .unwrap_or(NATIVE_CURRENCY);

    if preview.is_empty() {
        tracing::warn!("Nothing to preview: add recipients and set a positive amount");
        return;
    }

    println!(
        "Method: {} | base amount {} | loaded from {}",
        distribution.method(),
        format_value(distribution.base_amount()),
        distribution.file_format()
    );
    println!("{:<4} {:<36} {:>12} {:>20}", "#", "Address", "Count", "Amount");
    for (index, entry) in preview.entries.iter().enumerate() {
        println!(
            "{:<4} {:<36} {:>12} {:>20}",
            index + 1,
            entry.address,
            format_value(entry.count),
            format!("{} {currency}", format_value(entry.amount))
        );
    }
    println!(
        "Total: {} recipients | count {} | {} {currency}",
        preview.entries.len(),
        format_value(preview.total_count),
        format_value(distribution.total_amount())
    );

    let estimate = settings.estimate(preview.entries.len());
    println!(
        "Fees for {} payments: {} XRP | reserve kept: {} XRP | ledger time: ~{}s plus signing",
        estimate.transactions,
        format_value(estimate.fee_xrp),
        format_value(estimate.reserve_xrp),
        estimate.duration.as_secs()
    );

    if let Some(wallet) = session.wallet() {
        let native = session.token().map_or(true, TokenConfig::is_native);
        let needed = if native {
            distribution.total_amount() + estimate.xrp_overhead()
        } else {
            estimate.xrp_overhead()
        };

        if needed > wallet.balance {
            tracing::warn!(
                "Needs {} XRP with fees and reserve, the connected wallet holds {} XRP",
                format_value(needed),
                format_value(wallet.balance)
            );
        }
    }
}

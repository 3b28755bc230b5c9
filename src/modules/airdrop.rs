use chrono::Utc;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

use crate::{
    config::Config,
    executor::{
        capabilities::{LedgerQuery, PaymentSigner},
        runner::PaymentExecutor,
    },
    export::{
        exporter::export,
        typedefs::{ExportContext, ExportFormat},
    },
    onchain::tx::format_value,
    session::Session,
    utils::misc::percent_progress_bar,
};

pub async fn execute_airdrop<S, L>(
    session: &mut Session,
    signer: &S,
    ledger: &L,
    config: &Config,
) -> eyre::Result<()>
where
    S: PaymentSigner,
    L: LedgerQuery,
{
    let result = {
        let plan = session.execution_plan()?;
        let total: f64 = plan.recipients.iter().map(|r| r.amount).sum();
        let settings = config.executor_settings();
        let estimate = settings.estimate(plan.recipients.len());

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Send {} {} to {} recipients from `{}` for {} XRP in fees? Every payment has to be approved in Xaman",
                format_value(total),
                plan.token.currency,
                plan.recipients.len(),
                plan.wallet.address,
                format_value(estimate.fee_xrp)
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            tracing::info!("Airdrop cancelled");
            return Ok(());
        }

        let executor = PaymentExecutor::new(signer, ledger, settings);
        let pb = percent_progress_bar();

        let result = executor
            .execute(plan.wallet, plan.recipients, plan.token, |percent, message| {
                pb.set_position(percent.round() as u64);
                pb.set_message(message.to_string());
            })
            .await;

        pb.finish();
        result?
    };

    tracing::info!(
        "Airdrop complete: {} successful, {} failed",
        result.success_count,
        result.fail_count
    );
    session.record_result(result);

    Ok(())
}

pub async fn export_results(session: &Session, config: &Config) -> eyre::Result<()> {
    let Some(result) = session.last_result() else {
        tracing::warn!("No transaction results to export");
        return Ok(());
    };

    let mut options: Vec<String> = ExportFormat::ALL.iter().map(ToString::to_string).collect();
    options.push("All formats".to_string());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Export format:")
        .items(&options)
        .default(0)
        .interact()?;

    let formats = match ExportFormat::ALL.get(selection) {
        Some(format) => vec![*format],
        None => ExportFormat::ALL.to_vec(),
    };

    let ctx = ExportContext {
        network: session.wallet().map_or(config.network, |w| w.network),
        token: session.token(),
        generated_at: Utc::now(),
    };

    for format in formats {
        let file = export(result, &ctx, format)?;
        let path = file.save(&config.results_dir).await?;
        tracing::info!("{format} export saved to `{}`", path.display());
    }

    Ok(())
}

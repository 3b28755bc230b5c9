use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::{
    distribution::token::TokenConfig,
    executor::typedefs::{ExecutionResult, TransactionOutcome},
    onchain::{tx::format_value, typedefs::Network},
};

use super::typedefs::{ExportContext, ExportFormat, ExportedFile};

const FILE_PREFIX: &str = "airdrop-results";
const REPORT_TITLE: &str = "XRPL Airdrop Results";
const RULE_WIDTH: usize = 50;
const CSV_HEADER: [&str; 7] = [
    "Transaction #",
    "Recipient",
    "Amount",
    "Token",
    "Status",
    "Transaction Hash",
    "Error",
];

/// Machine readable report, also accepted back by `serde_json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub timestamp: DateTime<Utc>,
    pub network: Network,
    pub token: Option<TokenConfig>,
    pub total_transactions: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub transactions: Vec<TransactionOutcome>,
}

pub fn export(
    result: &ExecutionResult,
    ctx: &ExportContext<'_>,
    format: ExportFormat,
) -> eyre::Result<ExportedFile> {
    let content = match format {
        ExportFormat::Csv => to_csv(result, ctx)?,
        ExportFormat::Json => to_json(result, ctx)?,
        ExportFormat::Txt => to_txt(result, ctx),
    };

    Ok(ExportedFile {
        filename: format!("{}.{}", file_stem(ctx.generated_at), format.extension()),
        mime_type: format.mime_type(),
        content,
    })
}

/// `airdrop-results-2025-01-02T03-04-05-678Z`
fn file_stem(generated_at: DateTime<Utc>) -> String {
    let timestamp = generated_at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");

    format!("{FILE_PREFIX}-{timestamp}")
}

fn currency<'a>(ctx: &ExportContext<'a>) -> &'a str {
    ctx.token.map(|t| t.currency.as_str()).unwrap_or_default()
}

fn to_csv(result: &ExecutionResult, ctx: &ExportContext<'_>) -> eyre::Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    writer.write_record(CSV_HEADER)?;

    for (index, outcome) in result.results.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string().as_str(),
            outcome.recipient.as_str(),
            format_value(outcome.amount).as_str(),
            currency(ctx),
            if outcome.success { "Success" } else { "Failed" },
            outcome.tx_hash.as_deref().unwrap_or_default(),
            outcome.error.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| eyre::eyre!("{e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json(result: &ExecutionResult, ctx: &ExportContext<'_>) -> eyre::Result<String> {
    let report = JsonReport {
        timestamp: ctx.generated_at,
        network: ctx.network,
        token: ctx.token.cloned(),
        total_transactions: result.total(),
        success_count: result.success_count,
        failed_count: result.fail_count,
        transactions: result.results.clone(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

fn to_txt(result: &ExecutionResult, ctx: &ExportContext<'_>) -> String {
    let token = ctx.token.map(|t| t.currency.as_str()).unwrap_or("Unknown");
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(
        out,
        "Generated: {}",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Network: {}", ctx.network);
    let _ = writeln!(out, "Token: {token}");
    let _ = writeln!(out, "Total Transactions: {}", result.total());
    let _ = writeln!(out, "Successful: {}", result.success_count);
    let _ = writeln!(out, "Failed: {}", result.fail_count);
    let _ = writeln!(out, "\n{}\n", "=".repeat(RULE_WIDTH));

    for (index, outcome) in result.results.iter().enumerate() {
        let _ = writeln!(out, "Transaction {}:", index + 1);
        let _ = writeln!(out, "  Recipient: {}", outcome.recipient);
        let _ = writeln!(out, "  Amount: {}", format_value(outcome.amount));
        let _ = writeln!(
            out,
            "  Status: {}",
            if outcome.success { "SUCCESS" } else { "FAILED" }
        );
        if let Some(hash) = &outcome.tx_hash {
            let _ = writeln!(out, "  Transaction Hash: {hash}");
        }
        if let Some(error) = &outcome.error {
            let _ = writeln!(out, "  Error: {error}");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{
        distribution::typedefs::DistributionMethod,
        executor::error::PaymentFailure,
        test_utils::{ADDR_A, ADDR_B, ISSUER},
    };

    fn result() -> ExecutionResult {
        ExecutionResult::from_outcomes(vec![
            TransactionOutcome::succeeded(ADDR_A, 10.0, "ABC123".to_string()),
            TransactionOutcome::failed(ADDR_B, 2.5, &PaymentFailure::Rejected),
        ])
    }

    fn token() -> TokenConfig {
        TokenConfig::new("USD", Some(ISSUER), 10.0, DistributionMethod::Equal).unwrap()
    }

    fn ctx(token: &TokenConfig) -> ExportContext<'_> {
        ExportContext {
            network: Network::Testnet,
            token: Some(token),
            generated_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn filename_has_no_colons_or_dots_before_extension() {
        let token = token();
        let file = export(&result(), &ctx(&token), ExportFormat::Csv).unwrap();

        assert_eq!(file.filename, "airdrop-results-2025-01-02T03-04-05-000Z.csv");
        assert_eq!(file.mime_type, "text/csv");
    }

    #[test]
    fn csv_quotes_every_cell() {
        let token = token();
        let file = export(&result(), &ctx(&token), ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = file.content.lines().collect();

        assert_eq!(
            lines[0],
            r#""Transaction #","Recipient","Amount","Token","Status","Transaction Hash","Error""#
        );
        assert_eq!(
            lines[1],
            format!(r#""1","{ADDR_A}","10","USD","Success","ABC123","""#)
        );
        assert_eq!(
            lines[2],
            format!(r#""2","{ADDR_B}","2.5","USD","Failed","","Rejected""#)
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_report_parses_back_with_same_counts() {
        let token = token();
        let file = export(&result(), &ctx(&token), ExportFormat::Json).unwrap();
        let report: JsonReport = serde_json::from_str(&file.content).unwrap();

        assert_eq!(report.total_transactions, 2);
        assert_eq!(report.success_count, 1);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.token, Some(token));

        let raw: serde_json::Value = serde_json::from_str(&file.content).unwrap();
        assert_eq!(raw["successCount"], 1);
        assert_eq!(raw["transactions"][0]["txHash"], "ABC123");
        assert!(raw["transactions"][1].get("txHash").is_none());
    }

    #[test]
    fn txt_report_lists_each_transaction() {
        let token = token();
        let file = export(&result(), &ctx(&token), ExportFormat::Txt).unwrap();

        assert!(file.content.starts_with("XRPL Airdrop Results\n"));
        assert!(file.content.contains("Network: testnet\n"));
        assert!(file.content.contains(&format!("\n{}\n", "=".repeat(50))));
        assert!(file.content.contains("Transaction 2:\n"));
        assert!(file.content.contains("  Transaction Hash: ABC123\n"));
        assert!(file.content.contains("  Status: FAILED\n  Error: Rejected\n"));
    }

    #[test]
    fn txt_report_without_token() {
        let ctx = ExportContext {
            network: Network::Mainnet,
            token: None,
            generated_at: Utc::now(),
        };
        let file = export(&ExecutionResult::default(), &ctx, ExportFormat::Txt).unwrap();

        assert!(file.content.contains("Token: Unknown\n"));
        assert!(file.content.contains("Total Transactions: 0\n"));
    }

    #[tokio::test]
    async fn saves_into_results_dir() {
        let dir = tempfile::tempdir().unwrap();
        let token = token();
        let file = export(&result(), &ctx(&token), ExportFormat::Json).unwrap();

        let path = file.save(dir.path().join("results")).await.unwrap();

        assert_eq!(tokio::fs::read_to_string(path).await.unwrap(), file.content);
    }
}

use std::{collections::HashSet, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    distribution::typedefs::{DistributionMethod, FileFormat},
    utils::files::read_text,
};

use super::{
    address::is_valid_address,
    error::ParseError,
    typedefs::{ParsedRecipients, Recipient},
};

/// Parses an uploaded recipient list.
///
/// Malformed TXT lines and CSV rows with an invalid address are skipped with a
/// warning. Only structural CSV defects (no header, no rows, a missing required
/// column) fail the whole parse. Duplicate addresses are dropped, keeping the
/// first occurrence.
pub fn parse(
    raw: &str,
    format: FileFormat,
    method: DistributionMethod,
) -> Result<ParsedRecipients, ParseError> {
    let mut parsed = match format {
        FileFormat::Csv => ParsedRecipients::ready(parse_csv(raw, method)?),
        FileFormat::Txt => parse_txt(raw, method),
    };

    parsed.recipients = dedup_by_address(parsed.recipients);

    Ok(parsed)
}

pub async fn parse_file(
    path: impl AsRef<Path>,
    method: DistributionMethod,
) -> eyre::Result<ParsedRecipients> {
    let format = FileFormat::from_path(&path);
    let raw = read_text(&path).await?;

    let parsed = parse(&raw, format, method)?;

    tracing::info!(
        "Parsed {} recipients from `{}`",
        parsed.recipients.len(),
        path.as_ref().display()
    );

    Ok(parsed)
}

/// Builds recipients from the per-address values collected after a plain TXT
/// list was loaded for proportional or custom distribution. Missing or
/// negative values count as zero.
pub fn apply_individual_values(
    recipients: &[Recipient],
    values: &[f64],
    method: DistributionMethod,
) -> Vec<Recipient> {
    recipients
        .iter()
        .enumerate()
        .map(|(index, recipient)| {
            let value = values
                .get(index)
                .copied()
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(0.0);

            match method {
                DistributionMethod::Proportional => {
                    Recipient::with_count(&recipient.address, value)
                }
                DistributionMethod::Custom => Recipient::with_amount(&recipient.address, value),
                DistributionMethod::Equal => Recipient::new(&recipient.address),
            }
        })
        .collect()
}

pub(crate) fn dedup_by_address(recipients: Vec<Recipient>) -> Vec<Recipient> {
    let mut seen = HashSet::with_capacity(recipients.len());

    recipients
        .into_iter()
        .filter(|recipient| {
            let first = seen.insert(recipient.address.clone());
            if !first {
                tracing::warn!("Dropping duplicate recipient {}", recipient.address);
            }
            first
        })
        .collect()
}

fn non_blank_lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    raw.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_txt(raw: &str, method: DistributionMethod) -> ParsedRecipients {
    if method == DistributionMethod::Equal {
        return ParsedRecipients::ready(parse_simple(raw));
    }

    if has_comma_values(raw) {
        ParsedRecipients::ready(parse_comma_values(raw, method))
    } else {
        ParsedRecipients::awaiting_values(parse_simple(raw))
    }
}

fn has_comma_values(raw: &str) -> bool {
    non_blank_lines(raw).any(|(_, line)| line.split(',').count() == 2)
}

fn parse_simple(raw: &str) -> Vec<Recipient> {
    non_blank_lines(raw)
        .filter_map(|(line_no, line)| {
            if is_valid_address(line) {
                Some(Recipient::new(line))
            } else {
                tracing::warn!("Line {line_no}: skipping invalid XRPL address `{line}`");
                None
            }
        })
        .collect()
}

fn parse_comma_values(raw: &str, method: DistributionMethod) -> Vec<Recipient> {
    let mut recipients = vec![];

    for (line_no, line) in non_blank_lines(raw) {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();

        let [address, value] = parts.as_slice() else {
            tracing::warn!("Line {line_no}: expected `address,value`, got `{line}`");
            continue;
        };

        if !is_valid_address(address) {
            tracing::warn!("Line {line_no}: skipping invalid XRPL address `{address}`");
            continue;
        }

        let Some(value) = value.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
        else {
            tracing::warn!("Line {line_no}: skipping invalid value `{value}`");
            continue;
        };

        recipients.push(match method {
            DistributionMethod::Proportional => Recipient::with_count(address, value),
            DistributionMethod::Custom => Recipient::with_amount(address, value),
            DistributionMethod::Equal => Recipient::new(address),
        });
    }

    recipients
}

fn parse_csv(raw: &str, method: DistributionMethod) -> Result<Vec<Recipient>, ParseError> {
    let content = non_blank_lines(raw)
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

    let (header, rows) = match records.split_first() {
        None => return Err(ParseError::Empty),
        Some((_, [])) => return Err(ParseError::NoDataRows),
        Some(split) => split,
    };

    let headers: Vec<String> = header.iter().map(str::to_lowercase).collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let required = |name: &'static str| {
        column(name).ok_or(ParseError::MissingColumn {
            column: name,
            method,
        })
    };

    let address_idx = required("address")?;
    let count_idx = match method {
        DistributionMethod::Proportional => Some(required("count")?),
        _ => column("count"),
    };
    let amount_idx = match method {
        DistributionMethod::Custom => Some(required("amount")?),
        _ => column("amount"),
    };

    let mut recipients = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let address = cell(Some(address_idx));
        if !is_valid_address(address) {
            tracing::warn!("Row {}: skipping invalid XRPL address `{address}`", index + 2);
            continue;
        }

        recipients.push(Recipient {
            address: address.to_string(),
            count: Some(positive_number(cell(count_idx)).unwrap_or(1.0)),
            amount: positive_number(cell(amount_idx)),
            is_valid: true,
        });
    }

    Ok(recipients)
}

fn positive_number(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ADDR_A, ADDR_B, ADDR_C};

    fn addresses(parsed: &ParsedRecipients) -> Vec<&str> {
        parsed
            .recipients
            .iter()
            .map(|r| r.address.as_str())
            .collect()
    }

    #[test]
    fn txt_equal_reads_one_address_per_line() {
        let raw = format!("{ADDR_A}\n\n  {ADDR_B}  \nnot-an-address\n{ADDR_C}\n");

        let parsed = parse(&raw, FileFormat::Txt, DistributionMethod::Equal).unwrap();

        assert!(!parsed.needs_individual_values);
        assert_eq!(addresses(&parsed), vec![ADDR_A, ADDR_B, ADDR_C]);
        assert!(parsed
            .recipients
            .iter()
            .all(|r| r.count == Some(1.0) && r.amount.is_none() && r.is_valid));
    }

    #[test]
    fn txt_simple_form_requests_individual_values() {
        let raw = format!("{ADDR_A}\n{ADDR_B}\n");

        let parsed = parse(&raw, FileFormat::Txt, DistributionMethod::Custom).unwrap();

        assert!(parsed.needs_individual_values);
        assert_eq!(addresses(&parsed), vec![ADDR_A, ADDR_B]);
    }

    #[test]
    fn txt_comma_form_fills_count_for_proportional() {
        let raw = format!("{ADDR_A},5\n{ADDR_B}, 2.5\n");

        let parsed = parse(&raw, FileFormat::Txt, DistributionMethod::Proportional).unwrap();

        assert!(!parsed.needs_individual_values);
        assert_eq!(parsed.recipients[0].count, Some(5.0));
        assert_eq!(parsed.recipients[1].count, Some(2.5));
        assert!(parsed.recipients.iter().all(|r| r.amount.is_none()));
    }

    #[test]
    fn txt_comma_form_fills_amount_for_custom() {
        let raw = format!("{ADDR_A},12.5\n{ADDR_B},0\n");

        let parsed = parse(&raw, FileFormat::Txt, DistributionMethod::Custom).unwrap();

        assert_eq!(parsed.recipients[0].amount, Some(12.5));
        assert_eq!(parsed.recipients[0].count, Some(1.0));
        assert_eq!(parsed.recipients[1].amount, Some(0.0));
    }

    #[test]
    fn txt_comma_form_skips_malformed_lines() {
        let raw = format!(
            "{ADDR_A},10\n{ADDR_B},-3\n{ADDR_C},abc\nrBAD,4\n{ADDR_C},1,2\n{ADDR_C}\n{ADDR_C},7\n"
        );

        let parsed = parse(&raw, FileFormat::Txt, DistributionMethod::Custom).unwrap();

        assert_eq!(addresses(&parsed), vec![ADDR_A, ADDR_C]);
        assert_eq!(parsed.recipients[1].amount, Some(7.0));
    }

    #[test]
    fn csv_proportional_reads_counts_and_leaves_amount_unresolved() {
        let raw = format!("address,count\n{ADDR_A},5\n{ADDR_B},3\n");

        let parsed = parse(&raw, FileFormat::Csv, DistributionMethod::Proportional).unwrap();

        assert_eq!(parsed.recipients.len(), 2);
        assert_eq!(parsed.recipients[0].count, Some(5.0));
        assert_eq!(parsed.recipients[1].count, Some(3.0));
        assert!(parsed.recipients.iter().all(|r| r.amount.is_none()));
    }

    #[test]
    fn csv_headers_are_case_and_space_insensitive() {
        let raw = format!(" Amount , ADDRESS \n12,{ADDR_A}\n");

        let parsed = parse(&raw, FileFormat::Csv, DistributionMethod::Custom).unwrap();

        assert_eq!(parsed.recipients[0].address, ADDR_A);
        assert_eq!(parsed.recipients[0].amount, Some(12.0));
    }

    #[test]
    fn csv_missing_required_column_fails_whole_parse() {
        let raw = format!("address,amount\n{ADDR_A},5\n");

        let err = parse(&raw, FileFormat::Csv, DistributionMethod::Proportional).unwrap_err();

        assert!(matches!(
            err,
            ParseError::MissingColumn { column: "count", .. }
        ));

        let raw = format!("wallet\n{ADDR_A}\n");
        let err = parse(&raw, FileFormat::Csv, DistributionMethod::Equal).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingColumn {
                column: "address",
                ..
            }
        ));
    }

    #[test]
    fn csv_without_rows_is_rejected() {
        assert!(matches!(
            parse("\n  \n", FileFormat::Csv, DistributionMethod::Equal),
            Err(ParseError::Empty)
        ));
        assert!(matches!(
            parse("address\n", FileFormat::Csv, DistributionMethod::Equal),
            Err(ParseError::NoDataRows)
        ));
    }

    #[test]
    fn csv_skips_invalid_rows_and_defaults_values() {
        let raw = format!("address,count,amount\nrBAD,2,3\n{ADDR_A},,\n{ADDR_B},x,-1\n");

        let parsed = parse(&raw, FileFormat::Csv, DistributionMethod::Equal).unwrap();

        assert_eq!(addresses(&parsed), vec![ADDR_A, ADDR_B]);
        assert!(parsed
            .recipients
            .iter()
            .all(|r| r.count == Some(1.0) && r.amount.is_none()));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let raw = format!("{ADDR_A},1\n{ADDR_B},2\n{ADDR_A},3\n");

        let parsed = parse(&raw, FileFormat::Txt, DistributionMethod::Proportional).unwrap();

        assert_eq!(addresses(&parsed), vec![ADDR_A, ADDR_B]);
        assert_eq!(parsed.recipients[0].count, Some(1.0));
    }

    #[test]
    fn individual_values_are_applied_per_method() {
        let bare = vec![Recipient::new(ADDR_A), Recipient::new(ADDR_B)];

        let proportional =
            apply_individual_values(&bare, &[4.0], DistributionMethod::Proportional);
        assert_eq!(proportional[0].count, Some(4.0));
        assert_eq!(proportional[1].count, Some(0.0));

        let custom = apply_individual_values(&bare, &[1.5, -2.0], DistributionMethod::Custom);
        assert_eq!(custom[0].amount, Some(1.5));
        assert_eq!(custom[1].amount, Some(0.0));
    }

    #[tokio::test]
    async fn parse_file_infers_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holders.csv");
        tokio::fs::write(&path, format!("address,amount\n{ADDR_A},3\n"))
            .await
            .unwrap();

        let parsed = parse_file(&path, DistributionMethod::Custom).await.unwrap();

        assert_eq!(parsed.recipients[0].amount, Some(3.0));
    }
}

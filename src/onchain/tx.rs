use crate::distribution::{token::TokenConfig, typedefs::PricedRecipient};

use super::{
    constants::DROPS_PER_XRP,
    typedefs::{Amount, IssuedAmount, PaymentInstruction},
};

const PAYMENT: &str = "Payment";

pub fn xrp_to_drops(amount: f64) -> u64 {
    (amount * DROPS_PER_XRP as f64).round() as u64
}

pub fn drops_to_xrp(drops: u64) -> f64 {
    drops as f64 / DROPS_PER_XRP as f64
}

/// Decimal string with at most six fractional digits and no trailing zeros.
pub fn format_value(amount: f64) -> String {
    let fixed = format!("{amount:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "" | "-0" => "0".to_string(),
        value => value.to_string(),
    }
}

pub fn build_payment(
    account: &str,
    recipient: &PricedRecipient,
    token: &TokenConfig,
    position: usize,
    total: usize,
) -> PaymentInstruction {
    let amount = match token.issuer.as_deref() {
        None => Amount::Drops(xrp_to_drops(recipient.amount)),
        Some(issuer) => Amount::Issued(IssuedAmount {
            currency: token.ledger_currency_code(),
            issuer: issuer.to_string(),
            value: format_value(recipient.amount),
        }),
    };

    PaymentInstruction {
        transaction_type: PAYMENT,
        account: account.to_string(),
        destination: recipient.address.clone(),
        amount,
        description: format!(
            "Airdrop {} {} to {} ({}/{})",
            format_value(recipient.amount),
            token.currency,
            recipient.address,
            position + 1,
            total
        ),
    }
}

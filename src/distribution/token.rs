use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{onchain::constants::NATIVE_CURRENCY, recipients::address::is_valid_address};

use super::typedefs::DistributionMethod;

const STANDARD_CODE_LEN: usize = 3;
const HEX_CODE_LEN: usize = 40;
const MAX_NAMED_CODE_LEN: usize = HEX_CODE_LEN / 2;
pub const MAX_TOKEN_AMOUNT: f64 = 100_000_000_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum TokenConfigError {
    #[error("invalid currency code `{0}`")]
    InvalidCurrency(String),

    #[error("issued currency {0} requires an issuer address")]
    MissingIssuer(String),

    #[error("invalid issuer address `{0}`")]
    InvalidIssuer(String),

    #[error("XRP is the native currency and has no issuer")]
    UnexpectedIssuer,

    #[error("amount must be between 0 and 100000000000, got {0}")]
    InvalidAmount(f64),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenConfig {
    pub currency: String,
    pub issuer: Option<String>,
    pub amount: f64,
    pub method: DistributionMethod,
}

impl TokenConfig {
    pub fn new(
        currency: &str,
        issuer: Option<&str>,
        amount: f64,
        method: DistributionMethod,
    ) -> Result<Self, TokenConfigError> {
        let currency = currency.trim();
        let issuer = issuer.map(str::trim).filter(|i| !i.is_empty());

        if !(amount.is_finite() && (0.0..=MAX_TOKEN_AMOUNT).contains(&amount)) {
            return Err(TokenConfigError::InvalidAmount(amount));
        }

        if currency.eq_ignore_ascii_case(NATIVE_CURRENCY) {
            if issuer.is_some() {
                return Err(TokenConfigError::UnexpectedIssuer);
            }
            return Ok(Self::xrp(amount, method));
        }

        if !is_valid_currency_code(currency) {
            return Err(TokenConfigError::InvalidCurrency(currency.to_string()));
        }

        let issuer = issuer.ok_or_else(|| TokenConfigError::MissingIssuer(currency.to_string()))?;
        if !is_valid_address(issuer) {
            return Err(TokenConfigError::InvalidIssuer(issuer.to_string()));
        }

        let currency = if currency.len() == HEX_CODE_LEN {
            currency.to_ascii_uppercase()
        } else {
            currency.to_string()
        };

        Ok(Self {
            currency,
            issuer: Some(issuer.to_string()),
            amount,
            method,
        })
    }

    pub fn xrp(amount: f64, method: DistributionMethod) -> Self {
        Self {
            currency: NATIVE_CURRENCY.to_string(),
            issuer: None,
            amount,
            method,
        }
    }

    pub fn is_native(&self) -> bool {
        self.issuer.is_none()
    }

    /// Currency code as the ledger expects it: three-character codes pass
    /// through, 40-hex codes are uppercased, longer names are hex encoded and
    /// zero padded.
    pub fn ledger_currency_code(&self) -> String {
        match self.currency.len() {
            STANDARD_CODE_LEN => return self.currency.clone(),
            HEX_CODE_LEN => return self.currency.to_ascii_uppercase(),
            _ => {}
        }

        let mut code = hex::encode_upper(self.currency.as_bytes());
        code.extend(std::iter::repeat('0').take(HEX_CODE_LEN - code.len()));
        code
    }
}

fn is_valid_currency_code(code: &str) -> bool {
    match code.len() {
        STANDARD_CODE_LEN => {
            code.bytes().all(|b| b.is_ascii_alphanumeric())
                && !code.eq_ignore_ascii_case(NATIVE_CURRENCY)
        }
        HEX_CODE_LEN => code.bytes().all(|b| b.is_ascii_hexdigit()),
        len if len > STANDARD_CODE_LEN && len <= MAX_NAMED_CODE_LEN => {
            code.bytes().all(|b| b.is_ascii_graphic())
        }
        _ => false,
    }
}

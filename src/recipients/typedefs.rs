use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recipient {
    pub address: String,
    /// Multiplier for the base amount, only read by proportional distribution.
    pub count: Option<f64>,
    /// Explicit amount, only read by custom distribution.
    pub amount: Option<f64>,
    pub is_valid: bool,
}

impl Recipient {
    /// A recipient read from a plain address list.
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            count: Some(1.0),
            amount: None,
            is_valid: true,
        }
    }

    /// A recipient entered by hand, without any distribution values.
    pub fn bare(address: &str) -> Self {
        Self {
            address: address.to_string(),
            count: None,
            amount: None,
            is_valid: true,
        }
    }

    pub fn with_count(address: &str, count: f64) -> Self {
        Self {
            count: Some(count),
            ..Self::bare(address)
        }
    }

    pub fn with_amount(address: &str, amount: f64) -> Self {
        Self {
            count: Some(1.0),
            amount: Some(amount),
            ..Self::bare(address)
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedRecipients {
    pub recipients: Vec<Recipient>,
    /// Set when a plain TXT list was loaded for a method that needs a value per
    /// address; the values have to be collected before a preview is possible.
    pub needs_individual_values: bool,
}

impl ParsedRecipients {
    pub fn ready(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients,
            needs_individual_values: false,
        }
    }

    pub fn awaiting_values(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients,
            needs_individual_values: true,
        }
    }
}

use thiserror::Error;

use crate::distribution::typedefs::DistributionMethod;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file contains no recipients")]
    Empty,

    #[error("CSV file must have at least a header and one data row")]
    NoDataRows,

    #[error("CSV header is missing the \"{column}\" column required for {method} distribution")]
    MissingColumn {
        column: &'static str,
        method: DistributionMethod,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipientError {
    #[error("invalid XRPL address: {0}")]
    InvalidAddress(String),

    #[error("{0} is already in the recipients list")]
    Duplicate(String),

    #[error("too many recipients: {count} exceeds the limit of {limit}")]
    TooMany { count: usize, limit: usize },
}

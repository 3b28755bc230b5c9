use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMethod {
    /// Every recipient receives the base amount.
    #[default]
    Equal,
    /// Every recipient receives `base amount * count`.
    Proportional,
    /// Every recipient receives its own explicit amount.
    Custom,
}

impl DistributionMethod {
    pub const ALL: [DistributionMethod; 3] = [Self::Equal, Self::Proportional, Self::Custom];

    /// Whether the amount per recipient is derived from the configured base amount.
    pub fn uses_base_amount(self) -> bool {
        matches!(self, Self::Equal | Self::Proportional)
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "equal",
            Self::Proportional => "proportional",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Txt,
    Csv,
}

impl FileFormat {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Txt,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Txt => f.write_str("txt"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricedRecipient {
    pub address: String,
    pub count: f64,
    pub amount: f64,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Preview {
    pub entries: Vec<PricedRecipient>,
    pub total_count: f64,
    pub total_amount: f64,
}

impl Preview {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

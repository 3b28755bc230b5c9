use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};

use crate::{
    distribution::token::TokenConfig, onchain::typedefs::Network, utils::files::write_into_dir,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Txt,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Csv, Self::Json, Self::Txt];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Txt => "text/plain",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// Session details stamped into every report.
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    pub network: Network,
    pub token: Option<&'a TokenConfig>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportedFile {
    pub async fn save(&self, dir: impl AsRef<Path>) -> eyre::Result<PathBuf> {
        write_into_dir(dir, &self.filename, &self.content).await
    }
}

use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

/// Whole file as text, without a leading byte order mark.
pub async fn read_text(path: impl AsRef<Path>) -> eyre::Result<String> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .inspect_err(|e| tracing::error!("Failed to read `{}`: {e}", path.display()))?;

    Ok(match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

pub async fn write_into_dir(
    dir: impl AsRef<Path>,
    filename: &str,
    content: &str,
) -> eyre::Result<PathBuf> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(filename);
    tokio::fs::write(&path, content).await?;

    Ok(path)
}

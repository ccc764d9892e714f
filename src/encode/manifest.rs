use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TimelapseError, TimelapseResult};

/// File name of the frame manifest written beside the input images.
pub const MANIFEST_FILE_NAME: &str = "FileNames.txt";

/// Write `images` to `manifest_path`, one path per line, replacing any previous manifest.
///
/// Lines are joined with `\n` and the file has no trailing newline. Paths are written as given;
/// callers that run the encoder from another directory should pass absolute paths.
pub fn write_manifest(manifest_path: &Path, images: &[PathBuf]) -> TimelapseResult<()> {
    let lines = images
        .iter()
        .map(|p| {
            p.to_str().ok_or_else(|| {
                TimelapseError::validation(format!(
                    "image path '{}' is not valid UTF-8",
                    p.display()
                ))
            })
        })
        .collect::<TimelapseResult<Vec<_>>>()?;

    match std::fs::remove_file(manifest_path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!(
                    "failed to remove old manifest '{}'",
                    manifest_path.display()
                ))
                .into());
        }
    }

    std::fs::write(manifest_path, lines.join("\n"))
        .with_context(|| format!("failed to write manifest '{}'", manifest_path.display()))?;
    tracing::debug!(path = %manifest_path.display(), frames = images.len(), "wrote frame manifest");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/manifest.rs"]
mod tests;

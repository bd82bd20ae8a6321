//! One-shot image hand-off

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

static CLAIMS: AtomicU64 = AtomicU64::new(0);

/// Take the image at `path` as a data URI, deleting the file.
///
/// The file is renamed before it is read, so concurrent callers cannot both
/// receive it. Returns `None` when there is no image. An image that cannot
/// be read is put back in place.
pub async fn take_image(path: &Path) -> std::io::Result<Option<String>> {
    let claimed = claim_path(path);
    match tokio::fs::rename(path, &claimed).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    }

    let bytes = match tokio::fs::read(&claimed).await {
        Ok(bytes) => bytes,
        Err(e) => {
            if let Err(restore) = tokio::fs::rename(&claimed, path).await {
                warn!("Could not restore {}: {}", claimed.display(), restore);
            }
            return Err(e);
        }
    };
    if let Err(e) = tokio::fs::remove_file(&claimed).await {
        warn!("Could not remove {}: {}", claimed.display(), e);
    }

    Ok(Some(format!("data:image/png;base64,{}", STANDARD.encode(bytes))))
}

fn claim_path(path: &Path) -> PathBuf {
    let n = CLAIMS.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}-{}.claimed", name, std::process::id(), n))
}

// FICHIER : src-core/src/utils/fs.rs

use crate::utils::{json, VitrineResult};
use crate::vitrine_error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};

/// Crée récursivement un répertoire.
pub async fn create_dir_all(path: impl AsRef<Path>) -> VitrineResult<()> {
    let p = path.as_ref();
    if let Err(e) = tokio::fs::create_dir_all(p).await {
        vitrine_error!(
            "ERR_FS_CREATE_DIR",
            error = e,
            context = json::json!({ "path": p.to_string_lossy() })
        );
    }
    Ok(())
}

pub async fn exists(path: impl AsRef<Path>) -> bool {
    tokio::fs::try_exists(path.as_ref()).await.unwrap_or(false)
}

pub async fn read(path: impl AsRef<Path>) -> VitrineResult<Vec<u8>> {
    let p = path.as_ref();
    match tokio::fs::read(p).await {
        Ok(bytes) => Ok(bytes),
        Err(e) => vitrine_error!(
            "ERR_FS_READ",
            error = e,
            context = json::json!({ "path": p.to_string_lossy() })
        ),
    }
}

pub async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> VitrineResult<()> {
    let p = path.as_ref();
    if let Some(parent) = p.parent() {
        create_dir_all(parent).await?;
    }
    if let Err(e) = tokio::fs::write(p, contents).await {
        vitrine_error!(
            "ERR_FS_WRITE",
            error = e,
            context = json::json!({ "path": p.to_string_lossy() })
        );
    }
    Ok(())
}

/// Lit et désérialise un fichier JSON.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> VitrineResult<T> {
    let bytes = read(path.as_ref()).await?;
    match serde_json::from_slice(&bytes) {
        Ok(v) => Ok(v),
        Err(e) => vitrine_error!(
            "ERR_FS_JSON_DECODE",
            error = e,
            context = json::json!({ "path": path.as_ref().to_string_lossy() })
        ),
    }
}

/// Écriture atomique : fichier temporaire voisin puis renommage.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_json_atomic<T: Serialize>(path: impl AsRef<Path>, value: &T) -> VitrineResult<()> {
    let p = path.as_ref();
    let content = json::stringify_pretty(value)?;

    let tmp = p.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    write(&tmp, content.as_bytes()).await?;

    if let Err(e) = tokio::fs::rename(&tmp, p).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        vitrine_error!(
            "ERR_FS_RENAME",
            error = e,
            context = json::json!({ "from": tmp.to_string_lossy(), "to": p.to_string_lossy() })
        );
    }
    Ok(())
}

/// Supprime un fichier ; l'absence du fichier n'est pas une erreur.
pub async fn remove_file(path: impl AsRef<Path>) -> VitrineResult<()> {
    let p = path.as_ref();
    match tokio::fs::remove_file(p).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => vitrine_error!(
            "ERR_FS_REMOVE",
            error = e,
            context = json::json!({ "path": p.to_string_lossy() })
        ),
    }
}

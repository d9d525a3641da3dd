//! Key-value blob storage behind cinematic persistence.
//!
//! The host owns durable storage (a world database, a save directory); the
//! library only needs string blobs under string keys. `MemoryStore` serves
//! tests and transient hosts, `FileStore` keeps one file per blob with
//! atomic writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::StoreResult;

/// String key-value blob storage.
pub trait BlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// In-memory store for tests and transient embedding hosts.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.blobs.remove(key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.blobs.keys().cloned().collect())
    }
}

/// One `<encoded-key>.json` file per blob under a root directory.
///
/// Writes are atomic: data lands in a temporary file first, then is renamed
/// over the target, so an interrupted write never leaves a torn blob.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        std::fs::write(&temp_path, value.as_bytes()).map_err(|e| {
            error!(path = %temp_path.display(), error = %e, "Failed to write temp blob");
            e
        })?;

        std::fs::rename(&temp_path, &path).map_err(|e| {
            // Clean up the temp file if the rename failed.
            let _ = std::fs::remove_file(&temp_path);
            error!(
                from = %temp_path.display(),
                to = %path.display(),
                error = %e,
                "Failed to rename temp blob to target"
            );
            e
        })?;

        debug!(key, path = %path.display(), bytes = value.len(), "Blob written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name.strip_suffix(".json") {
                keys.push(decode_key(stem));
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Encode a blob key into a portable file name: alphanumerics, `-`, `_`,
/// and `.` pass through, everything else becomes `%XX`.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        let c = byte as char;
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
            out.push(c);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn decode_key(encoded: &str) -> String {
    let mut out = Vec::with_capacity(encoded.len());
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(hex) = encoded.get(i + 1..i + 3) {
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

//! JSON document persistence
//!
//! Features:
//! - Typed errors separating "nothing saved yet" from a corrupt document
//! - Atomic writes (tmp file, then rename over the old document)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no document at {}", .0.display())]
    NotFound(PathBuf),
    #[error("malformed document at {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode document for {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            PersistError::NotFound(path.to_path_buf())
        } else {
            PersistError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Read and deserialize a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` and replace the document at `path`
///
/// Writes to a sibling `.tmp` file first so a crash mid-write never leaves a
/// truncated document behind.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = tmp_path(path);
    let write = || -> io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    };
    write().map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Unique scratch file paths for tests
#[cfg(test)]
pub(crate) fn scratch_path(tag: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("flappy-plane-{}-{}-{}.json", tag, std::process::id(), n))
}

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::foundation::error::WeaveResult;

/// Minimal reload-durable key/value storage.
///
/// Keeps persisted client fields apart from the logic that uses them, so the
/// backing mechanism can change without touching the quota rules.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> WeaveResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> WeaveResult<()>;
    fn remove(&mut self, key: &str) -> WeaveResult<()>;
}

/// Process-lifetime storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> WeaveResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> WeaveResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> WeaveResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change.
///
/// Writes go to a sibling temp file and are renamed over the target. A
/// missing or unparseable file reads as empty.
#[derive(Clone, Debug)]
pub struct FileKv {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileKv {
    pub fn open(path: impl Into<PathBuf>) -> WeaveResult<Self> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                // Overwritten on the next write.
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable state file, starting empty"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> WeaveResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&self.entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> WeaveResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> WeaveResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> WeaveResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quota/kv.rs"]
mod tests;

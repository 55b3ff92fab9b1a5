//! Template source access
//!
//! The catalog never touches storage directly; it reads template bytes
//! through the [`SourceReader`] trait. This keeps the engine host-agnostic:
//! sources can come from disk, from an in-memory store registered by the
//! host, or from whatever resource system the embedding application uses.

use std::io;

use dashmap::DashMap;

/// Supplies raw template bytes for a source path.
///
/// A read failure is permanent for that source: the catalog reports it once
/// and never retries.
pub trait SourceReader: Send + Sync {
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Reads template sources from the local filesystem.
pub struct OsSourceReader;

impl SourceReader for OsSourceReader {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory source store for hosts that register template bytes directly,
/// and for tests.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: DashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register template bytes under a source path, replacing any previous
    /// registration.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }
}

impl SourceReader for MemorySource {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files.get(path).map(|entry| entry.clone()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no template source registered for '{path}'"),
            )
        })
    }
}

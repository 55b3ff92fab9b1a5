//! Virtual file bridge
//!
//! Serves cached artifact bytes as read-only, seekable file handles, so
//! consumers that expect a file-like object can load artifacts without any
//! physical storage behind them. The bridge is a predicate plus a byte-source
//! lookup: a path that does not carry the artifact extension is declined
//! immediately, leaving real file access (or any other handler) free to take
//! over.

use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

use tracing::warn;

use crate::catalog::Catalog;
use crate::error::EngineError;

/// The boundary component exposing the catalog's cache as virtual files.
pub struct VirtualFiles {
    catalog: Arc<Catalog>,
    suffix: String,
}

impl VirtualFiles {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let suffix = catalog.config().suffix();
        Self { catalog, suffix }
    }

    /// Whether a path is even a candidate for this bridge.
    pub fn serves(&self, path: &str) -> bool {
        path.ends_with(&self.suffix)
    }

    /// Open a handle over the cached bytes for an artifact path.
    ///
    /// Declines (`None`) for any path lacking the artifact extension.
    /// Declines with a diagnostic for a matching path that was never
    /// constructed; requesting such a path is a caller defect, since
    /// artifact paths only ever come out of the catalog.
    pub fn try_open(&self, path: &str) -> Option<ArtifactFile> {
        if !self.serves(path) {
            return None;
        }
        match self.catalog.data_for(path) {
            Some(data) => Some(ArtifactFile { data, pos: 0 }),
            None => {
                let err = EngineError::UnknownArtifact(path.to_string());
                warn!(error = %err, "declining virtual file request");
                None
            }
        }
    }
}

/// A read-only, seekable handle over one cached artifact buffer.
///
/// The handle shares the catalog's buffer; it never copies it. The shared
/// buffer stays alive for as long as any handle does, even across
/// [`Catalog::clear`], though a cleared artifact is no longer served to new
/// `try_open` calls.
pub struct ArtifactFile {
    data: Arc<[u8]>,
    pos: usize,
}

impl ArtifactFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read up to `max` bytes from the current position, advancing it.
    /// Returns an empty slice at or past the end of the buffer.
    pub fn read_bytes(&mut self, max: usize) -> &[u8] {
        let start = self.pos.min(self.data.len());
        let end = start.saturating_add(max).min(self.data.len());
        self.pos = end;
        &self.data[start..end]
    }

    /// Reposition the handle. Succeeds only for `0 <= offset < len`: an
    /// exact-end seek is rejected, so end-of-file is reachable only by
    /// exhausting reads.
    pub fn seek_to(&mut self, offset: usize) -> bool {
        if offset < self.data.len() {
            self.pos = offset;
            true
        } else {
            false
        }
    }
}

impl Read for ArtifactFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = self.read_bytes(buf.len());
        let n = bytes.len();
        buf[..n].copy_from_slice(bytes);
        Ok(n)
    }
}

impl Seek for ArtifactFile {
    /// Same boundary policy as [`seek_to`](Self::seek_to): any target at or
    /// past the end of the buffer is an error.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.data.len() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
            SeekFrom::End(delta) => len.saturating_add(delta),
            SeekFrom::Current(delta) => (self.pos as i64).saturating_add(delta),
        };
        if target < 0 || target >= len {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek target {target} outside artifact of {len} byte(s)"),
            ));
        }
        self.pos = target as usize;
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::MemorySource;

    fn bridge_with_artifact() -> (VirtualFiles, String) {
        let source = MemorySource::new();
        source.insert("button.svg", "<svg>{{color}}</svg>");
        let catalog = Arc::new(Catalog::new(Arc::new(source)));
        let path = catalog
            .resolve_artifact("button.svg", &["red"])
            .expect("should resolve");
        (VirtualFiles::new(catalog), path)
    }

    #[test]
    fn test_try_open_serves_constructed_artifact() {
        let (bridge, path) = bridge_with_artifact();
        let mut file = bridge.try_open(&path).expect("cached artifact");
        assert_eq!(file.len(), b"<svg>red</svg>".len());
        assert_eq!(file.read_bytes(4), b"<svg");
    }

    #[test]
    fn test_try_open_declines_wrong_extension() {
        let (bridge, _) = bridge_with_artifact();
        assert!(!bridge.serves("/0-red.png"));
        assert!(bridge.try_open("/0-red.png").is_none());
    }

    #[test]
    fn test_try_open_declines_unknown_artifact() {
        let (bridge, _) = bridge_with_artifact();
        assert!(bridge.try_open("/0-blue.svgt").is_none());
    }

    #[test]
    fn test_read_is_bounded_by_buffer_end() {
        let (bridge, path) = bridge_with_artifact();
        let mut file = bridge.try_open(&path).expect("cached artifact");
        let all = file.read_bytes(1024).to_vec();
        assert_eq!(all, b"<svg>red</svg>".to_vec());
        assert_eq!(file.read_bytes(1), b"");
    }

    #[test]
    fn test_seek_rejects_end_and_beyond() {
        let (bridge, path) = bridge_with_artifact();
        let mut file = bridge.try_open(&path).expect("cached artifact");
        let len = file.len();
        assert!(file.seek_to(0));
        assert!(file.seek_to(len - 1));
        assert!(!file.seek_to(len));
        assert!(!file.seek_to(len + 10));
        // Rejected seeks leave the position untouched.
        assert_eq!(file.position(), len - 1);
    }

    #[test]
    fn test_seek_then_read() {
        let (bridge, path) = bridge_with_artifact();
        let mut file = bridge.try_open(&path).expect("cached artifact");
        assert!(file.seek_to(5));
        assert_eq!(file.read_bytes(3), b"red");
    }

    #[test]
    fn test_io_read_trait_interop() {
        let (bridge, path) = bridge_with_artifact();
        let mut file = bridge.try_open(&path).expect("cached artifact");
        let mut out = String::new();
        file.read_to_string(&mut out).expect("valid utf-8");
        assert_eq!(out, "<svg>red</svg>");
    }

    #[test]
    fn test_io_seek_trait_uses_same_boundary_policy() {
        let (bridge, path) = bridge_with_artifact();
        let mut file = bridge.try_open(&path).expect("cached artifact");
        assert_eq!(file.seek(SeekFrom::Start(5)).expect("in range"), 5);
        assert!(file.seek(SeekFrom::End(0)).is_err());
        assert!(file.seek(SeekFrom::Current(-100)).is_err());
    }

    #[test]
    fn test_handle_survives_clear() {
        let source = MemorySource::new();
        source.insert("button.svg", "<svg>{{color}}</svg>");
        let catalog = Arc::new(Catalog::new(Arc::new(source)));
        let path = catalog
            .resolve_artifact("button.svg", &["red"])
            .expect("should resolve");
        let bridge = VirtualFiles::new(catalog.clone());

        let mut file = bridge.try_open(&path).expect("cached artifact");
        catalog.clear();
        // The shared buffer outlives the cache entry, but new opens decline.
        assert_eq!(file.read_bytes(4), b"<svg");
        assert!(bridge.try_open(&path).is_none());
    }
}

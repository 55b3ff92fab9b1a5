//! Template catalog and constructed-artifact cache
//!
//! The catalog owns everything with a lifetime: parsed templates, the
//! identifier registry that names them, and the cache of constructed
//! artifact bytes. Callers hold plain values only (source paths, identifier
//! strings, artifact paths) plus shared handles to immutable byte buffers,
//! so nothing can dangle.
//!
//! Each template source is parsed exactly once. Each distinct binding of
//! placeholder values is constructed at most once; its output is memoized
//! under an artifact path that encodes the template identity and the exact
//! sanitized values used, which makes the path itself the cache key.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, error};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::source::SourceReader;
use crate::template::Template;

/// Assigns each distinct template source path a stable compact identifier.
///
/// Identifiers are a monotonically increasing counter rendered in lowercase
/// hex: the first path seen gets `"0"`. An identifier is never reused or
/// reassigned, and allocation is atomic under concurrent access.
#[derive(Debug, Default)]
pub struct IdRegistry {
    ids: DashMap<String, u32>,
    next: AtomicU32,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier for a source path, allocating one on first sight.
    pub fn id_for(&self, source_path: &str) -> String {
        let id = *self
            .ids
            .entry(source_path.to_string())
            .or_insert_with(|| self.next.fetch_add(1, Ordering::Relaxed));
        format!("{id:x}")
    }

    /// The identifier for a source path, without allocating one.
    pub fn get(&self, source_path: &str) -> Option<String> {
        self.ids.get(source_path).map(|id| format!("{:x}", *id))
    }
}

/// Owns parsed templates and the constructed-artifact cache.
///
/// All maps are concurrent: readers never block each other, and racing
/// first-writers for the same key may redundantly compute but deduplicate on
/// insert, so a buffer is either absent or complete, never partial.
pub struct Catalog {
    reader: Arc<dyn SourceReader>,
    config: EngineConfig,
    ids: IdRegistry,
    templates: DashMap<String, Arc<Template>>,
    cache: DashMap<String, Arc<[u8]>>,
}

impl Catalog {
    /// Create a catalog over a source reader with the default configuration.
    pub fn new(reader: Arc<dyn SourceReader>) -> Self {
        Self::with_config(reader, EngineConfig::default())
    }

    /// Create a catalog with a custom configuration.
    pub fn with_config(reader: Arc<dyn SourceReader>, config: EngineConfig) -> Self {
        Self {
            reader,
            config,
            ids: IdRegistry::new(),
            templates: DashMap::new(),
            cache: DashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the template for a source path, parsing it on first request.
    ///
    /// An unreadable source is reported as [`EngineError::SourceUnreadable`]
    /// and permanently replaced by an empty template, so later callers get
    /// empty output instead of repeated read attempts.
    pub fn template(&self, source_path: &str) -> Result<Arc<Template>, EngineError> {
        let id = self.ids.id_for(source_path);
        if let Some(template) = self.templates.get(&id) {
            return Ok(template.clone());
        }

        // Read and parse outside the map entry so the lock is never held
        // across I/O. A racing caller may parse redundantly; the first
        // insert wins and both observe the same template afterwards.
        match self.reader.read(source_path) {
            Ok(bytes) => {
                let parsed = Arc::new(Template::new(&bytes));
                let template = self.templates.entry(id).or_insert(parsed).clone();
                Ok(template)
            }
            Err(err) => {
                error!(source = source_path, error = %err, "template source unreadable");
                self.templates
                    .entry(id)
                    .or_insert_with(|| Arc::new(Template::empty()));
                Err(EngineError::SourceUnreadable {
                    path: source_path.to_string(),
                    source: err,
                })
            }
        }
    }

    /// The placeholder names the template for `source_path` requires, in
    /// occurrence order.
    ///
    /// Fails with [`EngineError::UnknownTemplate`] if the source was never
    /// resolved through [`template`](Self::template) or
    /// [`resolve_artifact`](Self::resolve_artifact) first.
    pub fn required_properties(&self, source_path: &str) -> Result<Vec<String>, EngineError> {
        self.ids
            .get(source_path)
            .and_then(|id| self.templates.get(&id).map(|t| t.required().to_vec()))
            .ok_or_else(|| EngineError::UnknownTemplate(source_path.to_string()))
    }

    /// Construct (or reuse) the artifact for a source path and an ordered
    /// value sequence, returning its artifact path.
    ///
    /// The path encodes the template identifier and every supplied value
    /// after sanitization; requesting the same values again returns the same
    /// path without re-running substitution. A failed construction leaves no
    /// cache entry.
    pub fn resolve_artifact<V: AsRef<str>>(
        &self,
        source_path: &str,
        values: &[V],
    ) -> Result<String, EngineError> {
        let template = self.template(source_path)?;
        let id = self.ids.id_for(source_path);
        let artifact_path = self.artifact_path(&id, values);

        if self.cache.contains_key(&artifact_path) {
            return Ok(artifact_path);
        }

        let byte_values: Vec<&[u8]> = values.iter().map(|v| v.as_ref().as_bytes()).collect();
        let bytes = template.construct(&byte_values)?;
        debug!(
            source = source_path,
            artifact = %artifact_path,
            len = bytes.len(),
            "constructed artifact"
        );
        self.cache
            .entry(artifact_path.clone())
            .or_insert_with(|| Arc::from(bytes));
        Ok(artifact_path)
    }

    /// Read-only cache lookup by artifact path.
    pub fn data_for(&self, artifact_path: &str) -> Option<Arc<[u8]>> {
        self.cache.get(artifact_path).map(|entry| entry.clone())
    }

    /// Drop every constructed artifact. Templates and identifiers survive;
    /// only artifacts derived from now-stale values are discarded. Callers
    /// must not hold open virtual-file handles across a clear.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// `"/" + id + ("-" + sanitized_value)* + "." + extension`
    fn artifact_path<V: AsRef<str>>(&self, id: &str, values: &[V]) -> String {
        let mut path = String::with_capacity(8 + id.len() + values.len() * 8);
        path.push('/');
        path.push_str(id);
        for value in values {
            path.push('-');
            path.push_str(&self.config.sanitize(value.as_ref()));
        }
        path.push('.');
        path.push_str(&self.config.extension);
        path
    }
}

//! Error types for the template engine
//!
//! Every variant is recoverable at the catalog or bridge boundary: callers
//! get a failed result plus a diagnostic, never a panic. A missing artifact
//! degrades to "no destination available" for the surrounding application.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Template source could not be read. Permanent for that source until
    /// process restart; the catalog never retries.
    #[error("failed to read template source '{path}': {source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Fewer values were supplied than the template has placeholder
    /// occurrences. Construction is aborted with no partial output and no
    /// cache entry.
    #[error("missing binding: {supplied} value(s) supplied, template has {required} placeholder(s)")]
    MissingBinding { required: usize, supplied: usize },

    /// An artifact path was requested that was never constructed. A caller
    /// defect, not a normal runtime condition.
    #[error("no cached artifact for '{0}'")]
    UnknownArtifact(String),

    /// Required properties were requested for a source that was never
    /// parsed.
    #[error("no parsed template for source '{0}'")]
    UnknownTemplate(String),
}

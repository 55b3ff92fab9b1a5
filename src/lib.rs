//! svgt-engine - placeholder templates served as virtual files
//!
//! This library compiles small byte templates containing `{{name}}`
//! placeholders into concrete artifacts, and serves those artifacts through
//! a virtual-file lookup keyed by a deterministic path that encodes the
//! placeholder values used. Nothing ever touches physical storage on the
//! output side: constructed bytes live in an in-memory cache for the life of
//! the catalog, and consumers read them through file-like handles.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use svgt_engine::{Catalog, MemorySource, VirtualFiles};
//!
//! let sources = Arc::new(MemorySource::new());
//! sources.insert("button.svg", "<svg>{{color}}</svg>");
//!
//! let catalog = Arc::new(Catalog::new(sources));
//! let path = catalog.resolve_artifact("button.svg", &["red"]).unwrap();
//! assert_eq!(path, "/0-red.svgt");
//!
//! let files = VirtualFiles::new(catalog);
//! let mut file = files.try_open(&path).unwrap();
//! assert_eq!(file.read_bytes(4), b"<svg");
//! ```
//!
//! # Pipeline
//!
//! A template source path gets a compact stable identifier on first sight;
//! the catalog reads and parses the source once, into an ordered sequence of
//! literal and placeholder chunks. Each request then supplies one value per
//! placeholder occurrence; the catalog substitutes them, memoizes the result
//! under `"/" + id + ("-" + value)* + ".svgt"`, and hands that path back.
//! Any consumer presenting the exact path to [`VirtualFiles::try_open`] gets
//! a read-only, seekable view of the cached bytes.

pub mod catalog;
pub mod config;
pub mod error;
pub mod parser;
pub mod source;
pub mod template;
pub mod vfs;

pub use catalog::{Catalog, IdRegistry};
pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use parser::{parse, Chunk};
pub use source::{MemorySource, OsSourceReader, SourceReader};
pub use template::Template;
pub use vfs::{ArtifactFile, VirtualFiles};

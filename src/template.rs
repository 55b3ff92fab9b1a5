//! Parsed templates and artifact construction
//!
//! A [`Template`] owns the chunk sequence produced by the parser together
//! with the ordered list of placeholder names it needs filled in. Templates
//! are parsed once per source and immutable afterwards; construction is a
//! pure walk over the chunks.

use crate::error::EngineError;
use crate::parser::{parse, Chunk};

/// A parsed template: an ordered chunk sequence plus the placeholder names
/// it requires, one entry per occurrence in source order.
#[derive(Debug, Clone)]
pub struct Template {
    chunks: Vec<Chunk>,
    required: Vec<String>,
}

impl Template {
    /// Parse raw template bytes into a template.
    pub fn new(raw: &[u8]) -> Self {
        let chunks = parse(raw);
        let required = chunks
            .iter()
            .filter_map(|chunk| match chunk {
                Chunk::Placeholder(name) => Some(name.clone()),
                Chunk::Literal(_) => None,
            })
            .collect();
        Self { chunks, required }
    }

    /// A template with no chunks at all. Constructing it yields empty output.
    /// Used as the permanent stand-in for a source that could not be read.
    pub fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            required: Vec::new(),
        }
    }

    /// The placeholder names this template needs, in occurrence order.
    /// A name repeated in the source appears once per occurrence.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// The parsed chunk sequence.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Materialize output bytes from this template and an ordered value
    /// sequence aligned with [`required`](Self::required): the i-th
    /// placeholder occurrence consumes `values[i]`, regardless of name.
    ///
    /// Fails with [`EngineError::MissingBinding`] if fewer values are
    /// supplied than there are placeholder occurrences. All-or-nothing: no
    /// partial output is ever returned.
    pub fn construct<V: AsRef<[u8]>>(&self, values: &[V]) -> Result<Vec<u8>, EngineError> {
        if values.len() < self.required.len() {
            return Err(EngineError::MissingBinding {
                required: self.required.len(),
                supplied: values.len(),
            });
        }

        let mut out = Vec::new();
        let mut slot = 0usize;
        for chunk in &self.chunks {
            match chunk {
                Chunk::Literal(bytes) => out.extend_from_slice(bytes),
                Chunk::Placeholder(_) => {
                    // Guarded by the length check above.
                    debug_assert!(slot < values.len());
                    let Some(value) = values.get(slot) else {
                        return Err(EngineError::MissingBinding {
                            required: self.required.len(),
                            supplied: values.len(),
                        });
                    };
                    out.extend_from_slice(value.as_ref());
                    slot += 1;
                }
            }
        }
        Ok(out)
    }
}

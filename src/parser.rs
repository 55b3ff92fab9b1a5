//! Placeholder-aware template parser
//!
//! Splits raw template bytes into an ordered sequence of [`Chunk`]s: literal
//! byte runs interleaved with named `{{name}}` placeholder slots.
//! Concatenating the chunks in order (with placeholders re-wrapped in their
//! markers) reconstructs the input byte-for-byte, which is what makes
//! substitution a pure walk over the sequence.
//!
//! This is deliberately not a templating language: no nesting, no
//! conditionals, no escapes. A stray `{{` with no matching `}}` is plain
//! literal text, and when two opens appear before a close the later one wins.

use memchr::memmem;

/// Open and close markers delimiting a placeholder name.
const OPEN_MARKER: &[u8] = b"{{";
const CLOSE_MARKER: &[u8] = b"}}";

/// Shortest input worth scanning: one complete `{{x}}` unit is five bytes,
/// so anything shorter is emitted as a single literal without scanning.
const MIN_SCAN_LEN: usize = 5;

/// One unit of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Verbatim bytes copied through to the output unchanged.
    Literal(Vec<u8>),
    /// A named substitution slot, delimited by `{{` and `}}` in the source.
    Placeholder(String),
}

/// Parse raw template bytes into an ordered chunk sequence.
///
/// Pure and deterministic: identical input always yields an identical
/// sequence. Empty input yields an empty sequence.
pub fn parse(raw: &[u8]) -> Vec<Chunk> {
    if raw.is_empty() {
        return Vec::new();
    }
    if raw.len() < MIN_SCAN_LEN {
        return vec![Chunk::Literal(raw.to_vec())];
    }

    let open = memmem::Finder::new(OPEN_MARKER);
    let close = memmem::Finder::new(CLOSE_MARKER);

    let mut chunks = Vec::new();
    let mut beg = 0usize;
    let mut open_brace: Option<usize> = None;
    let mut pos = 0usize;

    while pos < raw.len() {
        let next_open = open.find(&raw[pos..]).map(|i| pos + i);
        let next_close = close.find(&raw[pos..]).map(|i| pos + i);

        match (next_open, next_close) {
            // Another open before the next close: it supersedes any pending one.
            (Some(o), Some(c)) if o < c => {
                open_brace = Some(o);
                pos = o + OPEN_MARKER.len();
            }
            // An open with no close anywhere ahead: everything from `beg` on
            // is trailing literal, including the unmatched marker.
            (Some(_), None) => break,
            (_, Some(c)) => match open_brace.take() {
                Some(o) => {
                    if o > beg {
                        chunks.push(Chunk::Literal(raw[beg..o].to_vec()));
                    }
                    let name = &raw[o + OPEN_MARKER.len()..c];
                    chunks.push(Chunk::Placeholder(
                        String::from_utf8_lossy(name).into_owned(),
                    ));
                    pos = c + CLOSE_MARKER.len();
                    beg = pos;
                }
                // A close with no pending open is literal text.
                None => pos = c + CLOSE_MARKER.len(),
            },
            (None, None) => break,
        }
    }

    if beg < raw.len() {
        chunks.push(Chunk::Literal(raw[beg..].to_vec()));
    }

    chunks
}

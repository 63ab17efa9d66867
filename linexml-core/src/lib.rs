//! linexml Core
//!
//! Streaming, line-oriented XML reader. Converts a sequence of text lines
//! into an in-memory element tree using per-line pattern matching instead
//! of a character-level tokenizer. Intended for simple, mostly well-formed
//! documents where each tag, its attributes, and its text sit on one line.
//!
//! Not a conformant XML parser: no multi-line tags, nested quotes, CDATA,
//! namespaces, entity references, processing instructions, or DTDs.
//!
//! # Architecture
//!
//! - **tree.rs** - arena-based element tree with parent back-references
//! - **pattern.rs** - compile-once line micro-grammar
//! - **parser.rs** - Initial/Parsing/Closed state machine and comment filter

pub mod parser;
pub mod pattern;
pub mod tree;

pub use parser::{Diagnostic, LineParser, ParseOutput};
pub use tree::{Attribute, Document, Node, NodeId, ParseState, ROOT_NAME};

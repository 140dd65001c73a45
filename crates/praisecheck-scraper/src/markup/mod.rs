//! Streaming markup tokenizer.
//!
//! Produces start-tag, end-tag, and text events from HTML fed in arbitrary
//! chunks, using `quick-xml` in its lenient HTML mode. No tree is built and
//! no nesting is enforced; consumers track whatever state they need from the
//! flat event stream.

mod lexer;

pub use lexer::MarkupLexer;

/// One lexical event from the markup stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// `<name a="b">`. Names are lowercase; attributes keep source order and
    /// have decoded values. A valueless attribute has an empty value.
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
    },
    /// `</name>`, or the implicit close of a self-closing `<name/>`.
    EndTag { name: String },
    /// Character data between tags, entity-decoded.
    Text(String),
}

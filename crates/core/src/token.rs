//! Token types produced by the text analyzer

use crate::types::Field;
use serde::{Deserialize, Serialize};

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Alphabetic (or mixed alphanumeric starting alphabetic) run
    Word,
    /// Pure digit run
    Number,
    /// Standalone symbol character
    Symbol,
    /// Whitespace run (tokenizers may elide these)
    Whitespace,
}

/// One token from one field of one document
///
/// `position` is the 0-based offset within the owning field's token
/// stream, not a byte offset into the raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Raw text as it appeared in the field
    pub text: String,
    /// Normalized form (lowercased, stripped, synonym-expanded)
    pub normalized: String,
    /// 0-based position in the field's token stream
    pub position: u32,
    /// Field this token came from
    pub field: Field,
    /// Lexical class
    pub kind: TokenKind,
}

impl Token {
    /// Create a token; `normalized` starts equal to `text` until the
    /// analyzer's normalization pass rewrites it.
    pub fn new(text: impl Into<String>, position: u32, field: Field, kind: TokenKind) -> Self {
        let text = text.into();
        Token {
            normalized: text.clone(),
            text,
            position,
            field,
            kind,
        }
    }
}

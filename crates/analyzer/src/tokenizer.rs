//! Field-aware tokenizer
//!
//! Splits raw field text into word, number, and symbol tokens. Whitespace
//! is consumed as a boundary and never emitted; `position` counts emitted
//! tokens only.

use crate::normalize::normalize;
use starsearch_core::{Field, Token, TokenKind};

/// Tokenize one field's raw text
///
/// Alphanumeric runs become `Word` tokens (`Number` when the run is all
/// digits); every other non-whitespace character is emitted as a
/// standalone `Symbol` token. Each token's `normalized` form is computed
/// immediately.
pub fn tokenize(text: &str, field: Field) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut position: u32 = 0;
    let mut run = String::new();

    let mut flush = |run: &mut String, tokens: &mut Vec<Token>, position: &mut u32| {
        if run.is_empty() {
            return;
        }
        let kind = if run.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Number
        } else {
            TokenKind::Word
        };
        let mut token = Token::new(run.clone(), *position, field, kind);
        token.normalized = normalize(&token.text);
        tokens.push(token);
        *position += 1;
        run.clear();
    };

    for c in text.chars() {
        if c.is_alphanumeric() {
            run.push(c);
        } else if c.is_whitespace() {
            flush(&mut run, &mut tokens, &mut position);
        } else {
            flush(&mut run, &mut tokens, &mut position);
            let mut token = Token::new(c.to_string(), position, field, TokenKind::Symbol);
            token.normalized = normalize(&token.text);
            tokens.push(token);
            position += 1;
        }
    }
    flush(&mut run, &mut tokens, &mut position);

    tokens
}

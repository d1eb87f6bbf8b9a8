//! Token stream — splitting the variable section into coherent parts
//!
//! A coherent part is either a 3-character identifier chunk or the lone
//! separator. Splicing may only relocate whole parts, so tokenize/assemble
//! must round-trip exactly.

use serde::{Deserialize, Serialize};

/// The reserved character delimiting sections and individual effects.
pub const SEPARATOR: char = '|';

/// Width of one identifier chunk.
pub const CHUNK_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// An identifier chunk (normally [`CHUNK_LEN`] characters)
    Chunk(String),
    Separator,
}

/// Split a variable-section string into tokens.
///
/// The scan is positional: a separator is consumed as a single token, any
/// other character starts a chunk of up to [`CHUNK_LEN`] characters. A short
/// tail chunk is emitted as-is so that [`assemble`] always reproduces the
/// input; proper chunk-boundary alignment is the caller's responsibility.
pub fn tokenize(s: &str) -> Vec<Token> {
    let chars: Vec<char> = s.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == SEPARATOR {
            tokens.push(Token::Separator);
            i += 1;
        } else {
            let end = (i + CHUNK_LEN).min(chars.len());
            tokens.push(Token::Chunk(chars[i..end].iter().collect()));
            i = end;
        }
    }
    tokens
}

/// Concatenate a token sequence back into a variable-section string.
pub fn assemble(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Chunk(text) => out.push_str(text),
            Token::Separator => out.push(SEPARATOR),
        }
    }
    out
}

/// Lenient preview of the effect section.
///
/// Skips the suppressant and carrier sections (everything up to the second
/// separator) and splits the rest into effect-candidate strings. Returns an
/// empty vec when fewer than two leading separators exist or when any
/// segment, the final one included, is empty. Advisory only, never a
/// substitute for a validation pass.
pub fn completed_effect_groups(tokens: &[Token]) -> Vec<String> {
    let mut separators_seen = 0;
    let mut groups = Vec::new();
    let mut current = String::new();
    for token in tokens {
        if separators_seen < 2 {
            if *token == Token::Separator {
                separators_seen += 1;
            }
            continue;
        }
        match token {
            Token::Chunk(text) => current.push_str(text),
            Token::Separator => groups.push(std::mem::take(&mut current)),
        }
    }
    if separators_seen < 2 {
        return Vec::new();
    }
    groups.push(current);
    if groups.iter().any(|g| g.is_empty()) {
        return Vec::new();
    }
    groups
}

//! Parser for the leading region of a C source file.
//!
//! The prologue grammar, every segment optional and tried in order:
//!
//! ```text
//! prologue  := if_zero? ws? comment? (ws? directive)* ws*
//! if_zero   := "#if 0" .*? ws "#endif" ws*
//! comment   := "/*" .*? "*/"
//! directive := "#pragma once" | <include line>
//! ```
//!
//! Pragmas are preserved (at most [`MAX_PRAGMAS`]); the include line and the
//! comment are dropped because stamping re-emits them.

/// Directive kept across stamping.
pub const PRAGMA_ONCE: &str = "#pragma once";

/// Number of pragma directives accepted in one prologue.
pub const MAX_PRAGMAS: usize = 2;

const IF_ZERO: &str = "#if 0";
const ENDIF: &str = "#endif";

/// The recognized prologue of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prologue<'a> {
    /// `#if 0 ... #endif` block including its trailing whitespace
    pub if_zero: Option<&'a str>,
    /// Pragma directives found in the prologue, in order
    pub pragmas: Vec<&'a str>,
    /// Byte offset of the first character after the prologue
    pub body_start: usize,
}

impl<'a> Prologue<'a> {
    /// Parses the prologue at the start of `text`.
    ///
    /// `include` is the include directive that belongs to the canonical header.
    pub fn parse(text: &'a str, include: &str) -> Self {
        let mut pos = 0;

        let if_zero = match_if_zero(text);
        if let Some(block) = if_zero {
            pos = block.len();
        }

        if let Some(end) = match_comment(text, pos) {
            pos = end;
        }

        let mut pragmas = Vec::new();
        loop {
            let start = skip_whitespace(text, pos);
            let rest = &text[start..];
            if rest.starts_with(PRAGMA_ONCE) && pragmas.len() < MAX_PRAGMAS {
                pragmas.push(&rest[..PRAGMA_ONCE.len()]);
                pos = start + PRAGMA_ONCE.len();
            } else if !include.is_empty() && rest.starts_with(include) {
                pos = start + include.len();
            } else {
                break;
            }
        }

        Prologue {
            if_zero,
            pragmas,
            body_start: skip_whitespace(text, pos),
        }
    }

    /// The text following the prologue.
    pub fn body(&self, text: &'a str) -> &'a str {
        &text[self.body_start..]
    }
}

fn skip_whitespace(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    pos + (rest.len() - rest.trim_start().len())
}

/// Matches `#if 0`, lazily up to the first `#endif` preceded by whitespace,
/// then any whitespace.
fn match_if_zero(text: &str) -> Option<&str> {
    if !text.starts_with(IF_ZERO) {
        return None;
    }

    let mut search = IF_ZERO.len();
    loop {
        let found = search + text[search..].find(ENDIF)?;
        let preceded_by_ws = text[..found]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if preceded_by_ws && found > IF_ZERO.len() {
            let end = skip_whitespace(text, found + ENDIF.len());
            return Some(&text[..end]);
        }
        search = found + ENDIF.len();
    }
}

/// Matches optional whitespace followed by a terminated block comment,
/// returning the offset just past `*/`.
fn match_comment(text: &str, pos: usize) -> Option<usize> {
    let start = skip_whitespace(text, pos);
    let rest = text[start..].strip_prefix("/*")?;
    let close = rest.find("*/")?;
    Some(start + 2 + close + 2)
}

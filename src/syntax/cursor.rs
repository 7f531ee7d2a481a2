//! Position-tracked, immutable view over source text.
//!
//! A [`Cursor`] borrows the whole source and carries a byte offset plus a
//! line/column [`Position`]. `advance` returns a *new* cursor; the receiver
//! is never touched. That invariant is what makes alternation safe: every
//! branch of a failed alternative saw the same starting cursor, so there is
//! no scanner state to restore.

use serde::Serialize;

/// Line/column pair, both zero-based. Consuming a newline increments the
/// line and resets the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    fn step(self, ch: char) -> Position {
        if ch == '\n' {
            Position {
                line: self.line + 1,
                column: 0,
            }
        } else {
            Position {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

/// Matched text plus the position where the match started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    pub pos: Position,
}

/// Immutable scanning state over one source string.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Cursor<'a> {
        Cursor {
            source,
            offset: 0,
            pos: Position::default(),
        }
    }

    /// True while any input remains.
    pub fn has_input(&self) -> bool {
        self.offset < self.source.len()
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// A new cursor `count` characters ahead (clamped to end of input).
    pub fn advance(&self, count: usize) -> Cursor<'a> {
        let mut offset = self.offset;
        let mut pos = self.pos;
        for ch in self.rest().chars().take(count) {
            offset += ch.len_utf8();
            pos = pos.step(ch);
        }
        Cursor {
            source: self.source,
            offset,
            pos,
        }
    }

    /// Reads `count` characters into a token starting at the current
    /// position, returning the token and the cursor past it.
    pub fn take(&self, count: usize) -> (Token, Cursor<'a>) {
        let text: String = self.rest().chars().take(count).collect();
        let token = Token {
            text,
            pos: self.pos,
        };
        (token, self.advance(count))
    }
}

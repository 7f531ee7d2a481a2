//! Token grammar and the scanning loop.
//!
//! One top-level alternation, tried in priority order: whitespace run,
//! brackets, floating-point, integer, quoted string, then the catch-all
//! symbol (a maximal run of characters that are neither brackets nor
//! whitespace - operator names and failed number parses all land here).
//! Floating-point must come before integer: integer is a strict prefix of
//! the float grammar and would otherwise shadow it.

use crate::syntax::combinators::{
    AnyOf, CharClass, Optional, Parse, ParseExt, QuotedString, Repeat, Sequence,
};
use crate::syntax::cursor::{Cursor, Token};

pub const WHITESPACE: &str = "whitespace";
pub const OPEN_BRACKET: &str = "open-bracket";
pub const CLOSE_BRACKET: &str = "close-bracket";
pub const FLOAT: &str = "float";
pub const INTEGER: &str = "integer";
pub const STRING: &str = "string";
pub const SYMBOL: &str = "symbol";

fn sign() -> CharClass {
    CharClass::matching(|c| c == '+' || c == '-')
}

fn digits() -> Repeat {
    Repeat::new(CharClass::matching(|c| c.is_ascii_digit()))
}

fn is_symbol_char(c: char) -> bool {
    !(c == '[' || c == ']' || c.is_whitespace())
}

/// Assembles the top-level token alternation.
fn token_grammar() -> AnyOf {
    let whitespace = Repeat::new(CharClass::matching(char::is_whitespace)).labeled(WHITESPACE);
    let open = CharClass::exact('[').labeled(OPEN_BRACKET);
    let close = CharClass::exact(']').labeled(CLOSE_BRACKET);
    let float = Sequence::new(vec![
        Box::new(Optional::new(sign())),
        Box::new(digits()),
        Box::new(CharClass::exact('.')),
        Box::new(digits()),
    ])
    .labeled(FLOAT);
    let integer = Sequence::new(vec![Box::new(Optional::new(sign())), Box::new(digits())])
        .labeled(INTEGER);
    let string = QuotedString.labeled(STRING);
    let symbol = Repeat::new(CharClass::matching(is_symbol_char)).labeled(SYMBOL);

    AnyOf::new(vec![
        Box::new(whitespace),
        Box::new(open),
        Box::new(close),
        Box::new(float),
        Box::new(integer),
        Box::new(string),
        Box::new(symbol),
    ])
}

/// Scans the whole source into a flat token stream, discarding whitespace.
///
/// Scanning stops silently at the first position the grammar cannot match
/// (trailing unrecognized input truncates the stream rather than erroring);
/// the strict [`crate::syntax::reader::validate`] path reports what this
/// loop tolerates.
pub fn tokenize(source: &str) -> Vec<Token> {
    let grammar = token_grammar();
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    while cursor.has_input() {
        let Some(out) = grammar.parse(cursor) else {
            break;
        };
        cursor = out.rest;
        if out.label != Some(WHITESPACE) {
            tokens.push(out.token);
        }
    }
    tokens
}

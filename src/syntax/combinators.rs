//! Primitive and composite text matchers built over [`Cursor`].
//!
//! Every parser exposes one operation: `parse(cursor)`, returning `Some`
//! with the matched token, the remainder cursor, and an optional label, or
//! `None` on no match. Failure is always absence; no parser panics or
//! raises. Because cursors are immutable values, an alternation can hand
//! the same starting cursor to each branch and needs no backtracking
//! machinery.

use crate::syntax::cursor::{Cursor, Token};

/// A successful match: the token, where scanning continues, and the label
/// of the [`Alias`] that produced it (used by the tokenizer to recognize
/// whitespace without inspecting parser internals).
pub struct ParseOutcome<'a> {
    pub token: Token,
    pub rest: Cursor<'a>,
    pub label: Option<&'static str>,
}

pub trait Parse {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>>;
}

/// Attaches a display/identity name to any parser.
pub trait ParseExt: Parse + Sized + 'static {
    fn labeled(self, name: &'static str) -> Alias {
        Alias {
            inner: Box::new(self),
            name,
        }
    }
}

impl<P: Parse + Sized + 'static> ParseExt for P {}

fn outcome<'a>(text: String, start: Cursor<'a>, rest: Cursor<'a>) -> Option<ParseOutcome<'a>> {
    Some(ParseOutcome {
        token: Token {
            text,
            pos: start.position(),
        },
        rest,
        label: None,
    })
}

/// Consumes exactly one character satisfying a predicate.
pub struct CharClass {
    pred: Box<dyn Fn(char) -> bool>,
}

impl CharClass {
    pub fn matching(pred: impl Fn(char) -> bool + 'static) -> CharClass {
        CharClass {
            pred: Box::new(pred),
        }
    }

    pub fn exact(expected: char) -> CharClass {
        CharClass::matching(move |ch| ch == expected)
    }
}

impl Parse for CharClass {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        let ch = cursor.peek().filter(|ch| (self.pred)(*ch))?;
        outcome(ch.to_string(), cursor, cursor.advance(1))
    }
}

/// Consumes a fixed literal string.
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Literal {
        Literal { text: text.into() }
    }
}

impl Parse for Literal {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        if cursor.has_input() && cursor.starts_with(&self.text) {
            let count = self.text.chars().count();
            outcome(self.text.clone(), cursor, cursor.advance(count))
        } else {
            None
        }
    }
}

/// Tries children in order; the first success wins. Every child sees the
/// same starting cursor.
pub struct AnyOf {
    parsers: Vec<Box<dyn Parse>>,
}

impl AnyOf {
    pub fn new(parsers: Vec<Box<dyn Parse>>) -> AnyOf {
        AnyOf { parsers }
    }
}

impl Parse for AnyOf {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        self.parsers.iter().find_map(|p| p.parse(cursor))
    }
}

/// Requires every child to succeed in order, each continuing from the
/// previous remainder. The match text is the concatenation; any child
/// failure fails the whole sequence with nothing consumed.
pub struct Sequence {
    parsers: Vec<Box<dyn Parse>>,
}

impl Sequence {
    pub fn new(parsers: Vec<Box<dyn Parse>>) -> Sequence {
        Sequence { parsers }
    }
}

impl Parse for Sequence {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        let mut rest = cursor;
        let mut text = String::new();
        for parser in &self.parsers {
            let out = parser.parse(rest)?;
            text.push_str(&out.token.text);
            rest = out.rest;
        }
        outcome(text, cursor, rest)
    }
}

/// Greedily matches the child as many times as possible, then accepts if
/// the repetition count satisfies a predicate (default: at least once).
pub struct Repeat {
    inner: Box<dyn Parse>,
    accept: Box<dyn Fn(usize) -> bool>,
}

impl Repeat {
    pub fn new(inner: impl Parse + 'static) -> Repeat {
        Repeat::satisfying(inner, |count| count > 0)
    }

    pub fn satisfying(inner: impl Parse + 'static, accept: impl Fn(usize) -> bool + 'static) -> Repeat {
        Repeat {
            inner: Box::new(inner),
            accept: Box::new(accept),
        }
    }
}

impl Parse for Repeat {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        let mut rest = cursor;
        let mut text = String::new();
        let mut count = 0;
        while rest.has_input() {
            let Some(out) = self.inner.parse(rest) else {
                break;
            };
            if out.token.text.is_empty() {
                break;
            }
            count += 1;
            text.push_str(&out.token.text);
            rest = out.rest;
        }
        if (self.accept)(count) {
            outcome(text, cursor, rest)
        } else {
            None
        }
    }
}

/// Always succeeds: the child's match, or an empty match at the same
/// position.
pub struct Optional {
    inner: Box<dyn Parse>,
}

impl Optional {
    pub fn new(inner: impl Parse + 'static) -> Optional {
        Optional {
            inner: Box::new(inner),
        }
    }
}

impl Parse for Optional {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        self.inner
            .parse(cursor)
            .or_else(|| outcome(String::new(), cursor, cursor))
    }
}

/// Hand-rolled quoted-string matcher. Not composed from the primitives
/// because of the one escape it must honor: a backslash immediately before
/// a quotation mark is consumed as a literal quote inside the string. The
/// captured text keeps the surrounding quotes but collapses the escape.
/// Reaching end of input without a terminator still yields the partial
/// match; unterminated strings are a reader-level concern.
pub struct QuotedString;

const QUOTE: char = '"';

impl Parse for QuotedString {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        if cursor.peek() != Some(QUOTE) {
            return None;
        }
        let mut text = String::from(QUOTE);
        let mut rest = cursor.advance(1);
        loop {
            if rest.starts_with("\\\"") {
                text.push(QUOTE);
                rest = rest.advance(2);
                continue;
            }
            match rest.peek() {
                None => break,
                Some(QUOTE) => {
                    text.push(QUOTE);
                    rest = rest.advance(1);
                    break;
                }
                Some(ch) => {
                    text.push(ch);
                    rest = rest.advance(1);
                }
            }
        }
        outcome(text, cursor, rest)
    }
}

/// Wraps a parser purely to attach an identity label to its outcomes.
pub struct Alias {
    inner: Box<dyn Parse>,
    name: &'static str,
}

impl Parse for Alias {
    fn parse<'a>(&self, cursor: Cursor<'a>) -> Option<ParseOutcome<'a>> {
        let out = self.inner.parse(cursor)?;
        Some(ParseOutcome {
            label: Some(self.name),
            ..out
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_text(parser: &dyn Parse, input: &str) -> Option<(String, String)> {
        parser
            .parse(Cursor::new(input))
            .map(|out| (out.token.text, out.rest.rest().to_string()))
    }

    #[test]
    fn char_class_consumes_one_matching_character() {
        let digit = CharClass::matching(|c| c.is_ascii_digit());
        assert_eq!(parse_text(&digit, "7x"), Some(("7".into(), "x".into())));
        assert!(parse_text(&digit, "x7").is_none());
        assert!(parse_text(&digit, "").is_none());
    }

    #[test]
    fn literal_requires_the_full_prefix() {
        let arrow = Literal::new("->");
        assert_eq!(parse_text(&arrow, "->x"), Some(("->".into(), "x".into())));
        assert!(parse_text(&arrow, "-x").is_none());
    }

    #[test]
    fn any_of_returns_the_first_success() {
        let either = AnyOf::new(vec![
            Box::new(Literal::new("<=")),
            Box::new(Literal::new("<")),
        ]);
        assert_eq!(parse_text(&either, "<=1"), Some(("<=".into(), "1".into())));
        assert_eq!(parse_text(&either, "<1"), Some(("<".into(), "1".into())));
    }

    #[test]
    fn sequence_concatenates_or_fails_as_a_whole() {
        let signed = Sequence::new(vec![
            Box::new(CharClass::exact('-')),
            Box::new(Repeat::new(CharClass::matching(|c| c.is_ascii_digit()))),
        ]);
        assert_eq!(parse_text(&signed, "-42 "), Some(("-42".into(), " ".into())));
        assert!(parse_text(&signed, "-x").is_none());
    }

    #[test]
    fn repeat_is_greedy_and_needs_at_least_one_by_default() {
        let digits = Repeat::new(CharClass::matching(|c| c.is_ascii_digit()));
        assert_eq!(parse_text(&digits, "123ab"), Some(("123".into(), "ab".into())));
        assert!(parse_text(&digits, "ab").is_none());
    }

    #[test]
    fn optional_always_succeeds() {
        let sign = Optional::new(CharClass::exact('-'));
        assert_eq!(parse_text(&sign, "-1"), Some(("-".into(), "1".into())));
        assert_eq!(parse_text(&sign, "1"), Some(("".into(), "1".into())));
    }

    #[test]
    fn quoted_string_collapses_escaped_quotes() {
        let out = parse_text(&QuotedString, r#""a \" b" tail"#);
        assert_eq!(out, Some((r#""a " b""#.into(), " tail".into())));
    }

    #[test]
    fn quoted_string_without_terminator_matches_to_end_of_input() {
        let out = parse_text(&QuotedString, "\"abc");
        assert_eq!(out, Some(("\"abc".into(), "".into())));
    }

    #[test]
    fn alias_attaches_a_label() {
        let ws = Repeat::new(CharClass::matching(|c| c.is_whitespace())).labeled("whitespace");
        let out = ws.parse(Cursor::new("  x")).unwrap();
        assert_eq!(out.label, Some("whitespace"));
        assert_eq!(out.token.text, "  ");
    }
}

//! Converts the flat token stream into a nested [`Expr`] tree.
//!
//! An opening bracket starts a sub-list read recursively until the matching
//! closing bracket at that depth; a closing bracket ends the current level;
//! everything else becomes an atom. The reader is deliberately lenient: an
//! unmatched opening bracket yields whatever was read before input ran out.
//! [`validate`] is the strict counterpart used by the CLI `check` command.

use crate::ast::Expr;
use crate::diagnostics::BraqError;
use crate::syntax::cursor::Token;

/// Classifies one token as an atom. An explicit ordered chain of fallible
/// parses, first success wins: integer, then float, then quoted string,
/// else bare symbol.
fn classify(text: &str) -> Expr {
    if let Ok(n) = text.parse::<i64>() {
        return Expr::Int(n);
    }
    if let Ok(x) = text.parse::<f64>() {
        return Expr::Float(x);
    }
    if text.starts_with('"') && text.ends_with('"') {
        let content = if text.len() < 2 {
            ""
        } else {
            &text[1..text.len() - 1]
        };
        return Expr::Str(content.to_string());
    }
    Expr::Symbol(text.to_string())
}

fn read_level(tokens: &mut std::slice::Iter<'_, Token>) -> Vec<Expr> {
    let mut level = Vec::new();
    while let Some(token) = tokens.next() {
        match token.text.as_str() {
            "[" => level.push(Expr::List(read_level(tokens))),
            "]" => break,
            _ => level.push(classify(&token.text)),
        }
    }
    level
}

/// Reads the whole stream into the top-level sequence of expressions.
pub fn read_all(tokens: &[Token]) -> Vec<Expr> {
    read_level(&mut tokens.iter())
}

/// Reads a program: the first top-level element is the whole program's
/// tree; anything after it is ignored.
pub fn read_program(tokens: &[Token]) -> Option<Expr> {
    read_all(tokens).into_iter().next()
}

/// Strict structural validation the lenient reader skips: bracket balance
/// and string termination. Reports the first problem found.
pub fn validate(tokens: &[Token]) -> Result<(), BraqError> {
    let mut depth: usize = 0;
    for token in tokens {
        match token.text.as_str() {
            "[" => depth += 1,
            "]" => {
                depth = depth.checked_sub(1).ok_or_else(|| BraqError::MalformedInput {
                    message: format!(
                        "unmatched ']' at line {}, column {}",
                        token.pos.line, token.pos.column
                    ),
                })?;
            }
            text if text.starts_with('"') && (text.len() < 2 || !text.ends_with('"')) => {
                return Err(BraqError::MalformedInput {
                    message: format!(
                        "unterminated string starting at line {}, column {}",
                        token.pos.line, token.pos.column
                    ),
                });
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(BraqError::MalformedInput {
            message: format!("{} unclosed '[' at end of input", depth),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenizer::tokenize;

    fn read_str(source: &str) -> Expr {
        read_program(&tokenize(source)).expect("program should not be empty")
    }

    #[test]
    fn atoms_classify_in_order() {
        assert_eq!(classify("42"), Expr::Int(42));
        assert_eq!(classify("+7"), Expr::Int(7));
        assert_eq!(classify("12.5"), Expr::Float(12.5));
        assert_eq!(classify("\"c d\""), Expr::Str("c d".to_string()));
        assert_eq!(classify("fact"), Expr::Symbol("fact".to_string()));
        assert_eq!(classify("-"), Expr::Symbol("-".to_string()));
    }

    #[test]
    fn reads_nested_trees() {
        assert_eq!(
            read_str("[* 2 [+ 1 3]]"),
            Expr::List(vec![
                Expr::Symbol("*".to_string()),
                Expr::Int(2),
                Expr::List(vec![
                    Expr::Symbol("+".to_string()),
                    Expr::Int(1),
                    Expr::Int(3),
                ]),
            ])
        );
    }

    #[test]
    fn unmatched_open_bracket_reads_leniently() {
        assert_eq!(
            read_str("[a [b"),
            Expr::List(vec![
                Expr::Symbol("a".to_string()),
                Expr::List(vec![Expr::Symbol("b".to_string())]),
            ])
        );
    }

    #[test]
    fn validate_reports_unclosed_brackets() {
        let err = validate(&tokenize("[a [b]")).unwrap_err();
        assert!(matches!(err, BraqError::MalformedInput { .. }));
    }

    #[test]
    fn validate_reports_unterminated_strings() {
        let err = validate(&tokenize("[\"abc]")).unwrap_err();
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn validate_accepts_balanced_input() {
        assert!(validate(&tokenize(r#"[a [b "c"] 1.5]"#)).is_ok());
    }
}

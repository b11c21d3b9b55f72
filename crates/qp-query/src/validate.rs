//! Structural checks over the flat token stream.
//!
//! These run after expansion and before any tree is built: parentheses must balance, at least
//! one term must exist, and operators must sit between operands. Adjacent operands without an
//! operator between them get an implicit `and`.

use crate::{
    error::QueryError,
    lexer::{Operator, Token, TokenKind},
};

/// Checks that every `(` has a matching `)`.
pub fn check_braces(tokens: &[Token]) -> Result<(), QueryError> {
    let mut open = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Open => open.push(token.position),
            TokenKind::Close => {
                if open.pop().is_none() {
                    return Err(QueryError::unbalanced(
                        "unexpected ')' without matching '('",
                        Some(token.position),
                    ));
                }
            }
            TokenKind::Term | TokenKind::Op(_) => {}
        }
    }

    match open.pop() {
        Some(position) => Err(QueryError::unbalanced("unclosed '('", Some(position))),
        None => Ok(()),
    }
}

/// Deepest nesting of groups and negations a query may have.
pub const MAX_NESTING: usize = 100;

/// Rejects queries nested deeper than [`MAX_NESTING`].
///
/// Each `(` counts one level, as does each `not` in front of an operand, so `not (not apple)`
/// is three levels deep. Expects balanced parentheses.
pub fn check_nesting(tokens: &[Token]) -> Result<(), QueryError> {
    // Levels opened by each enclosing group, including the negations in front of it.
    let mut groups: Vec<usize> = Vec::new();
    let mut depth = 0;
    let mut negations = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Op(Operator::Not) => negations += 1,
            TokenKind::Open => {
                groups.push(negations + 1);
                depth += negations + 1;
                negations = 0;
            }
            TokenKind::Close => {
                depth -= groups.pop().unwrap_or_default();
                negations = 0;
            }
            TokenKind::Term | TokenKind::Op(_) => negations = 0,
        }
        if depth + negations > MAX_NESTING {
            return Err(QueryError::malformed(
                "query nested too deeply",
                Some(token.position),
            ));
        }
    }

    Ok(())
}

/// Checks that the stream holds at least one searchable term.
pub fn require_terms(tokens: &[Token]) -> Result<(), QueryError> {
    if tokens.iter().any(|t| t.kind == TokenKind::Term) {
        Ok(())
    } else {
        Err(QueryError::empty())
    }
}

/// Inserts `and` between adjacent operands and rejects illegal adjacencies.
///
/// An operand ends with a term or `)` and begins with a term, `(` or `not`. Anything that does
/// not end an operand must be followed by something that begins one, and the stream must not
/// end on an operator.
pub fn insert_implicit_and(tokens: Vec<Token>) -> Result<Vec<Token>, QueryError> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len() * 2);

    for token in tokens {
        if let Some(previous) = result.last() {
            if previous.closes_operand() {
                if token.opens_operand() {
                    result.push(Token::operator(Operator::And, token.position));
                }
            } else if !token.opens_operand() {
                return Err(QueryError::malformed(
                    adjacency_message(previous, &token),
                    Some(token.position),
                ));
            }
        }
        result.push(token);
    }

    if let Some(last) = result.last()
        && let TokenKind::Op(op) = last.kind
    {
        return Err(QueryError::malformed(
            format!("query ends with operator '{op}'"),
            Some(last.position),
        ));
    }

    Ok(result)
}

/// Describes why `token` may not follow `previous`.
fn adjacency_message(previous: &Token, token: &Token) -> String {
    match (previous.kind, token.kind) {
        (TokenKind::Open, TokenKind::Close) => "empty group '()'".to_string(),
        (TokenKind::Open, _) => format!("unexpected '{}' at start of group", token.text),
        (_, TokenKind::Close) => format!("'{}' is missing its right operand", previous.text),
        _ => format!("unexpected '{}' after '{}'", token.text, previous.text),
    }
}

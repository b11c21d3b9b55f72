//! Nesting of the validated token stream.
//!
//! Parentheses become nested groups of [`Element`]s. Operators stay in place as markers until
//! the binders in [`crate::bind`] fold them into `Not`, `And` and `Or` nodes, after which
//! [`Element::into_query`] converts the result into a [`Query`].

use crate::{
    ast::Query,
    error::QueryError,
    lexer::{Operator, Token, TokenKind},
};

/// A node of the partially bound tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A searchable term.
    Term(String),
    /// An operator not yet bound, with its position in the input.
    Op(Operator, usize),
    /// A parenthesised sequence of elements.
    Group(Vec<Self>),
    /// A bound negation.
    Not(Box<Self>),
    /// A bound conjunction.
    And(Vec<Self>),
    /// A bound disjunction.
    Or(Vec<Self>),
}

impl Element {
    /// Converts a fully bound element into a query.
    ///
    /// Fails if an operator was left unbound or a group still holds more than one element.
    pub fn into_query(self) -> Result<Query, QueryError> {
        match self {
            Self::Term(text) => Ok(Query::Term(text)),
            Self::Op(op, position) => Err(QueryError::malformed(
                format!("dangling operator '{op}'"),
                Some(position),
            )),
            Self::Group(mut elements) => match elements.len() {
                1 => elements.remove(0).into_query(),
                0 => Err(QueryError::malformed("empty group '()'", None)),
                _ => Err(QueryError::malformed(
                    "group holds unconnected expressions",
                    None,
                )),
            },
            Self::Not(inner) => Ok(Query::not(inner.into_query()?)),
            Self::And(children) => Ok(Query::And(into_queries(children)?)),
            Self::Or(children) => Ok(Query::Or(into_queries(children)?)),
        }
    }
}

/// Converts each element in turn, stopping at the first failure.
fn into_queries(elements: Vec<Element>) -> Result<Vec<Query>, QueryError> {
    elements.into_iter().map(Element::into_query).collect()
}

/// Nests a balanced token stream by its parentheses.
///
/// A group holding a single element is spliced into its parent, and an empty group vanishes.
pub fn build_tree(tokens: Vec<Token>) -> Vec<Element> {
    build_level(&mut tokens.into_iter())
}

/// Builds one nesting level, consuming tokens up to and including its closing parenthesis.
fn build_level(tokens: &mut impl Iterator<Item = Token>) -> Vec<Element> {
    let mut level = Vec::new();

    while let Some(token) = tokens.next() {
        match token.kind {
            TokenKind::Term => level.push(Element::Term(token.text)),
            TokenKind::Op(op) => level.push(Element::Op(op, token.position)),
            TokenKind::Open => {
                let group = build_level(tokens);
                if group.len() > 1 {
                    level.push(Element::Group(group));
                } else {
                    level.extend(group);
                }
            }
            TokenKind::Close => break,
        }
    }

    level
}

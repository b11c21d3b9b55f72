//! Query abstract syntax tree.
//!
//! Represents a bound query, its normalization to a canonical shape, and its rendering as a
//! Lucene query clause.

use std::fmt;

use serde::Serialize;

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// A single search term or quoted phrase.
    Term(String),

    /// Negation: results must NOT match this expression.
    Not(Box<Self>),

    /// Conjunction: all sub-expressions must match.
    And(Vec<Self>),

    /// Disjunction: at least one sub-expression must match.
    Or(Vec<Self>),
}

/// The two n-ary group kinds, used where they are treated alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

impl Junction {
    /// Builds a group of this kind.
    fn build(self, children: Vec<Query>) -> Query {
        match self {
            Self::And => Query::And(children),
            Self::Or => Query::Or(children),
        }
    }

    /// Returns the children of `query` if it is a group of this kind, else the query itself.
    fn take_children(self, query: Query) -> Result<Vec<Query>, Query> {
        match (self, query) {
            (Self::And, Query::And(children)) | (Self::Or, Query::Or(children)) => Ok(children),
            (_, other) => Err(other),
        }
    }
}

impl Query {
    /// Creates a term.
    pub fn term(text: impl Into<String>) -> Self {
        Self::Term(text.into())
    }

    /// Creates a negation.
    pub fn not(query: Self) -> Self {
        Self::Not(Box::new(query))
    }

    /// Applies one bottom-up simplification pass.
    ///
    /// Returns the simplified query and whether anything changed. A group nested directly in a
    /// group of the same kind is spliced into its parent, a group left with one child is
    /// replaced by that child, and a double negation is replaced by the grandchild.
    pub fn reduce(self) -> (Self, bool) {
        match self {
            Self::Term(_) => (self, false),
            Self::Not(inner) => match *inner {
                Self::Not(grandchild) => (grandchild.reduce().0, true),
                other => {
                    let (inner, changed) = other.reduce();
                    (Self::not(inner), changed)
                }
            },
            Self::And(children) => reduce_group(Junction::And, children),
            Self::Or(children) => reduce_group(Junction::Or, children),
        }
    }

    /// Reduces the query until a pass makes no change.
    ///
    /// Every changing pass removes at least one node, so this terminates.
    pub fn normalize(self) -> Self {
        self.normalize_counted().0
    }

    /// Normalizes and also returns the number of passes run.
    pub(crate) fn normalize_counted(self) -> (Self, usize) {
        let mut query = self;
        let mut passes = 0;
        loop {
            let (next, changed) = query.reduce();
            query = next;
            passes += 1;
            if !changed {
                return (query, passes);
            }
        }
    }

    /// Returns the terms reachable under an even number of negations.
    ///
    /// These are the terms that can only make a document more relevant, so they are the ones
    /// repeated in boosted clauses. Order follows the query.
    pub fn boostable(&self) -> Vec<&str> {
        let mut terms = Vec::new();
        self.collect_boostable(false, &mut terms);
        terms
    }

    /// Collects boostable terms, tracking whether an odd number of negations encloses `self`.
    fn collect_boostable<'a>(&'a self, negated: bool, terms: &mut Vec<&'a str>) {
        match self {
            Self::Term(text) => {
                if !negated {
                    terms.push(text);
                }
            }
            Self::Not(inner) => inner.collect_boostable(!negated, terms),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_boostable(negated, terms);
                }
            }
        }
    }

    /// Renders the query as a Lucene clause against `field`.
    ///
    /// Terms render as `field:text` followed by `suffix`. A conjunction marks each child
    /// mandatory with `+`, except negations which carry their own `-`. Groups with more than one
    /// child are parenthesised.
    pub fn to_lucene(&self, field: &str, suffix: Option<&str>) -> String {
        match self {
            Self::Term(text) => format!("{field}:{text}{}", suffix.unwrap_or_default()),
            Self::Not(inner) => format!("-{}", inner.to_lucene(field, suffix)),
            Self::And(children) => render_group(children, field, suffix, true),
            Self::Or(children) => render_group(children, field, suffix, false),
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(s) => writeln!(f, "{prefix}Term({s:?})"),
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::And(exprs) => {
                writeln!(f, "{prefix}And")?;
                for expr in exprs {
                    expr.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(exprs) => {
                writeln!(f, "{prefix}Or")?;
                for expr in exprs {
                    expr.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// One reduction pass over the children of an And or Or node.
fn reduce_group(junction: Junction, children: Vec<Query>) -> (Query, bool) {
    let mut changed = false;
    let mut reduced = Vec::with_capacity(children.len());

    for child in children {
        match junction.take_children(child) {
            Ok(grandchildren) => {
                changed = true;
                reduced.extend(grandchildren.into_iter().map(|g| g.reduce().0));
            }
            Err(child) => {
                let (child, child_changed) = child.reduce();
                changed |= child_changed;
                reduced.push(child);
            }
        }
    }

    if reduced.len() == 1
        && let Some(only) = reduced.pop()
    {
        return (only, true);
    }

    (junction.build(reduced), changed)
}

/// Renders the children of a group, joined by spaces.
fn render_group(children: &[Query], field: &str, suffix: Option<&str>, mandatory: bool) -> String {
    let parts: Vec<String> = children
        .iter()
        .map(|child| {
            let rendered = child.to_lucene(field, suffix);
            if mandatory && children.len() > 1 && !matches!(child, Query::Not(_)) {
                format!("+{rendered}")
            } else {
                rendered
            }
        })
        .collect();

    if parts.len() == 1 {
        parts.join("")
    } else {
        format!("({})", parts.join(" "))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

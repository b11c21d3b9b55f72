//! The translation entry points.
//!
//! [`Translator`] holds the immutable settings (primary field, similarity suffix and boosted
//! fields) and runs the full pipeline for each query it is given.

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    ast::Query,
    bind::{bind_negations, bind_operators},
    error::QueryError,
    lexer::{Operator, Token, expand, tokenize},
    tree::{Element, build_tree},
    validate::{check_braces, check_nesting, insert_implicit_and, require_terms},
};

/// An extra field whose clause repeats the boostable terms with a relevance suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boost {
    /// Field the boosted clause searches.
    pub field: String,
    /// Suffix appended after the similarity suffix, e.g. `^10`.
    pub suffix: String,
}

impl Boost {
    /// Creates a boost for `field` with the given suffix.
    pub fn new(field: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            suffix: suffix.into(),
        }
    }
}

/// Every intermediate stage of one translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Tokens after expansion and implicit `and` insertion.
    pub tokens: Vec<Token>,
    /// The bound tree before normalization.
    pub parsed: Query,
    /// The normalized tree.
    pub normalized: Query,
    /// Terms repeated in boosted clauses.
    pub boostable: Vec<String>,
    /// The final Lucene query string.
    pub translation: String,
}

/// Translates plain-English boolean queries into Lucene query strings.
///
/// ```
/// use qp_query::{Boost, Translator};
///
/// let translator = Translator::new("content").with_boost(Boost::new("title", "^10"));
/// assert_eq!(
///     translator.translate("apple not banana").unwrap(),
///     "+(+content:apple -content:banana) title:apple^10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    /// Field searched by the primary clause.
    field: String,
    /// Suffix appended to every rendered term.
    similarity: Option<String>,
    /// Extra fields, rendered in this order.
    boosts: Vec<Boost>,
}

impl Translator {
    /// Creates a translator searching `field` with no similarity and no boosts.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            similarity: None,
            boosts: Vec::new(),
        }
    }

    /// Sets the similarity suffix, e.g. `~0.6`.
    pub fn with_similarity(mut self, similarity: impl Into<String>) -> Self {
        self.similarity = Some(similarity.into());
        self
    }

    /// Appends a boosted field.
    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boosts.push(boost);
        self
    }

    /// Appends several boosted fields.
    pub fn with_boosts(mut self, boosts: impl IntoIterator<Item = Boost>) -> Self {
        self.boosts.extend(boosts);
        self
    }

    /// The primary field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The similarity suffix, if any.
    pub fn similarity(&self) -> Option<&str> {
        self.similarity.as_deref()
    }

    /// The boosted fields.
    pub fn boosts(&self) -> &[Boost] {
        &self.boosts
    }

    /// Translates `input` into a Lucene query string.
    pub fn translate(&self, input: &str) -> Result<String, QueryError> {
        let query = parse(input)?;
        Ok(self.render(&query))
    }

    /// Translates `input`, keeping every intermediate stage.
    pub fn explain(&self, input: &str) -> Result<Explanation, QueryError> {
        let (tokens, parsed) = bind(input).map_err(|e| e.with_query(input))?;
        let normalized = normalize(parsed.clone());
        let translation = self.render(&normalized);
        let boostable = normalized
            .boostable()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Explanation {
            tokens,
            parsed,
            normalized,
            boostable,
            translation,
        })
    }

    /// Renders a normalized query as the primary clause followed by one clause per boost.
    fn render(&self, query: &Query) -> String {
        let primary = query.to_lucene(&self.field, self.similarity());
        let mut clauses = vec![if primary.starts_with('(') {
            format!("+{primary}")
        } else {
            primary
        }];

        let boostable = query.boostable();
        if !boostable.is_empty() {
            let terms = Query::Or(boostable.into_iter().map(Query::term).collect());
            for boost in &self.boosts {
                let suffix = format!("{}{}", self.similarity().unwrap_or_default(), boost.suffix);
                clauses.push(terms.to_lucene(&boost.field, Some(&suffix)));
            }
        }

        clauses.join(" ")
    }
}

/// Parses `input` into a normalized query tree.
pub fn parse(input: &str) -> Result<Query, QueryError> {
    let (_, query) = bind(input).map_err(|e| e.with_query(input))?;
    Ok(normalize(query))
}

/// Runs every stage up to and including operator binding.
fn bind(input: &str) -> Result<(Vec<Token>, Query), QueryError> {
    let tokens = expand(tokenize(input));
    check_braces(&tokens)?;
    check_nesting(&tokens)?;
    require_terms(&tokens)?;
    let tokens = insert_implicit_and(tokens)?;
    debug!(tokens = tokens.len(), "validated query tokens");

    let elements = bind_negations(build_tree(tokens.clone()))?;
    let elements = bind_operators(elements, Operator::And)?;
    let elements = bind_operators(elements, Operator::Or)?;
    let query = Element::Group(elements).into_query()?;
    trace!(tree = %query, "bound query");

    Ok((tokens, query))
}

/// Normalizes a bound query, logging the number of passes.
fn normalize(query: Query) -> Query {
    let (query, passes) = query.normalize_counted();
    debug!(passes, "normalized query");
    query
}

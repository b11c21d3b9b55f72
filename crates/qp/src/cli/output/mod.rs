//! Rendering and JSON serialization for CLI output.

mod style;

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use qp_query::{Explanation, Query, QueryError, Token, TokenKind};
use serde::Serialize;
pub use style::{dim, header, subheader, warning};

/// The successful result of handling one query.
pub enum Outcome {
    /// The Lucene query string.
    Translated(String),
    /// Every stage of the translation, for `--explain`.
    Explained(Box<Explanation>),
}

/// One input query paired with its result.
pub struct QueryOutcome<'a> {
    /// The query as given on the command line.
    pub query: &'a str,
    /// The translation, or why it failed.
    pub result: Result<Outcome, QueryError>,
}

/// JSON output for a failed translation.
#[derive(Serialize)]
struct JsonError {
    /// Human-readable description of the problem.
    message: String,
    /// Byte offset in the query the problem was detected at.
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
    /// A suggestion for fixing the query.
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

/// JSON output for a single query.
#[derive(Serialize)]
struct JsonQueryResult<'a> {
    /// The original query string.
    query: &'a str,
    /// The Lucene query string, when translation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<&'a str>,
    /// Intermediate stages, when `--explain` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<&'a Explanation>,
    /// The failure, when translation did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

/// JSON output for `qp translate`.
#[derive(Serialize)]
struct JsonTranslateOutput<'a> {
    /// Results in command-line order.
    queries: Vec<JsonQueryResult<'a>>,
}

impl<'a> From<&'a QueryOutcome<'a>> for JsonQueryResult<'a> {
    fn from(outcome: &'a QueryOutcome<'a>) -> Self {
        let mut result = Self {
            query: outcome.query,
            translation: None,
            explanation: None,
            error: None,
        };
        match &outcome.result {
            Ok(Outcome::Translated(translation)) => {
                result.translation = Some(translation.as_str());
            }
            Ok(Outcome::Explained(explanation)) => {
                result.translation = Some(explanation.translation.as_str());
                result.explanation = Some(explanation.as_ref());
            }
            Err(e) => {
                result.error = Some(JsonError {
                    message: e.message(),
                    position: e.position(),
                    hint: e.suggestion(),
                });
            }
        }
        result
    }
}

/// Prints all outcomes as one JSON document on stdout.
pub fn output_json(outcomes: &[QueryOutcome<'_>]) -> ExitCode {
    let output = JsonTranslateOutput {
        queries: outcomes.iter().map(JsonQueryResult::from).collect(),
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json_str) => {
            println!("{json_str}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints outcomes for humans: translations on stdout, errors on stderr.
pub fn output_text(outcomes: &[QueryOutcome<'_>]) {
    let mut first_explanation = true;
    for outcome in outcomes {
        match &outcome.result {
            Ok(Outcome::Translated(translation)) => println!("{translation}"),
            Ok(Outcome::Explained(explanation)) => {
                if !first_explanation {
                    println!();
                }
                first_explanation = false;
                print_explanation(outcome.query, explanation);
            }
            Err(e) => eprintln!("{}", e.to_string().trim_end()),
        }
    }
}

/// Prints every stage of one translation.
fn print_explanation(query: &str, explanation: &Explanation) {
    println!("{}", header(&format!("Query: {query}")));
    println!();

    println!("{}", subheader("Tokens:"));
    println!("{}", token_table(&explanation.tokens));
    println!();

    println!("{}", subheader("Parsed tree:"));
    print_tree(&explanation.parsed);
    println!();

    println!("{}", subheader("Normalized tree:"));
    print_tree(&explanation.normalized);
    println!();

    println!("{}", subheader("Boostable terms:"));
    if explanation.boostable.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        println!("  {}", explanation.boostable.join(", "));
    }
    println!();

    println!("{}", subheader("Translation:"));
    println!("  {}", explanation.translation);
}

/// Prints a query tree indented under a subheader.
fn print_tree(query: &Query) {
    for line in query.to_string().lines() {
        println!("  {line}");
    }
}

/// Builds the token table shown by `--explain`.
fn token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Kind", "Text", "Position"]);
    for (i, token) in tokens.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(kind_label(token.kind)),
            Cell::new(&token.text),
            Cell::new(token.position),
        ]);
    }
    table
}

/// Short label for a token kind.
fn kind_label(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Term => "term",
        TokenKind::Open => "open",
        TokenKind::Close => "close",
        TokenKind::Op(_) => "operator",
    }
}

#[cfg(test)]
mod tests {
    use qp_query::Translator;

    use super::*;

    #[test]
    fn token_table_lists_every_token() {
        let explanation = Translator::new("content").explain("apple (banana)").unwrap();
        let rendered = token_table(&explanation.tokens).to_string();
        for text in ["apple", "and", "banana", "operator", "open", "close"] {
            assert!(rendered.contains(text), "missing {text}: {rendered}");
        }
    }

    #[test]
    fn json_result_for_error() {
        let outcome = QueryOutcome {
            query: "apple (",
            result: Err(Translator::new("content").translate("apple (").unwrap_err()),
        };
        let json = serde_json::to_value(JsonQueryResult::from(&outcome)).unwrap();
        assert_eq!(json["query"], "apple (");
        assert_eq!(json["error"]["position"], 6);
        assert!(json.get("translation").is_none());
    }

    #[test]
    fn json_result_for_explanation() {
        let explanation = Translator::new("content").explain("not apple").unwrap();
        let outcome = QueryOutcome {
            query: "not apple",
            result: Ok(Outcome::Explained(Box::new(explanation))),
        };
        let json = serde_json::to_value(JsonQueryResult::from(&outcome)).unwrap();
        assert_eq!(json["translation"], "-content:apple");
        assert_eq!(json["explanation"]["normalized"]["not"]["term"], "apple");
    }
}

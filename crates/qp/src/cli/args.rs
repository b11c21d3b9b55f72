//! Clap argument definitions for the `qp` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use qp_query::Boost;

/// Parses a `FIELD=SUFFIX` boost argument.
fn parse_boost(s: &str) -> Result<Boost, String> {
    let (field, suffix) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=SUFFIX, got '{s}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok(Boost::new(field, suffix.trim()))
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "qp")]
#[command(about = "Query Parser - Translate plain-English boolean queries into Lucene syntax")]
pub struct Cli {
    /// Verbosity level (-v for debug logging, -vv for trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override the configured translator settings.
#[derive(Args, Debug, Clone, Default)]
pub struct TranslatorArgs {
    /// Field searched by the main clause [default: content]
    #[arg(short = 'F', long)]
    pub field: Option<String>,

    /// Suffix appended to every term, e.g. ~0.6
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub similarity: Option<String>,

    /// Boosted field as FIELD=SUFFIX (repeatable, replaces configured boosts)
    #[arg(short = 'b', long = "boost", value_name = "FIELD=SUFFIX", value_parser = parse_boost)]
    pub boosts: Vec<Boost>,

    /// Disable all boosted clauses
    #[arg(long, conflicts_with = "boosts")]
    pub no_boost: bool,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Shared explain/debug flag.
#[derive(Args, Debug, Clone, Default)]
pub struct ExplainArgs {
    /// Show tokens, parsed and normalized trees alongside the translation
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for `qp translate`.
#[derive(Args, Debug, Clone)]
pub struct TranslateCommand {
    /// Queries to translate
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Translator setting overrides.
    pub translator: TranslatorArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    #[command(flatten)]
    /// Explain/debug flags.
    pub explain: ExplainArgs,
}

/// Arguments for `qp init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.qp.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `qp` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Translate queries into Lucene query strings
    #[command(after_help = "\
QUERY SYNTAX:
  term              Term must appear
  term1 term2       Both terms (implicit AND)
  \"phrase\"          Exact phrase match
  not term          Term must NOT appear
  term1 or term2    Either term
  (expr)            Grouping

  Operators are case-insensitive. 'and' binds tighter than 'or'.

EXAMPLES:
  qp translate 'apple banana'
  qp translate 'apple and not (banana or cherry)'
  qp translate '\"killroy was here\" or graffiti'
  qp translate -s ~0.6 -b title=^10 'apple not banana'
  qp translate --explain 'apple or not banana'")]
    Translate(TranslateCommand),

    /// Initialize qp configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}

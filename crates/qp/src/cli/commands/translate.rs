//! Implementation of `qp translate`.

use std::process::ExitCode;

use qp_config::Config;
use qp_query::{Boost, Translator};
use tracing::debug;

use crate::cli::{
    args::{TranslateCommand, TranslatorArgs},
    context::CommandContext,
    output::{Outcome, QueryOutcome, output_json, output_text},
};

/// Translates each query independently, reporting every failure.
pub fn run(ctx: &CommandContext, cmd: &TranslateCommand) -> ExitCode {
    let translator = build_translator(&ctx.config, &cmd.translator);
    debug!(
        field = translator.field(),
        similarity = translator.similarity(),
        boosts = translator.boosts().len(),
        "translating {} queries",
        cmd.queries.len()
    );

    let outcomes: Vec<QueryOutcome<'_>> = cmd
        .queries
        .iter()
        .map(|query| QueryOutcome {
            query: query.as_str(),
            result: if cmd.explain.explain {
                translator
                    .explain(query)
                    .map(|e| Outcome::Explained(Box::new(e)))
            } else {
                translator.translate(query).map(Outcome::Translated)
            },
        })
        .collect();

    let failures = outcomes.iter().filter(|o| o.result.is_err()).count();

    let code = if cmd.output.json {
        output_json(&outcomes)
    } else {
        output_text(&outcomes);
        ExitCode::SUCCESS
    };

    if failures > 0 {
        debug!(failures, "some queries could not be translated");
        return ExitCode::FAILURE;
    }
    code
}

/// Builds the translator from configuration, with command-line flags taking precedence.
///
/// Boosts given on the command line replace the configured ones, and `--no-boost` drops them.
fn build_translator(config: &Config, args: &TranslatorArgs) -> Translator {
    let field = args.field.as_deref().unwrap_or(&config.translator.field);
    let mut translator = Translator::new(field);

    if let Some(similarity) = args
        .similarity
        .as_ref()
        .or(config.translator.similarity.as_ref())
    {
        translator = translator.with_similarity(similarity.as_str());
    }

    if args.no_boost {
        return translator;
    }

    if args.boosts.is_empty() {
        translator.with_boosts(
            config
                .boosts
                .iter()
                .map(|b| Boost::new(b.field.as_str(), b.suffix.as_str())),
        )
    } else {
        translator.with_boosts(args.boosts.iter().cloned())
    }
}

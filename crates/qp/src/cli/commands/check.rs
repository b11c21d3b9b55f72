//! Implementation of `qp check`.

use std::process::ExitCode;

use qp_config::{ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Exit codes for `qp check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
}

/// Lists configuration files and effective settings, then reports validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    let config = &ctx.config;

    if config_files.is_empty() {
        println!("{}", dim("No configuration files found, using defaults."));
        println!(
            "Run {} to create a configuration file.",
            subheader("qp init")
        );
        println!();
    } else {
        println!("{}", subheader("Config files (highest precedence first):"));
        for path in &config_files {
            if is_global_config(path) {
                println!("   {} {}", path.display(), dim("(global)"));
            } else {
                println!("   {}", path.display());
            }
        }
        if let Some(root) = &config.config_root {
            println!("{} {}", subheader("Config root:"), root.display());
        }
        println!();
    }

    println!("{}", subheader("Translator:"));
    println!("   field:      {}", config.translator.field);
    match &config.translator.similarity {
        Some(similarity) => println!("   similarity: {similarity}"),
        None => println!("   similarity: {}", dim("(none)")),
    }
    println!();

    println!("{}", subheader("Boosts:"));
    if config.boosts.is_empty() {
        println!("   {}", dim("(none defined)"));
    } else {
        for boost in &config.boosts {
            println!("   {}{}", boost.field, dim(&boost.suffix));
        }
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   - {w}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving the reported warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings.iter().map(hint).collect();
    hints.sort_unstable();
    hints.dedup();

    println!("{}", subheader("Hints:"));
    for hint in hints {
        println!("   - {hint}");
    }
}

/// The fix suggested for a warning.
fn hint(warning: &ConfigWarning) -> &'static str {
    match warning {
        ConfigWarning::EmptyField => "Set [translator] field to the name of the searched field.",
        ConfigWarning::MalformedSimilarity { .. } => {
            "Use a similarity of the form ~0.6, or remove it."
        }
        ConfigWarning::MalformedBoostSuffix { .. } => "Use a boost suffix of the form ^10.",
        ConfigWarning::EmptyBoostField { .. } => "Give every [[boost]] entry a field name.",
        ConfigWarning::BoostOnPrimaryField { .. } => {
            "Remove the boost on the primary field; its terms are already searched there."
        }
    }
}

//! Compare command handler.
//!
//! Implements the `compare` subcommand for comparing two baseline snapshots.

use crate::compare::Comparison;
use crate::config::{BehaviorConfig, CompareConfig};
use crate::pipeline::{exit_codes, load_baseline, output_report, run_comparison};
use anyhow::Result;

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(config: CompareConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let old = load_baseline(&config.paths.old, quiet)?;
    let new = load_baseline(&config.paths.new, quiet)?;

    let comparison = run_comparison(&config, &old, &new)?;
    let exit_code = determine_exit_code(&config.behavior, &comparison);

    output_report(&config, &comparison, &old, &new)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on the comparison and config flags.
fn determine_exit_code(behavior: &BehaviorConfig, comparison: &Comparison) -> i32 {
    if behavior.fail_on_breaking && !comparison.is_compatible() {
        return exit_codes::BREAKING_CHANGES;
    }
    if behavior.fail_on_change && !comparison.outcome.is_no_delta() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

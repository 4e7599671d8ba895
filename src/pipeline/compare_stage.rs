//! Comparison stage.
//!
//! Builds the comparator from the configuration and runs it over two
//! loaded baselines.

use super::PipelineError;
use crate::compare::{ApiComparator, Comparison};
use crate::config::CompareConfig;
use crate::model::{ApiBaseline, VisibilityMask};
use anyhow::Result;

/// Build a comparator with the configured visibility and exclusions.
pub fn build_comparator(config: &CompareConfig) -> Result<ApiComparator> {
    let exclusions = config.filtering.exclusion_patterns()?;
    Ok(ApiComparator::new()
        .with_visibility(VisibilityMask::from(config.comparison.visibility))
        .with_exclusions(exclusions)
        .with_span(tracing::info_span!("compare")))
}

/// Compare two baselines.
///
/// With no component ids configured every non-system component is compared.
/// Otherwise only the named components are; each one must exist in at least
/// one of the baselines.
pub fn run_comparison(
    config: &CompareConfig,
    old: &ApiBaseline,
    new: &ApiBaseline,
) -> Result<Comparison> {
    let quiet = config.behavior.quiet;
    let comparator = build_comparator(config)?;
    let selected = &config.comparison.components;

    if !quiet {
        tracing::info!(
            "Comparing '{}' against '{}' ({} visibility)",
            old.name,
            new.name,
            config.comparison.visibility
        );
    }

    let comparison = if selected.is_empty() {
        comparator.compare_baselines(old, new)
    } else {
        for id in selected {
            if old.component(id).is_none() && new.component(id).is_none() {
                return Err(PipelineError::ComponentMissing {
                    component: id.clone(),
                    side: "either".to_string(),
                }
                .into());
            }
        }
        comparator.compare_selected(old, new, |id| selected.iter().any(|s| s == id))
    };

    if !quiet {
        let leaves = comparison.outcome.leaves();
        let breaking = leaves.iter().filter(|d| !d.is_compatible()).count();
        tracing::info!(
            "Comparison complete: {} changes, {} breaking, {} resolution issues",
            leaves.len(),
            breaking,
            comparison.status.len()
        );
    }
    for issue in comparison.status.issues() {
        tracing::warn!("{}", issue);
    }

    Ok(comparison)
}

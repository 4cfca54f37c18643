//! Configuration validation
//!
//! Validation rules:
//! - A corpus source is configured (directory or file list)
//! - progress_every > 0
//! - Sink names unique and non-empty
//! - Sink `precision` params parse as unsigned integers

use std::collections::HashSet;

use contracts::{AnalysisPlan, ContractError};

/// Validate an AnalysisPlan
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(plan: &AnalysisPlan) -> Result<(), ContractError> {
    validate_corpus(plan)?;
    validate_analysis(plan)?;
    validate_sinks(plan)?;
    Ok(())
}

/// A corpus source must be present
fn validate_corpus(plan: &AnalysisPlan) -> Result<(), ContractError> {
    if plan.corpus.dir.is_none() && plan.corpus.files.is_empty() {
        return Err(ContractError::config_validation(
            "corpus",
            "either corpus.dir or corpus.files must be set",
        ));
    }
    Ok(())
}

/// Analysis knobs must be usable
fn validate_analysis(plan: &AnalysisPlan) -> Result<(), ContractError> {
    if plan.analysis.progress_every == 0 {
        return Err(ContractError::config_validation(
            "analysis.progress_every",
            "progress_every must be > 0",
        ));
    }
    Ok(())
}

/// Sink names must be unique and non-empty; known params must parse
fn validate_sinks(plan: &AnalysisPlan) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, sink) in plan.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(&sink.name) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
        if let Some(precision) = sink.params.get("precision") {
            if precision.parse::<usize>().is_err() {
                return Err(ContractError::config_validation(
                    format!("sinks[name={}].params.precision", sink.name),
                    format!("precision must be an unsigned integer, got '{precision}'"),
                ));
            }
        }
    }
    Ok(())
}

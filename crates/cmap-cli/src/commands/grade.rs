//! Grade command implementation.

use crate::cli::GradeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::input::load_propositions;
use crate::output::Formatter;
use crate::runner::run_algorithms;
use cmap_scoring::{algorithm_names, find_algorithm, ScoringOptions, MAX_CONFLICT_BONUS};
use std::sync::Arc;
use tracing::{info, warn};

/// Execute the grade command.
pub async fn execute_grade(args: GradeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let algorithms = resolve_algorithms(&args.algorithms)?;
    let options = scoring_options(&args, &config.scoring)?;
    let timeout_secs = args.timeout_secs.unwrap_or(config.settings.timeout_secs);
    if timeout_secs == 0 {
        return Err(CliError::InvalidInput(
            "Timeout must be greater than 0".to_string(),
        ));
    }

    let master = Arc::new(load_propositions(&args.master)?);
    let student = Arc::new(load_propositions(&args.student)?);
    info!(
        "Loaded {} reference and {} learner propositions",
        master.len(),
        student.len()
    );

    let reports = run_algorithms(&algorithms, master, student, &options, timeout_secs).await;
    println!("{}", formatter.format_reports(&reports, args.verbose)?);

    if reports.iter().all(|r| !r.success) {
        return Err(CliError::InvalidInput(
            "No algorithm produced a result".to_string(),
        ));
    }
    Ok(())
}

/// Canonical algorithm names to run, all of them when none are requested.
pub fn resolve_algorithms(requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(algorithm_names().into_iter().map(String::from).collect());
    }

    let mut names: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        let info = find_algorithm(name).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unknown algorithm '{}' (available: {})",
                name,
                algorithm_names().join(", ")
            ))
        })?;
        if !names.iter().any(|n| n == info.name) {
            names.push(info.name.to_string());
        }
    }
    Ok(names)
}

/// Merge command-line overrides into the configured scoring options.
pub fn scoring_options(args: &GradeArgs, base: &ScoringOptions) -> Result<ScoringOptions> {
    let mut options = base.clone();

    if let Some(mode) = args.expansion_mode {
        options.expansion_mode = mode.into();
    }
    if let Some(bonus) = args.conflict_bonus {
        if bonus > MAX_CONFLICT_BONUS {
            warn!(
                "Conflict bonus {} exceeds {}, clamping",
                bonus, MAX_CONFLICT_BONUS
            );
        }
        options.conflict_bonus = bonus;
    }
    if args.simple_score_only {
        options.simple_score_only = true;
    }

    options.validate()?;
    Ok(options)
}

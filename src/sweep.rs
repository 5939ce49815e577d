use crate::error::ValidationError;
use crate::generator::Generator;
use crate::params::GenerationParameters;
use crate::rng::PcgSource;
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Range;

/// Convergence statistics over many seeded runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSummary {
    pub runs: usize,
    pub converged: usize,
    /// Largest `|target - sum|` seen.
    pub worst_residual: f64,
    pub max_iterations_used: usize,
    pub min_purchases: usize,
    pub max_purchases: usize,
}

struct RunStats {
    converged: bool,
    residual: f64,
    iterations: usize,
    purchases: usize,
}

/// Generates one log per seed in parallel and summarises how well they
/// reconciled.
pub fn sweep(
    generator: &Generator,
    params: &GenerationParameters,
    seeds: Range<u64>,
) -> Result<SweepSummary, ValidationError> {
    params.validate()?;
    generator.settings().validate()?;

    let stats = seeds
        .into_par_iter()
        .map(|seed| {
            let mut rng = PcgSource::new(seed);
            let log = generator.generate(params, &mut rng)?;
            Ok(RunStats {
                converged: log.reconciliation.converged,
                residual: log.reconciliation.residual.abs(),
                iterations: log.reconciliation.iterations,
                purchases: log.len(),
            })
        })
        .collect::<Result<Vec<RunStats>, ValidationError>>()?;

    let summary = SweepSummary {
        runs: stats.len(),
        converged: stats.iter().filter(|s| s.converged).count(),
        worst_residual: stats.iter().map(|s| s.residual).fold(0.0, f64::max),
        max_iterations_used: stats.iter().map(|s| s.iterations).max().unwrap_or(0),
        min_purchases: stats.iter().map(|s| s.purchases).min().unwrap_or(0),
        max_purchases: stats.iter().map(|s| s.purchases).max().unwrap_or(0),
    };
    tracing::info!(
        runs = summary.runs,
        converged = summary.converged,
        worst_residual = summary.worst_residual,
        "sweep finished"
    );
    Ok(summary)
}

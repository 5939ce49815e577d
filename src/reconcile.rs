use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOLERANCE: f64 = 0.1;
pub const DEFAULT_MAX_ITERATIONS: usize = 150;

/// Inclusive per-purchase volume limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillBounds {
    pub min: f64,
    pub max: f64,
}

impl FillBounds {
    pub fn new(min: f64, max: f64) -> Self {
        FillBounds { min, max }
    }

    /// The floor wins when `max` is below `min`.
    #[inline]
    pub fn clamp(&self, volume: f64) -> f64 {
        volume.min(self.max).max(self.min)
    }

    #[inline]
    pub fn contains(&self, volume: f64) -> bool {
        volume >= self.min && volume <= self.max
    }
}

/// How each correction pass spreads the remaining difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Redistribution {
    /// Add `diff / n` to every volume, pinned or not.
    #[default]
    Uniform,
    /// Split `diff` over the volumes that can still move toward the target.
    Unpinned,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileSettings {
    /// Largest accepted `|target - sum|`.
    pub tolerance: f64,
    /// Upper bound on correction passes after the proportional pass.
    pub max_iterations: usize,
    pub redistribution: Redistribution,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        ReconcileSettings {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            redistribution: Redistribution::Uniform,
        }
    }
}

impl ReconcileSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ValidationError::InvalidSettings(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub volumes: Vec<f64>,
    /// Correction passes run, not counting the proportional pass.
    pub iterations: usize,
    pub converged: bool,
    /// `target - sum(volumes)` when the loop stopped.
    pub residual: f64,
}

/// Pulls `volumes` toward summing to `target` without leaving `bounds`.
///
/// One proportional rescale, then up to `settings.max_iterations`
/// additive corrections. Stopping short of the tolerance is not an
/// error: the best sequence found is returned with `converged == false`.
pub fn reconcile(
    mut volumes: Vec<f64>,
    target: f64,
    bounds: FillBounds,
    settings: &ReconcileSettings,
) -> Reconciliation {
    if volumes.is_empty() {
        return Reconciliation {
            volumes,
            iterations: 0,
            converged: false,
            residual: target,
        };
    }

    let sampled: f64 = volumes.iter().sum();
    if sampled > 0.0 {
        let scale = target / sampled;
        for v in volumes.iter_mut() {
            *v = bounds.clamp(*v * scale);
        }
    }

    let mut iterations = 0;
    let mut diff = target - volumes.iter().sum::<f64>();
    while diff.abs() > settings.tolerance && iterations < settings.max_iterations {
        let moved = match settings.redistribution {
            Redistribution::Uniform => spread_uniform(&mut volumes, diff, bounds),
            Redistribution::Unpinned => spread_unpinned(&mut volumes, diff, bounds),
        };
        if !moved {
            break;
        }
        iterations += 1;
        diff = target - volumes.iter().sum::<f64>();
    }

    Reconciliation {
        volumes,
        iterations,
        converged: diff.abs() <= settings.tolerance,
        residual: diff,
    }
}

fn spread_uniform(volumes: &mut [f64], diff: f64, bounds: FillBounds) -> bool {
    let per_item = diff / volumes.len() as f64;
    for v in volumes.iter_mut() {
        *v = bounds.clamp(*v + per_item);
    }
    true
}

// Returns false once every volume is pinned against the direction of `diff`.
fn spread_unpinned(volumes: &mut [f64], diff: f64, bounds: FillBounds) -> bool {
    let movable = |v: f64| if diff > 0.0 { v < bounds.max } else { v > bounds.min };
    let count = volumes.iter().filter(|v| movable(**v)).count();
    if count == 0 {
        return false;
    }
    let per_item = diff / count as f64;
    for v in volumes.iter_mut() {
        if movable(*v) {
            *v = bounds.clamp(*v + per_item);
        }
    }
    true
}

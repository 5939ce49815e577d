use crate::error::ValidationError;
use crate::params::{GenerationParameters, MIN_FILL};
use crate::purchase::{PurchaseLog, PurchaseRecord, ReconcileSummary};
use crate::reconcile::{reconcile, FillBounds, ReconcileSettings};
use crate::rng::RandomSource;
use crate::sample::sample_volumes;
use crate::schedule::schedule;

/// Generates a purchase log with the default reconcile settings.
pub fn generate<R: RandomSource>(
    params: &GenerationParameters,
    rng: &mut R,
) -> Result<PurchaseLog, ValidationError> {
    Generator::default().generate(params, rng)
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    settings: ReconcileSettings,
}

impl Generator {
    pub fn new(settings: ReconcileSettings) -> Self {
        Generator { settings }
    }

    pub fn settings(&self) -> &ReconcileSettings {
        &self.settings
    }

    /// Schedule, sample, reconcile, then attach a location to each purchase.
    ///
    /// Everything is validated up front; once generation starts it always
    /// produces a complete log.
    pub fn generate<R: RandomSource>(
        &self,
        params: &GenerationParameters,
        rng: &mut R,
    ) -> Result<PurchaseLog, ValidationError> {
        params.validate()?;
        self.settings.validate()?;

        let dates = schedule(params, rng);
        let bounds = FillBounds::new(MIN_FILL, params.max_capacity);
        let sampled = sample_volumes(dates.len(), bounds, rng);
        tracing::debug!(purchases = dates.len(), "sampled initial volumes");

        let reconciled = reconcile(sampled, params.target_total, bounds, &self.settings);
        if reconciled.converged {
            tracing::debug!(
                iterations = reconciled.iterations,
                residual = reconciled.residual,
                "volumes reconciled"
            );
        } else {
            tracing::warn!(
                iterations = reconciled.iterations,
                residual = reconciled.residual,
                target = params.target_total,
                "volumes did not converge on the target total"
            );
        }

        let mut records = Vec::with_capacity(dates.len());
        for (date, volume) in dates.into_iter().zip(reconciled.volumes) {
            let location = match rng.choice(&params.locations) {
                Some(location) => location.clone(),
                None => return Err(ValidationError::EmptyLocationSet),
            };
            records.push(PurchaseRecord {
                date,
                volume,
                location,
            });
        }

        Ok(PurchaseLog {
            records,
            target_total: params.target_total,
            reconciliation: ReconcileSummary {
                iterations: reconciled.iterations,
                converged: reconciled.converged,
                residual: reconciled.residual,
            },
        })
    }
}

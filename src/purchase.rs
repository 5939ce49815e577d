use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// One synthesized fuel purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRecord {
    pub date: NaiveDate,
    /// Full precision; see [`PurchaseRecord::rounded_volume`] for display.
    /// Serialized rounded, like every other presentation of a record.
    #[serde(serialize_with = "serialize_tenths")]
    pub volume: f64,
    pub location: String,
}

impl PurchaseRecord {
    /// Volume rounded to one decimal place.
    pub fn rounded_volume(&self) -> f64 {
        round_tenths(self.volume)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileSummary {
    pub iterations: usize,
    pub converged: bool,
    pub residual: f64,
}

/// Generated purchases in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseLog {
    pub records: Vec<PurchaseRecord>,
    pub target_total: f64,
    pub reconciliation: ReconcileSummary,
}

impl PurchaseLog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PurchaseRecord> {
        self.records.iter()
    }

    /// Sum of the full precision volumes.
    pub fn total_volume(&self) -> f64 {
        self.records.iter().map(|r| r.volume).sum()
    }

    /// Sum of the volumes as displayed, one decimal each.
    pub fn displayed_total(&self) -> f64 {
        self.records.iter().map(PurchaseRecord::rounded_volume).sum()
    }

    /// Running total of displayed volumes after each record.
    pub fn running_totals(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().scan(0.0, |total, record| {
            *total += record.rounded_volume();
            Some(*total)
        })
    }
}

impl<'a> IntoIterator for &'a PurchaseLog {
    type Item = &'a PurchaseRecord;
    type IntoIter = std::slice::Iter<'a, PurchaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn serialize_tenths<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_tenths(*value))
}

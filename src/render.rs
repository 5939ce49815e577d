use crate::params::DATE_FORMAT;
use crate::purchase::PurchaseLog;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render(log: &PurchaseLog, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(table(log)),
        OutputFormat::Json => serde_json::to_string_pretty(log),
    }
}

/// One row per purchase, then the total of the displayed volumes.
pub fn table(log: &PurchaseLog) -> String {
    let location_width = log
        .iter()
        .map(|r| r.location.len())
        .max()
        .unwrap_or(0)
        .max("Station".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<10}  {:>7}  {}", "Date", "Gallons", "Station");
    let _ = writeln!(out, "{}", "-".repeat(10 + 2 + 7 + 2 + location_width));
    for record in log {
        let _ = writeln!(
            out,
            "{:<10}  {:>7.1}  {}",
            record.date.format(DATE_FORMAT).to_string(),
            record.rounded_volume(),
            record.location
        );
    }
    let _ = writeln!(out, "Total: {:.1} gallons", log.displayed_total());
    out
}

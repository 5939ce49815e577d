use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Smallest volume a single purchase may have.
pub const MIN_FILL: f64 = 5.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_START_DATE: &str = "2024-07-01";
pub const DEFAULT_END_DATE: &str = "2025-06-30";
pub const DEFAULT_MAX_CAPACITY: f64 = 26.0;
pub const DEFAULT_TARGET_TOTAL: f64 = 2450.0;

pub const DEFAULT_STATIONS: [&str; 10] = [
    "Circle K, 35 S Grand Blvd, St Louis, Missouri, 63103",
    "BP, 1815 Arsenal, St Louis, Missouri, 63118",
    "Moto, 3120 Mississippi Ave, Sauget, Illinois, 6220",
    "Love's, 6124 N Broadway, St Louis, Missouri, 63147",
    "Circle K, 1514 Hampton Ave, St Louis, Missouri, 63139",
    "Zoom, 1300 N Tucker Blvd, St. Louis, Missouri, 63106",
    "ZX, 1007 S Broadway, St Louis, Missouri, 63103",
    "Shell, 721 N Tucker Blvd, St Louis, Missouri, 63101",
    "QuikTrip, 2600 Chouteau Ave, St Louis, Missouri, 63103",
    "Phillips 66, 1655 S Jefferson Ave, St Louis, Missouri, 63104",
];

/// Everything one generation run needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_capacity: f64,
    pub target_total: f64,
    pub locations: Vec<String>,
}

/// Unparsed field values, as typed into a form or passed on a command line.
#[derive(Debug, Clone, Default)]
pub struct RawParameters {
    pub start_date: String,
    pub end_date: String,
    pub max_capacity: String,
    pub target_total: String,
    /// One location per line.
    pub locations: String,
}

impl GenerationParameters {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        max_capacity: f64,
        target_total: f64,
        locations: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let params = GenerationParameters {
            start_date,
            end_date,
            max_capacity,
            target_total,
            locations,
        };
        params.validate()?;
        Ok(params)
    }

    /// The values the form resets to.
    pub fn default_scenario() -> Self {
        GenerationParameters {
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or(NaiveDate::MIN),
            max_capacity: DEFAULT_MAX_CAPACITY,
            target_total: DEFAULT_TARGET_TOTAL,
            locations: DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Dates are checked first, then capacity, target, locations, and
    /// finally the target/capacity plausibility rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_date_order(self.start_date, self.end_date)?;
        if !is_positive(self.max_capacity) {
            return Err(ValidationError::InvalidCapacity(self.max_capacity.to_string()));
        }
        if !is_positive(self.target_total) {
            return Err(ValidationError::InvalidTarget(self.target_total.to_string()));
        }
        if self.locations.is_empty() {
            return Err(ValidationError::EmptyLocationSet);
        }
        if self.target_total < self.max_capacity {
            return Err(ValidationError::ImplausibleTarget {
                target: self.target_total,
                capacity: self.max_capacity,
            });
        }
        Ok(())
    }

    /// Whole days between the start and end dates.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

impl RawParameters {
    pub fn parse(&self) -> Result<GenerationParameters, ValidationError> {
        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;
        check_date_order(start_date, end_date)?;
        let max_capacity = parse_capacity(&self.max_capacity)?;
        let target_total = parse_target(&self.target_total)?;
        GenerationParameters::new(
            start_date,
            end_date,
            max_capacity,
            target_total,
            parse_locations(&self.locations),
        )
    }
}

/// The end date must fall strictly after the start date.
pub fn check_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::InvalidDateRange(format!(
            "end date {} must be after start date {}",
            end, start
        )));
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| ValidationError::InvalidDateRange(format!("{:?} is not a date: {}", text, e)))
}

pub fn parse_capacity(text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(v) if is_positive(v) => Ok(v),
        _ => Err(ValidationError::InvalidCapacity(text.to_string())),
    }
}

pub fn parse_target(text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(v) if is_positive(v) => Ok(v),
        _ => Err(ValidationError::InvalidTarget(text.to_string())),
    }
}

/// Splits newline separated locations, trimming each and dropping blanks.
pub fn parse_locations(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw() -> RawParameters {
        RawParameters {
            start_date: "2024-07-01".to_string(),
            end_date: "2025-06-30".to_string(),
            max_capacity: "26".to_string(),
            target_total: "2450".to_string(),
            locations: "BP\nShell\n".to_string(),
        }
    }

    #[test]
    fn test_default_scenario_is_valid() {
        let params = GenerationParameters::default_scenario();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.start_date, parse_date(DEFAULT_START_DATE).unwrap());
        assert_eq!(params.end_date, parse_date(DEFAULT_END_DATE).unwrap());
        assert_eq!(params.locations.len(), 10);
        assert_eq!(params.day_count(), 364);
    }

    #[test]
    fn test_parse_raw() {
        let params = raw().parse().unwrap();
        assert_eq!(params.start_date, date(2024, 7, 1));
        assert_eq!(params.end_date, date(2025, 6, 30));
        assert_eq!(params.max_capacity, 26.0);
        assert_eq!(params.target_total, 2450.0);
        assert_eq!(params.locations, vec!["BP", "Shell"]);
    }

    #[test]
    fn test_unparsable_date() {
        let mut input = raw();
        input.end_date = "next tuesday".to_string();
        assert!(matches!(input.parse(), Err(ValidationError::InvalidDateRange(_))));
    }

    #[test]
    fn test_end_not_after_start() {
        let mut input = raw();
        input.end_date = input.start_date.clone();
        assert!(matches!(input.parse(), Err(ValidationError::InvalidDateRange(_))));
    }

    #[test]
    fn test_date_order_reported_before_bad_numbers() {
        let mut raw = raw();
        raw.end_date = raw.start_date.clone();
        raw.max_capacity = "lots".to_string();
        raw.target_total = "-3".to_string();
        assert!(matches!(raw.parse(), Err(ValidationError::InvalidDateRange(_))));
    }

    #[test]
    fn test_non_numeric_capacity() {
        let mut input = raw();
        input.max_capacity = "lots".to_string();
        assert_eq!(input.parse(), Err(ValidationError::InvalidCapacity("lots".to_string())));
        input.max_capacity = "-3".to_string();
        assert!(matches!(input.parse(), Err(ValidationError::InvalidCapacity(_))));
        input.max_capacity = "NaN".to_string();
        assert!(matches!(input.parse(), Err(ValidationError::InvalidCapacity(_))));
    }

    #[test]
    fn test_non_positive_target() {
        let mut input = raw();
        input.target_total = "0".to_string();
        assert!(matches!(input.parse(), Err(ValidationError::InvalidTarget(_))));
        input.target_total = "".to_string();
        assert!(matches!(input.parse(), Err(ValidationError::InvalidTarget(_))));
    }

    #[test]
    fn test_blank_locations_rejected() {
        let mut input = raw();
        input.locations = "  \n\n \t".to_string();
        assert_eq!(input.parse(), Err(ValidationError::EmptyLocationSet));
    }

    #[test]
    fn test_implausible_target() {
        let result = GenerationParameters::new(
            date(2024, 7, 1),
            date(2025, 6, 30),
            26.0,
            10.0,
            vec!["BP".to_string()],
        );
        assert_eq!(
            result,
            Err(ValidationError::ImplausibleTarget {
                target: 10.0,
                capacity: 26.0
            })
        );
    }

    #[test]
    fn test_target_equal_to_capacity_is_allowed() {
        let result =
            GenerationParameters::new(date(2024, 7, 1), date(2024, 7, 9), 26.0, 26.0, vec!["BP".to_string()]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_locations_trims() {
        let locations = parse_locations("  Shell, 721 N Tucker  \n\n ZX \r\n");
        assert_eq!(locations, vec!["Shell, 721 N Tucker", "ZX"]);
    }
}

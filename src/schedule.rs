use crate::params::{GenerationParameters, MIN_FILL};
use crate::rng::RandomSource;
use chrono::{Duration, NaiveDate};

/// Shortest gap between two purchases, in days.
pub const MIN_STEP_DAYS: i64 = 2;
/// Longest gap between two purchases, in days.
pub const MAX_STEP_DAYS: i64 = 5;

/// How many purchases the schedule aims for.
///
/// Starts from the count an average fill would need, caps it at one per
/// day, and never goes below what the capacity can physically hold.
pub fn purchase_count(day_count: i64, target_total: f64, max_capacity: f64) -> usize {
    let avg_fill = (MIN_FILL + max_capacity) / 2.0;
    let estimated = (target_total / avg_fill).ceil() as i64;
    let needed = (target_total / max_capacity).ceil() as i64;
    estimated.min(day_count).max(needed).max(1) as usize
}

/// Walks forward from `start` in random 2 to 5 day steps.
///
/// Returns strictly increasing dates inside `[start, end]`. Stops after
/// `count` dates or once the walk passes `end`, so the result may be
/// shorter than `count` on a tight range.
pub fn schedule_dates<R: RandomSource>(
    start: NaiveDate,
    end: NaiveDate,
    count: usize,
    rng: &mut R,
) -> Vec<NaiveDate> {
    // The walk cannot outrun the range, however large `count` is.
    let reachable = ((end - start).num_days().max(0) / MIN_STEP_DAYS + 1) as usize;
    let mut dates = Vec::with_capacity(count.min(reachable));
    let mut current = start;
    while dates.len() < count && current <= end {
        dates.push(current);
        let step = rng.integer_uniform(MIN_STEP_DAYS, MAX_STEP_DAYS);
        current = match current.checked_add_signed(Duration::days(step)) {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Sizes and walks the schedule for `params`.
pub fn schedule<R: RandomSource>(params: &GenerationParameters, rng: &mut R) -> Vec<NaiveDate> {
    let count = purchase_count(params.day_count(), params.target_total, params.max_capacity);
    let dates = schedule_dates(params.start_date, params.end_date, count, rng);
    if dates.len() < count {
        tracing::debug!(
            planned = count,
            scheduled = dates.len(),
            "date range too short for the planned purchase count"
        );
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgSource, ScriptedSource};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_purchase_count_default_scenario() {
        // avg fill 15.5 -> 159 purchases, well under the 364 days available
        assert_eq!(purchase_count(364, 2450.0, 26.0), 159);
    }

    #[test]
    fn test_purchase_count_capped_by_days() {
        assert_eq!(purchase_count(10, 100.0, 26.0), 7);
        assert_eq!(purchase_count(3, 100.0, 26.0), 4);
    }

    #[test]
    fn test_purchase_count_floor() {
        // 10 days allow at most 10, but 500 / 26 needs 20
        assert_eq!(purchase_count(10, 500.0, 26.0), 20);
        assert_eq!(purchase_count(1, 26.0, 26.0), 1);
        assert!(purchase_count(0, 0.5, 26.0) >= 1);
    }

    #[test]
    fn test_schedule_fixed_steps() {
        let mut rng = ScriptedSource::new(vec![0.5], vec![3]);
        let dates = schedule_dates(date(2024, 1, 1), date(2024, 1, 20), 4, &mut rng);
        assert_eq!(
            dates,
            vec![date(2024, 1, 1), date(2024, 1, 4), date(2024, 1, 7), date(2024, 1, 10)]
        );
    }

    #[test]
    fn test_schedule_stops_past_end() {
        let mut rng = ScriptedSource::new(vec![0.5], vec![2]);
        let dates = schedule_dates(date(2024, 1, 1), date(2024, 1, 5), 4, &mut rng);
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 3), date(2024, 1, 5)]);
    }

    #[test]
    fn test_schedule_huge_count_is_bounded_by_range() {
        let mut rng = PcgSource::new(1);
        let dates = schedule_dates(date(2024, 1, 1), date(2024, 3, 1), usize::MAX, &mut rng);
        assert!(!dates.is_empty());
        assert!(dates.len() <= 31);
        assert!(dates.capacity() <= 31);
    }

    #[test]
    fn test_schedule_spacing_and_containment() {
        let start = date(2024, 7, 1);
        let end = date(2025, 6, 30);
        for seed in 0..50 {
            let mut rng = PcgSource::new(seed);
            let dates = schedule_dates(start, end, 159, &mut rng);
            assert_eq!(dates[0], start);
            assert!(dates.iter().all(|d| *d >= start && *d <= end));
            for pair in dates.windows(2) {
                let gap = (pair[1] - pair[0]).num_days();
                assert!((MIN_STEP_DAYS..=MAX_STEP_DAYS).contains(&gap), "gap {}", gap);
            }
        }
    }
}

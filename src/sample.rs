use crate::reconcile::FillBounds;
use crate::rng::RandomSource;

/// Draws `count` independent volumes, uniform over `bounds`.
///
/// Element `i` belongs to scheduled date `i`.
pub fn sample_volumes<R: RandomSource>(count: usize, bounds: FillBounds, rng: &mut R) -> Vec<f64> {
    (0..count).map(|_| rng.uniform(bounds.min, bounds.max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgSource, ScriptedSource};

    #[test]
    fn test_sample_count_and_bounds() {
        let bounds = FillBounds::new(5.0, 26.0);
        let mut rng = PcgSource::new(2024);
        let volumes = sample_volumes(500, bounds, &mut rng);
        assert_eq!(volumes.len(), 500);
        assert!(volumes.iter().all(|v| bounds.contains(*v)));
    }

    #[test]
    fn test_sample_uses_source_in_order() {
        let mut rng = ScriptedSource::new(vec![0.0, 0.5, 0.25], vec![0]);
        let volumes = sample_volumes(3, FillBounds::new(5.0, 25.0), &mut rng);
        assert_eq!(volumes, vec![5.0, 15.0, 10.0]);
    }

    #[test]
    fn test_sample_nothing() {
        let mut rng = PcgSource::new(1);
        assert!(sample_volumes(0, FillBounds::new(5.0, 26.0), &mut rng).is_empty());
    }
}

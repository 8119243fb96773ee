//! Window Statistics

/// Summary of a window of readings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl WindowStats {
    /// Compute statistics over a set of values. Returns `None` for an empty set.
    pub fn compute<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = f64::MIN;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            mean: sum / count as f64,
            min,
            max,
        })
    }

    /// Number of values strictly below `threshold`
    pub fn count_below<I>(values: I, threshold: f64) -> usize
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().filter(|v| *v < threshold).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_and_mean() {
        let stats = WindowStats::compute([80.0, 92.0, 96.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 80.0);
        assert_eq!(stats.max, 96.0);
        assert!((stats.mean - 89.333).abs() < 0.001);
    }

    #[test]
    fn test_empty_values() {
        assert!(WindowStats::compute(std::iter::empty()).is_none());
    }

    #[test]
    fn test_count_below() {
        assert_eq!(WindowStats::count_below([80.0, 92.0, 96.0], 90.0), 1);
        assert_eq!(WindowStats::count_below([90.0, 90.0], 90.0), 0);
    }
}

use super::MedianStrategy;

/// Median by sorting a copy of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortMedian;

impl MedianStrategy for SortMedian {
    fn median(&self, values: &[f64]) -> Option<f64> {
        sort_median(values)
    }
}

/// Sorts a working copy and reads rank `n / 2`, or averages ranks
/// `n / 2 - 1` and `n / 2` when the count is even.
pub fn sort_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_and_even_counts() {
        assert_eq!(sort_median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(sort_median(&[40.0, 10.0, 30.0, 20.0]), Some(25.0));
        assert_eq!(sort_median(&[7.5]), Some(7.5));
        assert_eq!(sort_median(&[]), None);
    }

    #[test]
    fn input_is_left_untouched() {
        let values = [3.0, 1.0, 2.0];
        assert_eq!(SortMedian.median(&values), Some(2.0));
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }
}

use crate::config::BPS_DENOMINATOR;

/// Integer square root via Newton's method. Converges monotonically
/// from above to the floor of the true root.
pub fn integer_sqrt(value: u128) -> u128 {
    if value == 0 {
        return 0;
    }

    let mut x = value;
    let mut y = (x + 1) / 2;

    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }

    x
}

/// Population mean with integer truncation.
pub fn mean(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }

    let sum: u128 = values.iter().map(|&v| v as u128).sum();
    (sum / values.len() as u128) as u64
}

/// Population standard deviation, floored to an integer.
pub fn std_dev(values: &[u64], mean: u64) -> u64 {
    if values.is_empty() {
        return 0;
    }

    let mut sum_squared_diff = 0u128;
    for &value in values {
        let diff = value.abs_diff(mean) as u128;
        sum_squared_diff = sum_squared_diff.saturating_add(diff * diff);
    }

    let variance = sum_squared_diff / values.len() as u128;
    integer_sqrt(variance) as u64
}

/// `numerator * 10_000 / denominator`, truncating. Zero denominator
/// yields zero rather than a fault.
pub fn ratio_bps(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }

    (numerator as u128 * BPS_DENOMINATOR as u128 / denominator as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_sqrt_floor_semantics() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(3), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(8), 2);
        assert_eq!(integer_sqrt(9), 3);
        assert_eq!(integer_sqrt(35), 5);
        assert_eq!(integer_sqrt(36), 6);
        assert_eq!(integer_sqrt(1_000_000), 1_000);
        assert_eq!(integer_sqrt(999_999), 999);
    }

    #[test]
    fn test_integer_sqrt_large_values() {
        // Perfect square near the u64 boundary
        let root = u64::MAX as u128;
        assert_eq!(integer_sqrt(root * root), root);
        assert_eq!(integer_sqrt(root * root - 1), root - 1);
    }

    #[test]
    fn test_mean_truncates() {
        assert_eq!(mean(&[6, 10, 10]), 8); // 26 / 3
        assert_eq!(mean(&[10, 20, 30, 40]), 25);
        assert_eq!(mean(&[]), 0);
    }

    #[test]
    fn test_std_dev_population() {
        // [10, 10] around mean 10 has zero spread
        assert_eq!(std_dev(&[10, 10], 10), 0);

        // [2, 4, 4, 4, 5, 5, 7, 9]: variance 4, stddev 2
        let values = [2, 4, 4, 4, 5, 5, 7, 9];
        let m = mean(&values);
        assert_eq!(m, 5);
        assert_eq!(std_dev(&values, m), 2);
    }

    #[test]
    fn test_ratio_bps() {
        assert_eq!(ratio_bps(4, 10), 4_000);
        assert_eq!(ratio_bps(1, 100), 100);
        assert_eq!(ratio_bps(2, 11), 1_818); // truncated from 1818.18
        assert_eq!(ratio_bps(5, 0), 0);
    }
}

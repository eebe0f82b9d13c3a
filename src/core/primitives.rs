use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Greatest common divisor of two positive floats, tolerant to rounding.
///
/// Values are treated as equal to zero once they drop below
/// `tolerance * max(a, b)`.
#[must_use]
pub fn float_gcd(a: f64, b: f64) -> f64 {
    const RELATIVE_TOLERANCE: f64 = 1e-9;

    let mut a = a.abs();
    let mut b = b.abs();
    let epsilon = a.max(b) * RELATIVE_TOLERANCE;
    if a < b {
        std::mem::swap(&mut a, &mut b);
    }
    while b > epsilon {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Linear blend that returns `from` and `to` exactly at fractions 0 and 1.
#[must_use]
pub fn lerp(from: f64, to: f64, fraction: f64) -> f64 {
    from * (1.0 - fraction) + to * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_of_integral_gaps() {
        assert!((float_gcd(1.0, 2.0) - 1.0).abs() <= 1e-12);
        assert!((float_gcd(6.0, 4.0) - 2.0).abs() <= 1e-12);
        assert!((float_gcd(3.0, 3.0) - 3.0).abs() <= 1e-12);
    }

    #[test]
    fn gcd_tolerates_decimal_noise() {
        let gcd = float_gcd(0.3, 0.1 + 0.2);
        assert!((gcd - 0.3).abs() <= 1e-9);
        let gcd = float_gcd(0.5, 0.2);
        assert!((gcd - 0.1).abs() <= 1e-9);
    }

    #[test]
    fn lerp_hits_endpoints_exactly() {
        assert_eq!(lerp(0.1, 1e16, 1.0), 1e16);
        assert_eq!(lerp(0.1, 1e16, 0.0), 0.1);
        assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    }
}

// src/utils/number_format.rs

/// Format like C's `%e`: six fraction digits and a signed exponent of
/// at least two digits (`1.000000e+00`).
pub fn format_exponential(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.6e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_exponential() {
        assert_eq!(format_exponential(1.0), "1.000000e+00");
        assert_eq!(format_exponential(0.0), "0.000000e+00");
        assert_eq!(format_exponential(-2.5e-7), "-2.500000e-07");
        assert_eq!(format_exponential(123456.0), "1.234560e+05");
        assert_eq!(format_exponential(1.0e123), "1.000000e+123");
        assert_eq!(format_exponential(f64::NAN), "nan");
        assert_eq!(format_exponential(f64::NEG_INFINITY), "-inf");
    }
}

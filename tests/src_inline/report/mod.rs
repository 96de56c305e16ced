use super::*;

#[test]
fn test_format_sig_keeps_trailing_zeros() {
    assert_eq!(format_sig(0.17, 8), "0.17000000");
    assert_eq!(format_sig(0.3 * 0.1 + 0.7 * 0.2, 8), "0.17000000");
    assert_eq!(format_sig(1.0, 8), "1.0000000");
    assert_eq!(format_sig(123.456, 8), "123.45600");
    assert_eq!(format_sig(-0.5, 8), "-0.50000000");
}

#[test]
fn test_format_sig_zero() {
    assert_eq!(format_sig(0.0, 8), "0.0000000");
}

#[test]
fn test_format_sig_small_and_large_use_exponent() {
    assert_eq!(format_sig(1e-7, 8), "1.0000000e-07");
    assert_eq!(format_sig(123456789.0, 8), "1.2345679e+08");
    assert_eq!(format_sig(0.00012345678912, 8), "0.00012345679");
}

#[test]
fn test_format_sig_rounding_carries_exponent() {
    assert_eq!(format_sig(9.999999999, 8), "10.000000");
}

#[test]
fn test_format_sig_non_finite() {
    assert_eq!(format_sig(f64::NAN, 8), "nan");
    assert_eq!(format_sig(f64::INFINITY, 8), "inf");
    assert_eq!(format_sig(f64::NEG_INFINITY, 8), "-inf");
}

#[test]
fn test_format_score_uses_eight_digits() {
    assert_eq!(format_score(0.35), "0.35000000");
}

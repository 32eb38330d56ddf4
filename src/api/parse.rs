//! Lenient number parsing for query and body values
//!
//! Both parsers skip leading whitespace and read the longest numeric prefix,
//! ignoring whatever follows: `"10abc"` is 10, `"abc"` is no number at all.

/// Parse the longest decimal prefix of `input` as a float.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and the literal `Infinity`.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let value = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -value } else { value });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parse the longest base-10 integer prefix of `input`.
///
/// Returns `None` when there are no digits or the value overflows `i64`.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4.5", Some(4.5))]
    #[case("  12", Some(12.0))]
    #[case("10abc", Some(10.0))]
    #[case("-3.25", Some(-3.25))]
    #[case("+7", Some(7.0))]
    #[case(".5", Some(0.5))]
    #[case("5.", Some(5.0))]
    #[case("1e3", Some(1000.0))]
    #[case("2e", Some(2.0))]
    #[case("1.5e-1x", Some(0.15))]
    #[case("abc", None)]
    #[case("", None)]
    #[case(".", None)]
    #[case("-", None)]
    #[case("e5", None)]
    fn test_parse_float_prefix(#[case] input: &str, #[case] expected: Option<f64>) {
        match (parse_float_prefix(input), expected) {
            (Some(got), Some(want)) => {
                assert!((got - want).abs() < 1e-12, "{input}: {got} != {want}");
            }
            (got, want) => assert_eq!(got, want, "{input}"),
        }
    }

    #[test]
    fn test_parse_float_infinity() {
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[rstest]
    #[case("2", Some(2))]
    #[case(" 42", Some(42))]
    #[case("2abc", Some(2))]
    #[case("2.9", Some(2))]
    #[case("-1", Some(-1))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("+", None)]
    #[case("99999999999999999999999", None)]
    fn test_parse_int_prefix(#[case] input: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int_prefix(input), expected);
    }
}

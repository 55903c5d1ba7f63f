use super::Classification;

/// Parses a currency-formatted price such as `"$1,020.50"`.
///
/// `$` and `,` are dropped anywhere in the string, then the longest leading
/// decimal literal is read, so `"$150 est."` yields `150.0`. Returns `None`
/// when no number leads the string.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    parse_leading_decimal(cleaned.trim_start())
}

fn parse_leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

pub fn target_class(from: &str, to: &str) -> Classification {
    if from.is_empty() || to.is_empty() {
        return Classification::Neutral;
    }
    match (parse_price(from), parse_price(to)) {
        (Some(from), Some(to)) => Classification::from_ordering(to.partial_cmp(&from)),
        _ => Classification::Neutral,
    }
}

/// Percentage move from `from` to `to`; `0.0` when it cannot be computed.
pub fn calculate_target_change(from: &str, to: &str) -> f64 {
    if from.is_empty() || to.is_empty() {
        return 0.0;
    }
    let (Some(from), Some(to)) = (parse_price(from), parse_price(to)) else {
        return 0.0;
    };
    if from == 0.0 {
        return 0.0;
    }
    let change = ((to - from) / from) * 100.0;
    if change.is_nan() {
        0.0
    } else {
        change
    }
}

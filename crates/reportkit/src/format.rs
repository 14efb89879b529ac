/// Format a number for display: integers get thousands separators, other
/// values one decimal (also separated).
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 {
        group_thousands(&format!("{:.0}", value))
    } else {
        group_thousands(&format!("{:.1}", value))
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

fn group_thousands(formatted: &str) -> String {
    let (sign, body) = match formatted.strip_prefix('-') {
        // a value that rounds to zero prints without a sign
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => ("", rest),
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_grouped() {
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-4500.0), "-4,500");
    }

    #[test]
    fn fractions_keep_one_decimal() {
        assert_eq!(format_number(1234.56), "1,234.6");
        assert_eq!(format_number(0.26), "0.3");
        assert_eq!(format_percent(12.34), "12.3%");
    }

    #[test]
    fn non_finite_passes_through() {
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn rounding_to_zero_drops_the_sign() {
        assert_eq!(format_number(-0.04), "0.0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_percent(-0.04), "0.0%");
        assert_eq!(format_number(-0.05), "-0.1");
        assert_eq!(format_number(-1234.5), "-1,234.5");
    }
}

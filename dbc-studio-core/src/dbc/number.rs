//! Float formatting for DBC output
//!
//! Every float written to a DBC file (scale, offset, minimum, maximum) goes
//! through [`format_float`]: a general format with 12 significant digits,
//! trailing zeros dropped, switching to exponent notation only when the
//! decimal exponent is below -4 or at least 12. This is the behavior of the
//! C `%.12g` conversion.

/// Significant digits kept in DBC output
pub const SIGNIFICANT_DIGITS: usize = 12;

/// Format a float the way it is written to DBC text
pub fn format_float(value: f64) -> String {
    format_general(value, SIGNIFICANT_DIGITS)
}

/// `%.<precision>g` for an `f64`
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }
    if value == 0.0 {
        let text = if value.is_sign_negative() { "-0" } else { "0" };
        return text.to_string();
    }

    let precision = precision.max(1);

    // Round to the requested significant digits first; the exponent of the
    // rounded value decides between fixed and exponent notation.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Drop trailing zeros after a decimal point, and the point itself if bare
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

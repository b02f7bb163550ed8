//! Human readable formatting of amounts for the plain-text report.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as dollars and cents, e.g. `$1,234.50` or `-$12.30`.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(2)))
    });

    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(2)))
    });

    let formatted_string = match (positive_fmt, negative_fmt) {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        _ if number == 0.0 => return "$0.00".to_owned(),
        (_, Some(fmt)) if number < 0.0 => fmt.fmt_string(number.abs()),
        (Some(fmt), _) if number > 0.0 => fmt.fmt_string(number),
        _ if number < 0.0 => format!("-${:.2}", number.abs()),
        _ => format!("${number:.2}"),
    };

    pad_cents(formatted_string)
}

/// numfmt drops trailing zeros, e.g. "12.30" comes out as "12.3", so put them back.
fn pad_cents(mut formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(point) => {
            for _ in formatted_string.len() - point - 1..2 {
                formatted_string.push('0');
            }
        }
    }

    formatted_string
}

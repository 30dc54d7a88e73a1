//! Price display helpers.

/// Format `amount` as euros in Spanish style, e.g. `1234,50 €` or `12.345,00 €`.
///
/// Thousands are grouped only from five integer digits up; the currency
/// sign follows a non-breaking space.
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (units, fraction) = (cents / 100, cents % 100);

    let digits = units.to_string();
    let grouped = if digits.len() >= 5 {
        group_thousands(&digits)
    } else {
        digits
    };

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped},{fraction:02}\u{a0}€")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

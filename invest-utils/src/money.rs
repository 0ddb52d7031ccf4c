use anyhow::{anyhow, Result};

pub const CENTS_PER_EURO: f64 = 100.0;

/// Parses a decimal amount such as `"20.5"`, `"1 024,75"` or `"12.00 €"`.
///
/// Comma decimals only reach this from single values like `--budget`; catalog rows are split
/// on `,` before their fields are parsed.
pub fn parse_amount(value: &str) -> Result<f64> {
    let cleaned: String = value
        .trim()
        .trim_end_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| anyhow!("Invalid amount ({})", value))?;
    if !amount.is_finite() {
        return Err(anyhow!("Invalid amount ({})", value));
    }
    Ok(amount)
}

/// Converts euros to whole cents, rounding to the nearest cent.
pub fn euros_to_cents(euros: f64) -> Result<u64> {
    if !euros.is_finite() || euros < 0.0 {
        return Err(anyhow!("Amount ({}) must be a non-negative number", euros));
    }
    let cents = (euros * CENTS_PER_EURO).round();
    if cents > u64::MAX as f64 {
        return Err(anyhow!("Amount ({}) is too large", euros));
    }
    Ok(cents as u64)
}

pub fn parse_euros(value: &str) -> Result<u64> {
    euros_to_cents(parse_amount(value)?)
}

/// Parses a percentage with or without a trailing `%` and returns it as a ratio.
pub fn parse_ratio(value: &str) -> Result<f64> {
    Ok(parse_amount(value.trim().trim_end_matches('%'))? / 100.0)
}

pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

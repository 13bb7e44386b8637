use std::{collections::HashSet, str::FromStr};

use anyhow::*;
use rust_decimal::Decimal;

/// 數字欄位中需要移除的字元，包含千分位符號
const NUMBER_ESCAPE_CHAR: &[char] = &[',', ' ', '"', '\n', '\t', '\u{a0}', '$'];

/// Parses a decimal value from a given string.
///
/// This function accepts a string representation of a decimal number,
/// potentially containing commas as thousands separators and other escape characters,
/// and attempts to convert it into a `Decimal`. If the conversion fails, an error is returned.
///
/// # Arguments
///
/// * `s`: A string slice containing the representation of a decimal number
///         that may include commas as thousands separators and other escape characters.
/// * `escape_chars`: Optional characters to be escaped from the input string.
///
/// # Returns
///
/// * `Result<Decimal>`: The parsed `Decimal` value if successful, or an error
///                      if the conversion fails.
///
/// # Example
///
/// ```
/// use stock_fundamentals::util::text::parse_decimal;
///
/// let s = "1,234.56";
/// let decimal_value = parse_decimal(s, None).unwrap();
/// assert_eq!(decimal_value.to_string(), "1234.56");
/// ```
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal> {
    let cleaned = clean_escape_chars(s, escape_chars);
    Decimal::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as Decimal because {:?}", cleaned, why))
}

/// Removes a set of escape characters from a given string.
///
/// The default number escape characters (thousands separators, spaces, quotes)
/// are always removed; `escape_chars` adds more.
pub fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}

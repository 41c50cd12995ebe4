//! Money and quantity fields arrive as JSON numbers or as decimal strings
//! (`"120.50"`, Prisma `Decimal`). Use with
//! `#[serde(default, deserialize_with = "crate::utils::number::flexible_f64")]`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// `Option<f64>` from a number, a decimal string, `null` or `""`.
pub fn flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .replace(',', ".")
            .parse()
            .map(Some)
            .map_err(|_| Error::custom(format!("Invalid number: {s}"))),
    }
}

/// Format a value as Brazilian currency, e.g. `R$ 1.234,50`.
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round();
    let negative = cents < 0.0;
    #[allow(clippy::cast_possible_truncation)]
    let cents = cents.abs() as i64;
    let (units, frac) = (cents / 100, cents % 100);

    let digits = units.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{}R$ {grouped},{frac:02}", if negative { "-" } else { "" })
}

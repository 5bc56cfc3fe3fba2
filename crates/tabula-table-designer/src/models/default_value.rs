//! Column default values
//!
//! Defaults carry an explicit literal kind so user input is never spliced
//! into DDL unescaped. Only `Expression` is emitted verbatim.

use serde::{Deserialize, Serialize};

/// A column default, tagged by how it must be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DefaultValue {
    /// Text literal, rendered single-quoted with embedded quotes doubled
    String(String),
    /// Numeric literal, rendered as-is once validated
    Number(String),
    /// Raw SQL expression such as `CURRENT_TIMESTAMP` or `nextval('seq')`
    Expression(String),
}

impl DefaultValue {
    pub fn string(value: impl Into<String>) -> Self {
        DefaultValue::String(value.into())
    }

    pub fn number(value: impl Into<String>) -> Self {
        DefaultValue::Number(value.into())
    }

    pub fn expression(value: impl Into<String>) -> Self {
        DefaultValue::Expression(value.into())
    }

    /// Whether the value can be emitted without breaking out of its literal
    pub fn is_valid(&self) -> bool {
        match self {
            DefaultValue::Number(text) => is_numeric_literal(text),
            DefaultValue::Expression(text) => !text.trim().is_empty(),
            DefaultValue::String(_) => true,
        }
    }

    /// SQL text for a `DEFAULT` clause
    pub fn to_sql(&self) -> String {
        match self {
            DefaultValue::String(text) => quote_string_literal(text),
            DefaultValue::Number(text) => text.trim().to_string(),
            DefaultValue::Expression(text) => text.trim().to_string(),
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes
pub fn quote_string_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn is_numeric_literal(text: &str) -> bool {
    let text = text.trim();
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next().unwrap_or("");
    let digits_ok = (!whole.is_empty() || !fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit());

    let exponent_ok = match exponent {
        None => true,
        Some(exp) => {
            let exp = exp
                .strip_prefix('-')
                .or_else(|| exp.strip_prefix('+'))
                .unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    };

    digits_ok && exponent_ok
}

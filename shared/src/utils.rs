// Number and currency formatting for summary output.
// The convention is always passed in explicitly; nothing here reads the process locale.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberConvention {
    pub grouping: char,
    pub decimal: char,
    pub currency_prefix: String,
}

impl NumberConvention {
    /// pt-BR: `R$ 1.234,56`
    pub fn brazilian() -> Self {
        Self { grouping: '.', decimal: ',', currency_prefix: "R$".to_string() }
    }

    /// en-US: `$ 1,234.56`
    pub fn us() -> Self {
        Self { grouping: ',', decimal: '.', currency_prefix: "$".to_string() }
    }
}

impl Default for NumberConvention {
    fn default() -> Self {
        Self::brazilian()
    }
}

// Formats `value` rounded to `decimals` places with thousands grouping
pub fn format_number(value: f64, decimals: usize, convention: &NumberConvention) -> String {
    let rounded = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rounded.as_str(), None),
    };

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    // "-0,00" is never wanted
    let is_zero = rounded.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, convention.grouping));
    if let Some(frac) = frac_part {
        out.push(convention.decimal);
        out.push_str(frac);
    }
    out
}

// Currency with two decimal places, prefix before the sign-stripped amount
pub fn format_currency(value: f64, convention: &NumberConvention) -> String {
    let amount = format_number(value.abs(), 2, convention);
    let sign = if value < 0.0 && amount.bytes().any(|b| (b'1'..=b'9').contains(&b)) { "-" } else { "" };
    if convention.currency_prefix.is_empty() {
        format!("{}{}", sign, amount)
    } else {
        format!("{}{} {}", sign, convention.currency_prefix, amount)
    }
}

fn group_digits(digits: &str, grouping: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(grouping);
        }
        grouped.push(ch);
    }
    grouped
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Display currencies offered by the results page. Amounts are quoted in
/// USD and converted with a fixed table; there is no live rate feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Aed,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Inr, Currency::Aed, Currency::Eur];

    /// Units of this currency per one USD.
    pub fn rate(self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Inr => 83.0,
            Currency::Aed => 3.67,
            Currency::Eur => 0.92,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
            // en-US renders dirham amounts with the ISO code, not a sign
            Currency::Aed => "AED\u{a0}",
            Currency::Eur => "€",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Aed => "AED",
            Currency::Eur => "EUR",
        }
    }

    /// Convert and render a USD amount, rounded to whole units
    /// (`1234.4` in USD renders as `$1,234`).
    pub fn format_price(self, amount: f64) -> String {
        let amount = if amount.is_nan() { 0.0 } else { amount };
        let converted = (amount * self.rate()).round();
        let sign = if converted < 0.0 { "-" } else { "" };
        format!("{}{}{}", sign, self.symbol(), group_thousands(converted.abs()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::ValidationError(format!("unsupported currency: {}", s)))
    }
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "∞".to_string();
    }
    let digits = format!("{:.0}", value);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Supported currencies

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A currency from the fixed registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CurrencyCode {
    code: &'static str,
    symbol: Option<&'static str>,
    minor_units: u32,
}

const fn currency(
    code: &'static str,
    symbol: Option<&'static str>,
    minor_units: u32,
) -> CurrencyCode {
    CurrencyCode {
        code,
        symbol,
        minor_units,
    }
}

static REGISTRY: [CurrencyCode; 32] = [
    currency("USD", Some("$"), 2),
    currency("EUR", Some("€"), 2),
    currency("GBP", Some("£"), 2),
    currency("JPY", Some("¥"), 0),
    currency("AUD", Some("A$"), 2),
    currency("CAD", Some("CA$"), 2),
    currency("CHF", None, 2),
    currency("CNY", Some("CN¥"), 2),
    currency("HKD", Some("HK$"), 2),
    currency("NZD", Some("NZ$"), 2),
    currency("SEK", None, 2),
    currency("NOK", None, 2),
    currency("DKK", None, 2),
    currency("PLN", None, 2),
    currency("CZK", None, 2),
    currency("HUF", None, 2),
    currency("RON", None, 2),
    currency("BGN", None, 2),
    currency("ISK", None, 0),
    currency("TRY", None, 2),
    currency("INR", Some("₹"), 2),
    currency("IDR", None, 2),
    currency("ILS", Some("₪"), 2),
    currency("KRW", Some("₩"), 0),
    currency("MXN", Some("MX$"), 2),
    currency("MYR", None, 2),
    currency("PHP", Some("₱"), 2),
    currency("SGD", None, 2),
    currency("THB", None, 2),
    currency("ZAR", None, 2),
    currency("BRL", Some("R$"), 2),
    currency("KWD", None, 3),
];

/// All supported currencies, in the order the selection controls list them.
pub fn list_currencies() -> &'static [CurrencyCode] {
    &REGISTRY
}

impl CurrencyCode {
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Display symbol, falling back to the ISO code when the currency has none.
    pub fn symbol(&self) -> &'static str {
        self.symbol.unwrap_or(self.code)
    }

    pub fn has_symbol(&self) -> bool {
        self.symbol.is_some()
    }

    /// Number of digits after the decimal point in the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        self.minor_units
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        list_currencies()
            .iter()
            .find(|c| c.code() == wanted)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unsupported currency: {}", s))
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_is_ordered_and_unique() {
        let currencies = list_currencies();
        assert!(!currencies.is_empty());
        assert_eq!(currencies[0].code(), "USD");
        assert_eq!(currencies[1].code(), "EUR");

        let unique: HashSet<_> = currencies.iter().map(|c| c.code()).collect();
        assert_eq!(unique.len(), currencies.len());

        // Stable across calls
        let again: Vec<_> = list_currencies().iter().map(|c| c.code()).collect();
        let first: Vec<_> = currencies.iter().map(|c| c.code()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_parse_currency_code() {
        let eur: CurrencyCode = "eur".parse().unwrap();
        assert_eq!(eur.code(), "EUR");
        assert_eq!(eur.symbol(), "€");
        assert_eq!(eur.to_string(), "EUR");

        let chf: CurrencyCode = " CHF ".parse().unwrap();
        assert_eq!(chf.symbol(), "CHF");
        assert!(!chf.has_symbol());

        let result = "XYZ".parse::<CurrencyCode>();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "Unsupported currency: XYZ");
    }

    #[test]
    fn test_minor_units() {
        let jpy: CurrencyCode = "JPY".parse().unwrap();
        let kwd: CurrencyCode = "KWD".parse().unwrap();
        assert_eq!(jpy.minor_units(), 0);
        assert_eq!(kwd.minor_units(), 3);
    }

    #[test]
    fn test_currency_code_serde() {
        let code: CurrencyCode = serde_yaml::from_str("gbp").unwrap();
        assert_eq!(code.code(), "GBP");
        assert_eq!(serde_yaml::to_string(&code).unwrap().trim(), "GBP");
        let err = serde_yaml::from_str::<CurrencyCode>("ABC").unwrap_err();
        assert!(err.to_string().contains("Unsupported currency: ABC"));
    }
}

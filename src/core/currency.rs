use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies whose home markets trade Sunday to Thursday.
///
/// Every other currency follows the Monday to Friday week.
pub const SUNDAY_TO_THURSDAY_CURRENCIES: &[&str] = &["AED", "SAR"];

/// ISO 4217-style currency code.
///
/// Codes are normalised to upper case on construction, so `"aed"` and
/// `"AED"` name the same currency. The code is only used to pick the
/// weekly market convention of an instruction; amounts are never
/// converted between currencies.
///
/// # Examples
///
/// ```
/// use fx_settlement_reporting::core::currency::CurrencyCode;
///
/// let aed = CurrencyCode::new("aed");
/// assert_eq!(aed.as_str(), "AED");
/// assert!(aed.is_sunday_to_thursday_market());
/// assert!(!CurrencyCode::new("USD").is_sunday_to_thursday_market());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        let code: String = code.into();
        Self(code.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the home market of this currency trades Sunday to Thursday.
    pub fn is_sunday_to_thursday_market(&self) -> bool {
        SUNDAY_TO_THURSDAY_CURRENCIES.contains(&self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

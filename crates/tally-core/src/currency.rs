//! Built-in currency table.
//!
//! Display metadata only: tally does no conversion between currencies, and an
//! account's currency is just the symbol used when rendering its amounts.

/// Display metadata for a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// ISO-style code, e.g. "USD".
    pub code: &'static str,
    /// Display symbol, e.g. "$".
    pub symbol: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

/// The built-in currencies offered when creating an account.
pub const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar" },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro" },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound" },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    CurrencyInfo { code: "CHF", symbol: "Fr", name: "Swiss Franc" },
    CurrencyInfo { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee" },
    CurrencyInfo { code: "BRL", symbol: "R$", name: "Brazilian Real" },
];

/// Look up a currency by code.
#[must_use]
pub fn currency_for(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES.iter().find(|c| c.code == code)
}

/// The display symbol for a code, falling back to the code itself.
#[must_use]
pub fn symbol_for(code: &str) -> &str {
    currency_for(code).map_or(code, |c| c.symbol)
}

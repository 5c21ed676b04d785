use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Currency {
    VAC, // Virtual auction currency
    SEK, // Swedish Krona
    DKK, // Danish Krone
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::VAC => write!(f, "VAC"),
            Currency::SEK => write!(f, "SEK"),
            Currency::DKK => write!(f, "DKK"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VAC" => Ok(Currency::VAC),
            "SEK" => Ok(Currency::SEK),
            "DKK" => Ok(Currency::DKK),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

pub type AmountValue = i64;

/// A non-negative sum of money in whole units of a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amount {
    currency: Currency,
    value: AmountValue,
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer {
        serializer.serialize_str(&self.to_string())
    }
}
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Amount::from_str(&text)
            .map_err(serde::de::Error::custom)
    }
}

impl Amount {
    pub fn new(currency: Currency, value: AmountValue) -> Self {
        Amount { currency, value }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn value(&self) -> AmountValue {
        self.value
    }

    /// Picks the larger of two amounts. Amounts in different currencies are
    /// not comparable.
    pub fn max(self, other: Self) -> Result<Amount, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(self.currency, other.currency));
        }
        Ok(if other.value > self.value { other } else { self })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Cannot combine amounts with different currencies: {0} and {1}")]
    CurrencyMismatch(Currency, Currency),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency, self.value)
    }
}

impl FromStr for Amount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let currency_end = s.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(s.len());
        if currency_end == 0 {
            return Err("Invalid amount format: no currency".to_string());
        }

        let currency_str = &s[..currency_end];
        let currency = Currency::from_str(currency_str)?;

        let value_str = &s[currency_end..];
        let value = value_str.parse::<AmountValue>()
            .map_err(|_| format!("Invalid amount value: {}", value_str))?;
        if value < 0 {
            return Err(format!("Amount cannot be negative: {}", value));
        }

        Ok(Amount { currency, value })
    }
}

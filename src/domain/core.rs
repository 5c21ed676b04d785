use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type UserId = String;
pub type AuctionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub name: String,
}

impl User {
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        User {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.user_id, self.name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("Auction has been closed: {0}")]
    AuctionClosed(AuctionId),

    #[error("Bid amount cannot be negative: {1} for auction {0}")]
    NegativeBid(AuctionId, crate::money::Amount),

    #[error("Bid currency {1} does not match auction currency {2} for auction {0}")]
    CurrencyMismatch(AuctionId, crate::money::Currency, crate::money::Currency),
}

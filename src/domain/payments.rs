use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::core::AuctionId;

/// What the winner of a closed auction owes, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "auctionId")]
    pub auction_id: AuctionId,
    pub amount: Amount,
    pub date: DateTime<Utc>,
}

impl Payment {
    pub fn new(auction_id: AuctionId, amount: Amount, date: DateTime<Utc>) -> Self {
        Payment { auction_id, amount, date }
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use super::bids::Bid;
use super::core::{AuctionId, Errors, User};
use crate::money::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    #[serde(rename = "id")]
    pub auction_id: AuctionId,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    bids: Vec<Bid>,
    #[serde(default)]
    closed: bool,
}

impl Auction {
    pub fn new(auction_id: AuctionId, description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Auction {
            auction_id,
            description: description.into(),
            created_at,
            bids: Vec::new(),
            closed: false,
        }
    }

    /// Bids in the order they were placed.
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Stops the auction from accepting bids. There is no way back.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    pub fn place_bid(&mut self, bid: Bid) -> Result<(), Errors> {
        if self.closed {
            return Err(Errors::AuctionClosed(self.auction_id));
        }
        if bid.bid_amount.value() < 0 {
            return Err(Errors::NegativeBid(self.auction_id, bid.bid_amount));
        }
        if let Some(first) = self.bids.first() {
            let expected = first.bid_amount.currency();
            let actual = bid.bid_amount.currency();
            if expected != actual {
                return Err(Errors::CurrencyMismatch(self.auction_id, actual, expected));
            }
        }
        self.bids.push(bid);
        Ok(())
    }
}

/// Fluent helper for putting together auctions in fixtures and seed files.
#[derive(Debug, Clone)]
pub struct AuctionBuilder {
    auction_id: AuctionId,
    description: String,
    created_at: DateTime<Utc>,
    bids: Vec<Bid>,
    closed: bool,
}

impl Default for AuctionBuilder {
    fn default() -> Self {
        AuctionBuilder {
            auction_id: 0,
            description: String::new(),
            created_at: Utc::now(),
            bids: Vec::new(),
            closed: false,
        }
    }
}

impl AuctionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, auction_id: AuctionId) -> Self {
        self.auction_id = auction_id;
        self
    }

    pub fn for_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn bid(mut self, bidder: User, amount: Amount) -> Self {
        self.bids.push(Bid::new(bidder, amount));
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn build(self) -> Result<Auction, Errors> {
        let mut auction = Auction::new(self.auction_id, self.description, self.created_at);
        for bid in self.bids {
            auction.place_bid(bid)?;
        }
        if self.closed {
            auction.close();
        }
        Ok(auction)
    }
}

pub mod json_file;
pub mod memory;

use serde::{Deserialize, Serialize};
use crate::domain::{Auction, AuctionId, Payment, PersistenceError};

pub use self::json_file::JsonFileStore;
pub use self::memory::MemoryStore;

/// Everything a store keeps, in the shape written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub auctions: Vec<Auction>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl StoreData {
    pub fn currently_open(&self) -> Vec<Auction> {
        self.auctions.iter().filter(|a| !a.is_closed()).cloned().collect()
    }

    pub fn closed(&self) -> Vec<Auction> {
        self.auctions.iter().filter(|a| a.is_closed()).cloned().collect()
    }

    pub fn update(&mut self, auction: &Auction) -> Result<(), PersistenceError> {
        let stored = self
            .auctions
            .iter_mut()
            .find(|a| a.auction_id == auction.auction_id)
            .ok_or(PersistenceError::UnknownAuction(auction.auction_id))?;
        *stored = auction.clone();
        Ok(())
    }

    pub fn save(&mut self, payment: &Payment) {
        self.payments.push(payment.clone());
    }

    pub fn payment_for(&self, auction_id: AuctionId) -> Option<Payment> {
        self.payments.iter().find(|p| p.auction_id == auction_id).cloned()
    }
}

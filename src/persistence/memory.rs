use std::sync::{Mutex, MutexGuard};
use crate::domain::{Auction, AuctionId, AuctionRepository, Payment, PaymentRepository, PersistenceError};
use super::StoreData;

/// Keeps auctions and payments in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn with_auctions(auctions: Vec<Auction>) -> Self {
        MemoryStore {
            data: Mutex::new(StoreData { auctions, payments: Vec::new() }),
        }
    }

    pub fn snapshot(&self) -> Result<StoreData, PersistenceError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreData>, PersistenceError> {
        self.data
            .lock()
            .map_err(|e| PersistenceError::Storage(format!("Store lock poisoned: {}", e)))
    }
}

impl AuctionRepository for MemoryStore {
    fn currently_open(&self) -> Result<Vec<Auction>, PersistenceError> {
        Ok(self.lock()?.currently_open())
    }

    fn closed(&self) -> Result<Vec<Auction>, PersistenceError> {
        Ok(self.lock()?.closed())
    }

    fn update(&self, auction: &Auction) -> Result<(), PersistenceError> {
        self.lock()?.update(auction)
    }
}

impl PaymentRepository for MemoryStore {
    fn save(&self, payment: &Payment) -> Result<(), PersistenceError> {
        self.lock()?.save(payment);
        Ok(())
    }

    fn payment_for(&self, auction_id: AuctionId) -> Result<Option<Payment>, PersistenceError> {
        Ok(self.lock()?.payment_for(auction_id))
    }
}

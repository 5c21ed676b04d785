#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use super::auctions::Auction;
use super::core::AuctionId;
use super::payments::Payment;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Unknown auction: {0}")]
    UnknownAuction(AuctionId),

    #[error("Storage failure: {0}")]
    Storage(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to notify about auction {auction_id}: {reason}")]
pub struct NotificationError {
    pub auction_id: AuctionId,
    pub reason: String,
}

#[cfg_attr(test, automock)]
pub trait AuctionRepository {
    /// Auctions that are still accepting bids, in storage order.
    fn currently_open(&self) -> Result<Vec<Auction>, PersistenceError>;
    fn closed(&self) -> Result<Vec<Auction>, PersistenceError>;
    fn update(&self, auction: &Auction) -> Result<(), PersistenceError>;
}

#[cfg_attr(test, automock)]
pub trait PaymentRepository {
    fn save(&self, payment: &Payment) -> Result<(), PersistenceError>;
    fn payment_for(&self, auction_id: AuctionId) -> Result<Option<Payment>, PersistenceError>;
}

#[cfg_attr(test, automock)]
pub trait Notifier {
    fn notify(&self, auction: &Auction) -> Result<(), NotificationError>;
}

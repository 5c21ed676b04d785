use log::info;
use std::sync::Mutex;
use crate::domain::{Auction, AuctionId, NotificationError, Notifier};

/// Writes a log record for each closed auction in place of sending mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, auction: &Auction) -> Result<(), NotificationError> {
        info!(
            "Auction {} ({}) has closed with {} bids",
            auction.auction_id,
            auction.description,
            auction.bids().len()
        );
        Ok(())
    }
}

/// Remembers which auctions it was asked to announce, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<AuctionId>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<AuctionId> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, auction: &Auction) -> Result<(), NotificationError> {
        let mut sent = self.sent.lock().map_err(|e| NotificationError {
            auction_id: auction.auction_id,
            reason: e.to_string(),
        })?;
        sent.push(auction.auction_id);
        Ok(())
    }
}

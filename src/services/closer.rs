use chrono::Duration;
use log::{debug, info, warn};
use thiserror::Error;
use crate::domain::{
    Auction, AuctionId, AuctionRepository, Clock, NotificationError, Notifier, PersistenceError,
    SystemClock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloserOptions {
    /// Minimum age, inclusive, at which an open auction is closed.
    pub close_after: Duration,
}

impl Default for CloserOptions {
    fn default() -> Self {
        CloserOptions { close_after: Duration::days(7) }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClosingFailure {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

/// Outcome of a single closing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosingReport {
    pub closed: usize,
    pub failures: Vec<(AuctionId, ClosingFailure)>,
}

pub struct AuctionCloser<'a> {
    auctions: &'a dyn AuctionRepository,
    notifier: &'a dyn Notifier,
    clock: Box<dyn Clock + 'a>,
    options: CloserOptions,
    total_closed: usize,
}

impl<'a> AuctionCloser<'a> {
    pub fn new(auctions: &'a dyn AuctionRepository, notifier: &'a dyn Notifier) -> Self {
        AuctionCloser {
            auctions,
            notifier,
            clock: Box::new(SystemClock),
            options: CloserOptions::default(),
            total_closed: 0,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_options(mut self, options: CloserOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of auctions closed by the most recent call to [`close`](Self::close).
    pub fn total_closed(&self) -> usize {
        self.total_closed
    }

    /// Closes every open auction that has reached the age threshold.
    ///
    /// A failure to persist or notify one auction is recorded in the report
    /// and the pass moves on to the next auction. Only failing to list the
    /// open auctions aborts the run.
    pub fn close(&mut self) -> Result<ClosingReport, PersistenceError> {
        self.total_closed = 0;
        let now = self.clock.now();
        let mut report = ClosingReport::default();

        for mut auction in self.auctions.currently_open()? {
            if auction.age(now) < self.options.close_after {
                debug!("Auction {} is still running", auction.auction_id);
                continue;
            }

            auction.close();
            report.closed += 1;

            if let Err(failure) = self.persist_and_notify(&auction) {
                warn!("Closing auction {} did not complete: {}", auction.auction_id, failure);
                report.failures.push((auction.auction_id, failure));
            }
        }

        self.total_closed = report.closed;
        info!("Closed {} auctions ({} with failures)", report.closed, report.failures.len());
        Ok(report)
    }

    fn persist_and_notify(&self, auction: &Auction) -> Result<(), ClosingFailure> {
        self.auctions.update(auction)?;
        info!("Closed auction {} ({})", auction.auction_id, auction.description);
        self.notifier.notify(auction)?;
        Ok(())
    }
}

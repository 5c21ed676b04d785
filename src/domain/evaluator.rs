use thiserror::Error;
use crate::money::{Amount, MoneyError};
use super::auctions::Auction;
use super::bids::Bid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("No bids to evaluate")]
    NoBids,

    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Decides what an auction was won for: the highest offer, whoever made it
/// and whenever it was placed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    pub fn winning_amount(&self, bids: &[Bid]) -> Result<Amount, EvaluationError> {
        let (first, rest) = bids.split_first().ok_or(EvaluationError::NoBids)?;
        rest.iter().try_fold(first.bid_amount, |highest, bid| -> Result<Amount, EvaluationError> {
            Ok(highest.max(bid.bid_amount)?)
        })
    }

    pub fn evaluate(&self, auction: &Auction) -> Result<Amount, EvaluationError> {
        self.winning_amount(auction.bids())
    }
}

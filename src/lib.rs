pub mod domain;
pub mod money;
pub mod notify;
pub mod persistence;
pub mod services;

pub use domain::*;
pub use money::*;
pub use services::{AuctionCloser, CloserOptions, ClosingFailure, ClosingReport, GenerationError, PaymentGenerator, payment_date};

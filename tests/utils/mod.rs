use auction_batch::domain::{Auction, AuctionBuilder, AuctionId, User};
use auction_batch::money::{Amount, Currency};
use chrono::{DateTime, Duration, TimeZone, Utc};
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

// Sample data for tests
pub fn sample_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2012, 4, 10, 8, 28, 0).unwrap()
}

pub fn sample_saturday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2012, 4, 7, 8, 28, 0).unwrap()
}

pub fn long_ago() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1999, 2, 20, 0, 0, 0).unwrap()
}

pub fn yesterday() -> DateTime<Utc> {
    sample_now() - Duration::days(1)
}

pub fn jose() -> User {
    User::new("jose", "José da Silva")
}

pub fn maria() -> User {
    User::new("maria", "Maria Pereira")
}

pub fn sek(value: i64) -> Amount {
    Amount::new(Currency::SEK, value)
}

pub fn open_auction(auction_id: AuctionId, description: &str, created_at: DateTime<Utc>) -> Auction {
    AuctionBuilder::new()
        .with_id(auction_id)
        .for_description(description)
        .created_at(created_at)
        .bid(jose(), sek(2000))
        .bid(maria(), sek(2500))
        .build()
        .unwrap()
}

pub fn closed_auction(auction_id: AuctionId, description: &str) -> Auction {
    AuctionBuilder::new()
        .with_id(auction_id)
        .for_description(description)
        .created_at(long_ago())
        .bid(jose(), sek(2000))
        .bid(maria(), sek(2500))
        .closed()
        .build()
        .unwrap()
}

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use log::{debug, info};
use thiserror::Error;
use crate::domain::{
    AuctionId, AuctionRepository, Clock, EvaluationError, Evaluator, Payment, PaymentRepository,
    PersistenceError, SystemClock,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Cannot evaluate auction {0}: {1}")]
    Evaluation(AuctionId, EvaluationError),
}

/// Payments fall due on the day they are generated, except that Saturday
/// rolls forward to Monday. Sunday is left as is.
pub fn payment_date(now: DateTime<Utc>) -> DateTime<Utc> {
    if now.weekday() == Weekday::Sat {
        now + Duration::days(2)
    } else {
        now
    }
}

pub struct PaymentGenerator<'a> {
    auctions: &'a dyn AuctionRepository,
    payments: &'a dyn PaymentRepository,
    evaluator: Evaluator,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> PaymentGenerator<'a> {
    pub fn new(
        auctions: &'a dyn AuctionRepository,
        payments: &'a dyn PaymentRepository,
        evaluator: Evaluator,
    ) -> Self {
        PaymentGenerator {
            auctions,
            payments,
            evaluator,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Creates one payment for each closed auction that does not have one yet
    /// and returns what was saved.
    ///
    /// Stops at the first auction that cannot be evaluated or saved; payments
    /// saved before that point stay saved.
    pub fn generate(&self) -> Result<Vec<Payment>, GenerationError> {
        let date = payment_date(self.clock.now());
        let mut generated = Vec::new();

        for auction in self.auctions.closed()? {
            if self.payments.payment_for(auction.auction_id)?.is_some() {
                debug!("Auction {} already has a payment", auction.auction_id);
                continue;
            }

            let amount = self
                .evaluator
                .evaluate(&auction)
                .map_err(|e| GenerationError::Evaluation(auction.auction_id, e))?;
            let payment = Payment::new(auction.auction_id, amount, date);
            self.payments.save(&payment)?;
            info!("Generated payment of {} for auction {} due {}", amount, auction.auction_id, date.date_naive());
            generated.push(payment);
        }

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Auction, AuctionBuilder, FixedClock, MockAuctionRepository, MockPaymentRepository, User};
    use crate::money::{Amount, Currency};
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use std::sync::{Arc, Mutex};

    fn sek(value: i64) -> Amount {
        Amount::new(Currency::SEK, value)
    }

    fn playstation(auction_id: AuctionId) -> Auction {
        AuctionBuilder::new()
            .with_id(auction_id)
            .for_description("Playstation")
            .bid(User::new("jose", "José da Silva"), sek(2000))
            .bid(User::new("maria", "Maria Pereira"), sek(2500))
            .closed()
            .build()
            .unwrap()
    }

    fn capture_saves(payments: &mut MockPaymentRepository) -> Arc<Mutex<Vec<Payment>>> {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = saved.clone();
        payments.expect_save().returning(move |payment| {
            sink.lock().unwrap().push(payment.clone());
            Ok(())
        });
        saved
    }

    #[test]
    fn saturday_moves_to_monday() {
        let saturday = Utc.with_ymd_and_hms(2012, 4, 7, 15, 30, 0).unwrap();
        let monday = Utc.with_ymd_and_hms(2012, 4, 9, 15, 30, 0).unwrap();
        assert_eq!(payment_date(saturday), monday);
        assert_eq!(payment_date(saturday).weekday(), Weekday::Mon);
    }

    #[test]
    fn other_days_are_unchanged() {
        for day in 8..=13 {
            let now = Utc.with_ymd_and_hms(2012, 4, day, 9, 0, 0).unwrap();
            assert_eq!(payment_date(now), now, "{}", now.weekday());
        }
    }

    #[test]
    fn generates_payment_for_the_highest_bid() {
        let mut auctions = MockAuctionRepository::new();
        auctions.expect_closed().return_once(|| Ok(vec![playstation(1)]));
        let mut payments = MockPaymentRepository::new();
        payments.expect_payment_for().with(eq(1)).returning(|_| Ok(None));
        let saved = capture_saves(&mut payments);

        let generator = PaymentGenerator::new(&auctions, &payments, Evaluator::new());
        generator.generate().unwrap();

        let saved = saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].amount, sek(2500));
        assert_eq!(saved[0].auction_id, 1);
    }

    #[test]
    fn generated_on_a_saturday_is_due_monday() {
        let saturday = Utc.with_ymd_and_hms(2012, 4, 7, 0, 0, 0).unwrap();
        let mut auctions = MockAuctionRepository::new();
        auctions.expect_closed().return_once(|| Ok(vec![playstation(1)]));
        let mut payments = MockPaymentRepository::new();
        payments.expect_payment_for().returning(|_| Ok(None));
        let saved = capture_saves(&mut payments);

        PaymentGenerator::new(&auctions, &payments, Evaluator::new())
            .with_clock(FixedClock::new(saturday))
            .generate()
            .unwrap();

        let saved = saved.lock().unwrap();
        assert_eq!(saved[0].date.weekday(), Weekday::Mon);
        assert_eq!(saved[0].date.day(), 9);
    }

    #[test]
    fn skips_auctions_that_already_have_a_payment() {
        let now = Utc.with_ymd_and_hms(2012, 4, 10, 0, 0, 0).unwrap();
        let mut auctions = MockAuctionRepository::new();
        auctions.expect_closed().return_once(|| Ok(vec![playstation(1), playstation(2)]));
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_payment_for()
            .with(eq(1))
            .returning(move |id| Ok(Some(Payment::new(id, Amount::new(Currency::SEK, 2500), now))));
        payments.expect_payment_for().with(eq(2)).returning(|_| Ok(None));
        let saved = capture_saves(&mut payments);

        let generated = PaymentGenerator::new(&auctions, &payments, Evaluator::new())
            .with_clock(FixedClock::new(now))
            .generate()
            .unwrap();

        assert_eq!(generated, vec![Payment::new(2, sek(2500), now)]);
        assert_eq!(saved.lock().unwrap().len(), 1);
    }

    #[test]
    fn stops_at_the_first_failed_save() {
        let mut auctions = MockAuctionRepository::new();
        auctions.expect_closed().return_once(|| Ok(vec![playstation(1), playstation(2)]));
        let mut payments = MockPaymentRepository::new();
        payments.expect_payment_for().with(eq(1)).times(1).returning(|_| Ok(None));
        payments.expect_payment_for().with(eq(2)).never();
        payments
            .expect_save()
            .times(1)
            .returning(|_| Err(PersistenceError::Storage("locked".to_string())));

        let result = PaymentGenerator::new(&auctions, &payments, Evaluator::new()).generate();

        assert_eq!(
            result,
            Err(GenerationError::Persistence(PersistenceError::Storage("locked".to_string())))
        );
    }

    #[test]
    fn auction_without_bids_fails_generation() {
        let empty = AuctionBuilder::new().with_id(5).for_description("Bike").closed().build().unwrap();
        let mut auctions = MockAuctionRepository::new();
        auctions.expect_closed().return_once(move || Ok(vec![empty]));
        let mut payments = MockPaymentRepository::new();
        payments.expect_payment_for().returning(|_| Ok(None));
        payments.expect_save().never();

        let result = PaymentGenerator::new(&auctions, &payments, Evaluator::new()).generate();

        assert_eq!(result, Err(GenerationError::Evaluation(5, EvaluationError::NoBids)));
    }
}

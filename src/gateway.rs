//! The payment gateway: create, process and look up payments.
//!
//! Processing is simulated. Each call draws a single outcome at the
//! configured success rate; there is no settlement and no retry.

use crate::amount::Amount;
use crate::config::GatewayConfig;
use crate::details::PaymentDetails;
use crate::error::{GatewayError, Result};
use crate::payment::{Category, PaymentId, PaymentRecord, PaymentStatus};
use crate::store::{InMemoryStore, PaymentRow, PaymentStore};
use chrono::{Local, NaiveDateTime, SubsecRound};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the payment table and the random source for ids and outcomes.
///
/// # Id collisions
///
/// Ids are drawn from a small numeric range, so a draw can hit an id that is
/// already taken. `create_payment` draws again, up to
/// `GatewayConfig::max_id_attempts` times, and fails with
/// `GatewayError::IdSpaceExhausted` if every draw collides.
pub struct PaymentGateway<S: PaymentStore = InMemoryStore> {
    store: S,
    rng: StdRng,
    config: GatewayConfig,
}

impl PaymentGateway {
    /// Creates a gateway over an empty in-memory table.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Self::with_store(InMemoryStore::new(), config)
    }
}

impl<S: PaymentStore> PaymentGateway<S> {
    /// Creates a gateway over the given store.
    pub fn with_store(store: S, config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(PaymentGateway { store, rng, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a new payment with status `created` and returns its id.
    ///
    /// The amount is stored as given; callers validate it.
    pub fn create_payment(
        &mut self,
        amount: Amount,
        category: Category,
        details: &PaymentDetails,
    ) -> Result<PaymentId> {
        let id = self.next_id()?;

        self.store.insert(PaymentRow {
            id: id.clone(),
            amount,
            status: PaymentStatus::Created,
            category,
            details: details.encode()?,
            created_at: now(),
        });

        debug!("Created {} payment {} for {}", category, id, amount);
        Ok(id)
    }

    /// Draws an outcome for a payment and records it.
    ///
    /// Returns `None` if no payment has this id. Processing a payment that
    /// already has an outcome is allowed and overwrites it with a fresh draw.
    pub fn process_payment(&mut self, id: &str) -> Option<PaymentStatus> {
        let outcome = self.draw_outcome();

        if let Some(row) = self.store.fetch(id) {
            if row.status.is_settled() {
                warn!(
                    "Payment {} already {}, processing again",
                    id, row.status
                );
            }
        }

        if !self.store.update_status(id, outcome) {
            debug!("Process requested for unknown payment {}", id);
            return None;
        }

        debug!("Processed payment {}: {}", id, outcome);
        Some(outcome)
    }

    /// Looks up a payment by id, decoding its details.
    pub fn get_payment(&self, id: &str) -> Result<Option<PaymentRecord>> {
        let row = match self.store.fetch(id) {
            Some(row) => row,
            None => return Ok(None),
        };

        Ok(Some(PaymentRecord {
            id: row.id.clone(),
            amount: row.amount,
            status: row.status,
            category: row.category,
            details: PaymentDetails::decode(&row.details)?,
            created_at: row.created_at,
        }))
    }

    /// Draws an unused id.
    fn next_id(&mut self) -> Result<PaymentId> {
        for attempt in 1..=self.config.max_id_attempts {
            let number = self.rng.gen_range(self.config.id_range.clone());
            let id = format!("{}{}", self.config.id_prefix, number);

            if !self.store.contains(&id) {
                return Ok(PaymentId::new(id));
            }

            warn!("Payment id {} already taken (attempt {})", id, attempt);
        }

        Err(GatewayError::IdSpaceExhausted {
            attempts: self.config.max_id_attempts,
        })
    }

    fn draw_outcome(&mut self) -> PaymentStatus {
        if self.rng.gen_bool(self.config.success_rate) {
            PaymentStatus::Success
        } else {
            PaymentStatus::Failed
        }
    }
}

/// Local wall-clock time truncated to whole seconds.
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn seeded(seed: u64) -> PaymentGateway {
        PaymentGateway::new(GatewayConfig {
            seed: Some(seed),
            ..GatewayConfig::default()
        })
        .unwrap()
    }

    fn mobile_details() -> PaymentDetails {
        [
            ("number", "9999999999"),
            ("operator", "Airtel"),
            ("type", "prepaid"),
        ]
        .into_iter()
        .collect()
    }

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_create_then_get() {
        let mut gateway = seeded(7);
        let details = mobile_details();

        let id = gateway
            .create_payment(amount("199.0"), Category::Mobile, &details)
            .unwrap();

        let record = gateway.get_payment(id.as_str()).unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.amount, amount("199"));
        assert_eq!(record.status, PaymentStatus::Created);
        assert_eq!(record.category, Category::Mobile);
        assert_eq!(record.details, details);
    }

    #[test]
    fn test_id_format() {
        let mut gateway = seeded(1);
        for _ in 0..50 {
            let id = gateway
                .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
                .unwrap();
            let digits = id.as_str().strip_prefix("pay_").unwrap();
            let number: u32 = digits.parse().unwrap();
            assert_eq!(digits.len(), 4);
            assert!((1000..=9999).contains(&number));
        }
    }

    #[test]
    fn test_details_are_stored_encoded() {
        let mut gateway = seeded(3);
        let id = gateway
            .create_payment(amount("5"), Category::Mobile, &mobile_details())
            .unwrap();

        let row = gateway.store().fetch(id.as_str()).unwrap();
        assert_eq!(
            row.details,
            r#"{"number":"9999999999","operator":"Airtel","type":"prepaid"}"#
        );
    }

    #[test]
    fn test_process_sets_final_status() {
        let mut gateway = seeded(11);
        let id = gateway
            .create_payment(amount("10"), Category::Movie, &PaymentDetails::new())
            .unwrap();

        let outcome = gateway.process_payment(id.as_str()).unwrap();
        assert!(outcome.is_settled());

        let record = gateway.get_payment(id.as_str()).unwrap().unwrap();
        assert_eq!(record.status, outcome);
    }

    #[test]
    fn test_process_unknown_id_reports_not_found() {
        let mut gateway = seeded(5);
        assert_eq!(gateway.process_payment("pay_0000"), None);
        assert!(gateway.store().is_empty());
    }

    #[test]
    fn test_get_unknown_id() {
        let gateway = seeded(5);
        assert!(gateway.get_payment("pay_0000").unwrap().is_none());
    }

    #[test]
    fn test_success_rate_extremes() {
        let mut always = PaymentGateway::new(GatewayConfig {
            seed: Some(1),
            success_rate: 1.0,
            ..GatewayConfig::default()
        })
        .unwrap();
        let mut never = PaymentGateway::new(GatewayConfig {
            seed: Some(1),
            success_rate: 0.0,
            ..GatewayConfig::default()
        })
        .unwrap();

        let a = always
            .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
            .unwrap();
        let b = never
            .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
            .unwrap();

        for _ in 0..20 {
            assert_eq!(always.process_payment(a.as_str()), Some(PaymentStatus::Success));
            assert_eq!(never.process_payment(b.as_str()), Some(PaymentStatus::Failed));
        }
    }

    #[test]
    fn test_collision_draws_again() {
        let mut gateway = PaymentGateway::new(GatewayConfig {
            seed: Some(9),
            id_range: 1000..=1001,
            max_id_attempts: 200,
            ..GatewayConfig::default()
        })
        .unwrap();

        let first = gateway
            .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
            .unwrap();
        let second = gateway
            .create_payment(amount("2"), Category::Upi, &PaymentDetails::new())
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(gateway.store().len(), 2);
    }

    #[test]
    fn test_exhausted_id_space() {
        let mut gateway = PaymentGateway::new(GatewayConfig {
            seed: Some(9),
            id_range: 1000..=1000,
            max_id_attempts: 4,
            ..GatewayConfig::default()
        })
        .unwrap();

        let first = gateway
            .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
            .unwrap();
        assert_eq!(first.as_str(), "pay_1000");

        let err = gateway
            .create_payment(amount("2"), Category::Upi, &PaymentDetails::new())
            .unwrap_err();
        assert!(matches!(err, GatewayError::IdSpaceExhausted { attempts: 4 }));

        // The existing record is untouched
        let record = gateway.get_payment("pay_1000").unwrap().unwrap();
        assert_eq!(record.amount, amount("1"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = PaymentGateway::new(GatewayConfig {
            success_rate: 2.0,
            ..GatewayConfig::default()
        });
        assert!(matches!(result, Err(GatewayError::InvalidConfig(_))));
    }

    #[test]
    fn test_same_seed_same_ids() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..5 {
            let id_a = a
                .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
                .unwrap();
            let id_b = b
                .create_payment(amount("1"), Category::Upi, &PaymentDetails::new())
                .unwrap();
            assert_eq!(id_a, id_b);
        }
    }
}

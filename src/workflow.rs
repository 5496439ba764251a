//! Payment workflow: shapes category-specific input into payments and
//! renders receipts.
//!
//! Every category funnels into the same create/process/lookup calls on the
//! gateway; they differ only in the details they collect and the category
//! label they carry.

use crate::amount::Amount;
use crate::details::PaymentDetails;
use crate::error::Result;
use crate::gateway::PaymentGateway;
use crate::payment::{Category, PaymentId, PaymentRecord, PaymentStatus};
use crate::store::{InMemoryStore, PaymentStore};
use std::fmt;

/// Seats booked for every movie ticket.
pub const DEFAULT_SEATS: &str = "A1,A2";

/// Plan type recorded for every mobile recharge.
pub const DEFAULT_PLAN: &str = "prepaid";

/// Category-specific input for a new payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentKind {
    MobileRecharge { number: String, operator: String },
    MovieTicket { movie: String, theater: String },
    UpiTransfer { upi_id: String, note: String },
}

impl PaymentKind {
    pub fn category(&self) -> Category {
        match self {
            PaymentKind::MobileRecharge { .. } => Category::Mobile,
            PaymentKind::MovieTicket { .. } => Category::Movie,
            PaymentKind::UpiTransfer { .. } => Category::Upi,
        }
    }

    /// Builds the details mapping stored with the payment.
    pub fn details(&self) -> PaymentDetails {
        let mut details = PaymentDetails::new();
        match self {
            PaymentKind::MobileRecharge { number, operator } => {
                details.insert("number", number.as_str());
                details.insert("operator", operator.as_str());
                details.insert("type", DEFAULT_PLAN);
            }
            PaymentKind::MovieTicket { movie, theater } => {
                details.insert("movie", movie.as_str());
                details.insert("theater", theater.as_str());
                details.insert("seats", DEFAULT_SEATS);
            }
            PaymentKind::UpiTransfer { upi_id, note } => {
                details.insert("upi_id", upi_id.as_str());
                details.insert("note", note.as_str());
            }
        }
        details
    }
}

/// A payment ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Amount,
    pub kind: PaymentKind,
}

impl PaymentRequest {
    pub fn new(amount: Amount, kind: PaymentKind) -> Self {
        PaymentRequest { amount, kind }
    }
}

/// Printable summary of a payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub record: PaymentRecord,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = &self.record;
        writeln!(f, "RECEIPT")?;
        writeln!(f, "ID: {}", record.id)?;
        writeln!(f, "Amount: ₹{}", record.amount)?;
        writeln!(f, "Status: {}", record.status)?;
        writeln!(f, "Time: {}", record.created_at_display())?;
        writeln!(f)?;
        writeln!(f, "Details:")?;
        for (key, value) in record.details.iter() {
            writeln!(f, "{}: {}", key, value)?;
        }
        Ok(())
    }
}

/// Drives payments through the gateway on behalf of the console.
pub struct PaymentWorkflow<S: PaymentStore = InMemoryStore> {
    gateway: PaymentGateway<S>,
}

impl<S: PaymentStore> PaymentWorkflow<S> {
    pub fn new(gateway: PaymentGateway<S>) -> Self {
        PaymentWorkflow { gateway }
    }

    pub fn gateway(&self) -> &PaymentGateway<S> {
        &self.gateway
    }

    /// Records a payment and returns its id.
    pub fn submit(&mut self, request: &PaymentRequest) -> Result<PaymentId> {
        self.gateway.create_payment(
            request.amount,
            request.kind.category(),
            &request.kind.details(),
        )
    }

    /// Processes a payment without rendering anything.
    ///
    /// Returns `None` if the payment does not exist.
    pub fn process(&mut self, id: &str) -> Option<PaymentStatus> {
        self.gateway.process_payment(id)
    }

    /// Processes a payment and returns its receipt.
    pub fn settle(&mut self, id: &str) -> Result<Option<Receipt>> {
        if self.process(id).is_none() {
            return Ok(None);
        }
        self.receipt(id)
    }

    pub fn receipt(&self, id: &str) -> Result<Option<Receipt>> {
        Ok(self
            .gateway
            .get_payment(id)?
            .map(|record| Receipt { record }))
    }
}

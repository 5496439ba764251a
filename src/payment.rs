//! Payment record model.

use crate::amount::Amount;
use crate::details::PaymentDetails;
use chrono::NaiveDateTime;
use std::fmt;

/// Format used when rendering a record's creation time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Opaque payment identifier, e.g. `pay_4821`.
///
/// Assigned once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Self {
        PaymentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Recorded but not yet processed.
    Created,

    /// Processing drew a successful outcome.
    Success,

    /// Processing drew a failed outcome.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Returns `true` once processing has assigned a final outcome.
    pub fn is_settled(&self) -> bool {
        !matches!(self, PaymentStatus::Created)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of payment being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Mobile,
    Movie,
    Upi,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 3] = [Category::Mobile, Category::Movie, Category::Upi];

    /// The label stored on the payment record.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Mobile => "Mobile",
            Category::Movie => "Movie",
            Category::Upi => "UPI",
        }
    }

    /// The name shown in the payment options menu.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Mobile => "Mobile Recharge",
            Category::Movie => "Movie Ticket",
            Category::Upi => "UPI Transfer",
        }
    }

    /// Maps a menu entry (`"1"`, `"2"`, `"3"`) to its category.
    pub fn from_menu_choice(choice: &str) -> Option<Category> {
        match choice.trim() {
            "1" => Some(Category::Mobile),
            "2" => Some(Category::Movie),
            "3" => Some(Category::Upi),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully materialized payment, with details decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub category: Category,
    pub details: PaymentDetails,
    pub created_at: NaiveDateTime,
}

impl PaymentRecord {
    /// Creation time rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn created_at_display(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

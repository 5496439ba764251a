//! # Payment Gateway
//!
//! A simulated payment gateway. Payments for mobile recharges, movie tickets
//! and UPI transfers are recorded in an in-memory table, processed with a
//! random outcome, and looked up to print receipts.
//!
//! ## Design Principles
//!
//! - **Explicit ownership**: the store lives inside the gateway, which the
//!   workflow owns; there is no global state
//! - **Safe details storage**: details are stored as JSON and decoded with a
//!   parser, never evaluated
//! - **Absence is not an error**: unknown ids yield `None`
//! - **Reproducible runs**: a seed fixes every id and outcome
//!
//! ## Example
//!
//! ```
//! use payment_gateway::{GatewayConfig, PaymentGateway, PaymentKind, PaymentRequest, PaymentWorkflow};
//! use std::str::FromStr;
//!
//! let gateway = PaymentGateway::new(GatewayConfig::default()).unwrap();
//! let mut workflow = PaymentWorkflow::new(gateway);
//!
//! let request = PaymentRequest::new(
//!     payment_gateway::Amount::from_str("199").unwrap(),
//!     PaymentKind::MobileRecharge {
//!         number: "9999999999".to_string(),
//!         operator: "Airtel".to_string(),
//!     },
//! );
//! let id = workflow.submit(&request).unwrap();
//! let receipt = workflow.settle(id.as_str()).unwrap().unwrap();
//! println!("{}", receipt);
//! ```

pub mod amount;
pub mod config;
pub mod console;
pub mod details;
pub mod error;
pub mod gateway;
pub mod payment;
pub mod store;
pub mod workflow;

pub use amount::Amount;
pub use config::GatewayConfig;
pub use console::Console;
pub use details::PaymentDetails;
pub use error::{GatewayError, Result};
pub use gateway::PaymentGateway;
pub use payment::{Category, PaymentId, PaymentRecord, PaymentStatus};
pub use store::{InMemoryStore, PaymentRow, PaymentStore};
pub use workflow::{PaymentKind, PaymentRequest, PaymentWorkflow, Receipt};

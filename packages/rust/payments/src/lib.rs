//! Pricing and payment confirmation for PaperWright.
//!
//! This crate provides:
//! - [`PricingGate`] — maps a work kind to a [`PriceQuote`] from per-deployment config
//! - [`PaymentGateway`] — the confirmation seam consulted before paid generation
//! - [`MockGateway`] — a stand-in gateway that always confirms
//!
//! Real payment processing is out of scope; a production gateway would
//! implement [`PaymentGateway`] against an actual provider.

mod gateway;
mod pricing;

pub use gateway::{ConfirmationId, MockGateway, PaymentGateway, PaymentReceipt, PaymentRequest};
pub use pricing::PricingGate;

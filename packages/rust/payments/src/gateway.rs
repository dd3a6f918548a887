//! Payment confirmation gateway.
//!
//! The paid flow must obtain a [`PaymentReceipt`] before any generation
//! runs. A gateway failure is a hard error; nothing downstream recovers it.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use paperwright_shared::{Result, WorkKind};

// ---------------------------------------------------------------------------
// ConfirmationId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for payment confirmation identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationId(pub Uuid);

impl ConfirmationId {
    /// Mint a new time-sortable confirmation identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConfirmationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConfirmationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pay_{}", self.0)
    }
}

impl std::str::FromStr for ConfirmationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s.strip_prefix("pay_").unwrap_or(s);
        Ok(Self(Uuid::parse_str(raw)?))
    }
}

// ---------------------------------------------------------------------------
// Request / receipt
// ---------------------------------------------------------------------------

/// What the caller asks the gateway to charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Identifier of the paying party.
    pub payer_id: String,
    /// Amount in whole currency units.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Human-readable charge description (e.g. "coursework on AI Ethics").
    pub description: String,
    /// Kind of work being paid for.
    pub kind: WorkKind,
    /// Topic of the work being paid for.
    pub topic: String,
}

/// Proof of a confirmed payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Gateway-issued confirmation identifier.
    pub confirmation_id: ConfirmationId,
    /// Amount actually charged.
    pub amount: u64,
    /// Currency of the charge.
    pub currency: String,
    /// When the gateway confirmed the charge.
    pub processed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Trait + mock
// ---------------------------------------------------------------------------

/// Trait for payment confirmation.
///
/// A single awaited call per produce request; failures propagate to the
/// caller as [`paperwright_shared::PaperwrightError::Payment`] and must
/// prevent generation from running.
pub trait PaymentGateway: Send + Sync {
    /// Confirm the charge described by `request`.
    fn confirm(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentReceipt>> + Send;
}

/// Gateway stand-in that confirms every charge.
///
/// A production deployment would replace this with an implementation backed
/// by an actual payment provider.
#[derive(Debug, Clone, Default)]
pub struct MockGateway;

impl MockGateway {
    pub fn new() -> Self {
        Self
    }
}

impl PaymentGateway for MockGateway {
    async fn confirm(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        info!(
            payer = %request.payer_id,
            kind = %request.kind,
            topic = %request.topic,
            amount = request.amount,
            currency = %request.currency,
            "confirming payment"
        );

        Ok(PaymentReceipt {
            confirmation_id: ConfirmationId::new(),
            amount: request.amount,
            currency: request.currency.clone(),
            processed_at: Utc::now(),
        })
    }
}

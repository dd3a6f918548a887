//! End-to-end `produce` pipeline: validate → quote → confirm payment → assemble.
//!
//! Payment confirmation is mandatory: a gateway failure is a hard error and
//! generation never runs without a receipt.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use paperwright_payments::{PaymentGateway, PaymentReceipt, PaymentRequest, PricingGate};
use paperwright_shared::{DocumentRequest, PaperwrightError, PriceQuote, Result};
use paperwright_sources::SourceProvider;

use crate::assembler::{self, GenerationOutcome};

/// Configuration for one `produce` call.
#[derive(Debug, Clone)]
pub struct ProduceConfig {
    /// The document request. The topic is normalized during validation.
    pub request: DocumentRequest,
    /// Identifier of the paying party.
    pub payer_id: String,
    /// Maximum sources requested from the provider.
    pub source_limit: usize,
}

/// Result of the `produce` pipeline.
#[derive(Debug)]
pub struct ProduceResult {
    /// The generation outcome (complete document or degraded result).
    pub outcome: GenerationOutcome,
    /// The quote the payment was confirmed against.
    pub quote: PriceQuote,
    /// Proof of the confirmed payment.
    pub receipt: PaymentReceipt,
    /// SHA-256 hex digest of the rendered text, when generation completed.
    pub fingerprint: Option<String>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &ProduceResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &ProduceResult) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full paid produce flow.
///
/// 1. Validate the request (topic, page count)
/// 2. Quote the price
/// 3. Confirm payment (mandatory — failure stops the pipeline)
/// 4. Assemble the document
/// 5. Fingerprint the rendered text
#[instrument(skip_all, fields(topic = %config.request.topic, kind = %config.request.kind))]
pub async fn produce<P, G>(
    provider: &P,
    gateway: &G,
    pricing: &PricingGate,
    config: &ProduceConfig,
    progress: &dyn ProgressReporter,
) -> Result<ProduceResult>
where
    P: SourceProvider,
    G: PaymentGateway,
{
    let start = Instant::now();

    progress.phase("Validating request");
    let request = validate_request(&config.request)?;

    progress.phase("Calculating price");
    let quote = pricing.quote(request.kind, Some(request.page_count));

    progress.phase("Confirming payment");
    let payment = PaymentRequest {
        payer_id: config.payer_id.clone(),
        amount: quote.amount,
        currency: quote.currency.clone(),
        description: format!("{} on {}", request.kind, request.topic),
        kind: request.kind,
        topic: request.topic.clone(),
    };
    let receipt = gateway.confirm(&payment).await?;
    info!(
        confirmation = %receipt.confirmation_id,
        amount = receipt.amount,
        currency = %receipt.currency,
        "payment confirmed"
    );

    progress.phase("Assembling document");
    let outcome = assembler::generate(provider, &request, config.source_limit).await;

    let fingerprint = outcome.document().map(|doc| fingerprint(&doc.rendered_text));

    let result = ProduceResult {
        outcome,
        quote,
        receipt,
        fingerprint,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        degraded = result.outcome.is_degraded(),
        elapsed_ms = result.elapsed.as_millis(),
        "produce pipeline complete"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Trim and collapse internal whitespace; reject empty topics.
pub fn normalize_topic(raw: &str) -> Result<String> {
    let topic = WHITESPACE.replace_all(raw.trim(), " ").into_owned();
    if topic.is_empty() {
        return Err(PaperwrightError::validation("topic must not be empty"));
    }
    Ok(topic)
}

fn validate_request(request: &DocumentRequest) -> Result<DocumentRequest> {
    let topic = normalize_topic(&request.topic)?;

    if request.page_count == 0 {
        return Err(PaperwrightError::validation("page count must be at least 1"));
    }

    Ok(DocumentRequest {
        topic,
        ..request.clone()
    })
}

/// SHA-256 hex digest of rendered text. Equal digests prove byte-identical
/// renders across repeated identical requests.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use paperwright_payments::MockGateway;
    use paperwright_shared::{PricingConfig, WorkKind};
    use paperwright_sources::FixtureProvider;

    /// Gateway wrapper that counts confirmation attempts.
    struct RecordingGateway {
        inner: MockGateway,
        calls: AtomicUsize,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                inner: MockGateway::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PaymentGateway for RecordingGateway {
        async fn confirm(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.confirm(request).await
        }
    }

    /// Gateway that declines every charge.
    struct DecliningGateway;

    impl PaymentGateway for DecliningGateway {
        async fn confirm(&self, _request: &PaymentRequest) -> Result<PaymentReceipt> {
            Err(PaperwrightError::payment("card declined"))
        }
    }

    fn config(topic: &str, kind: WorkKind) -> ProduceConfig {
        ProduceConfig {
            request: DocumentRequest::new(topic, kind),
            payer_id: "user-42".into(),
            source_limit: 5,
        }
    }

    fn pricing() -> PricingGate {
        PricingGate::new(PricingConfig::default())
    }

    #[tokio::test]
    async fn produce_end_to_end() {
        let provider = FixtureProvider::new();
        let gateway = MockGateway::new();
        let config = config("AI Ethics", WorkKind::Coursework);

        let result = produce(&provider, &gateway, &pricing(), &config, &SilentProgress)
            .await
            .expect("produce");

        let doc = result.outcome.document().expect("complete");
        assert_eq!(doc.title, "AI Ethics - Course Work");
        assert_eq!(result.quote.amount, 500);
        assert_eq!(result.receipt.amount, 500);

        let digest = result.fingerprint.expect("fingerprint");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, fingerprint(&doc.rendered_text));
    }

    #[tokio::test]
    async fn produce_is_deterministic() {
        let provider = FixtureProvider::new();
        let gateway = MockGateway::new();
        let config = config("Climate Policy", WorkKind::Report);

        let first = produce(&provider, &gateway, &pricing(), &config, &SilentProgress)
            .await
            .expect("produce");
        let second = produce(&provider, &gateway, &pricing(), &config, &SilentProgress)
            .await
            .expect("produce");

        assert_eq!(first.fingerprint, second.fingerprint);
    }

    #[tokio::test]
    async fn empty_topic_rejected_before_payment() {
        let provider = FixtureProvider::new();
        let gateway = RecordingGateway::new();
        let config = config("   ", WorkKind::Report);

        let err = produce(&provider, &gateway, &pricing(), &config, &SilentProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, PaperwrightError::Validation { .. }));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_page_count_rejected() {
        let provider = FixtureProvider::new();
        let gateway = MockGateway::new();
        let mut config = config("AI Ethics", WorkKind::Report);
        config.request.page_count = 0;

        let err = produce(&provider, &gateway, &pricing(), &config, &SilentProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, PaperwrightError::Validation { .. }));
    }

    #[tokio::test]
    async fn topic_whitespace_is_normalized() {
        let provider = FixtureProvider::new();
        let gateway = MockGateway::new();
        let config = config("  AI \t  Ethics ", WorkKind::Coursework);

        let result = produce(&provider, &gateway, &pricing(), &config, &SilentProgress)
            .await
            .expect("produce");

        let doc = result.outcome.document().expect("complete");
        assert_eq!(doc.topic, "AI Ethics");
        assert_eq!(doc.title, "AI Ethics - Course Work");
    }

    #[tokio::test]
    async fn declined_payment_stops_generation() {
        let provider = FixtureProvider::new();
        let config = config("AI Ethics", WorkKind::Coursework);

        let err = produce(&provider, &DecliningGateway, &pricing(), &config, &SilentProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, PaperwrightError::Payment(_)));
    }

    #[test]
    fn normalize_topic_rules() {
        assert_eq!(normalize_topic("  Soil   Chemistry ").expect("ok"), "Soil Chemistry");
        assert!(normalize_topic("").is_err());
        assert!(normalize_topic(" \t\n ").is_err());
    }
}

//! Source providers for PaperWright.
//!
//! This crate provides:
//! - [`SourceProvider`] — the trait document assembly fetches records through
//! - [`FetchOutcome`] — a never-failing fetch response (records + error indicator)
//! - [`FixtureProvider`] — a deterministic catalog-backed implementation
//!
//! A network-backed provider would implement the same trait; none ships here.

mod fixture;

use std::future::Future;

use paperwright_shared::SourceRecord;

pub use fixture::{FixtureProvider, SourceSeed};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Outcome of a single fetch attempt.
///
/// An empty record list is a valid, non-fatal result. When `error` is set,
/// the provider hit an internal fault and downgraded to empty records;
/// callers must not treat that as a failure of their own request.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The topic the records were fetched for.
    pub topic: String,
    /// Ordered records, at most the requested limit.
    pub records: Vec<SourceRecord>,
    /// Error indicator for a recovered provider fault.
    pub error: Option<String>,
}

impl FetchOutcome {
    /// A successful outcome carrying `records`.
    pub fn ok(topic: impl Into<String>, records: Vec<SourceRecord>) -> Self {
        Self {
            topic: topic.into(),
            records,
            error: None,
        }
    }

    /// A recovered-fault outcome: empty records plus an error indicator.
    pub fn degraded(topic: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            records: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Trait for bibliographic source lookup.
///
/// One attempt per call, no retry policy. Implementations must be
/// deterministic for identical inputs and must never return an error to the
/// caller — internal faults become [`FetchOutcome::degraded`].
pub trait SourceProvider: Send + Sync {
    /// Fetch up to `limit` records for `topic`, in stable order.
    fn fetch(&self, topic: &str, limit: usize) -> impl Future<Output = FetchOutcome> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Fixture provider contract tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_respects_limit() {
        let provider = FixtureProvider::new();

        let outcome = provider.fetch("Quantum Computing", 2).await;
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.error.is_none());

        let outcome = provider.fetch("Quantum Computing", 100).await;
        assert!(outcome.records.len() <= 100);
    }

    #[tokio::test]
    async fn fetch_zero_limit_is_empty_and_ok() {
        let provider = FixtureProvider::new();
        let outcome = provider.fetch("Quantum Computing", 0).await;
        assert!(outcome.records.is_empty());
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn fetch_is_deterministic() {
        let provider = FixtureProvider::new();
        let first = provider.fetch("Climate Policy", 5).await;
        let second = provider.fetch("Climate Policy", 5).await;

        let titles = |o: &FetchOutcome| {
            o.records
                .iter()
                .map(|r| (r.title.clone(), r.url.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(&first), titles(&second));
    }

    #[tokio::test]
    async fn fetch_interpolates_topic() {
        let provider = FixtureProvider::new();
        let outcome = provider.fetch("AI Ethics", 1).await;

        let record = &outcome.records[0];
        assert_eq!(record.title, "Sample Research on AI Ethics");
        assert!(record.abstract_text.contains("AI Ethics"));
        assert_eq!(record.keywords.first().map(String::as_str), Some("AI Ethics"));
    }

    #[tokio::test]
    async fn catalog_fixture_loads() {
        let provider =
            FixtureProvider::from_json_file("../../../fixtures/json/catalog.fixture.json")
                .expect("load fixture catalog");

        let outcome = provider.fetch("Soil Chemistry", 10).await;
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].title, "Field Notes on Soil Chemistry");
    }

    #[test]
    fn catalog_rejects_invalid_seed_url() {
        let seed = SourceSeed {
            id: "1".into(),
            title: "Broken".into(),
            authors: vec![],
            abstract_text: "".into(),
            url: "not a url".into(),
            year: 2020,
            journal: "J".into(),
            tags: vec![],
        };
        let err = FixtureProvider::try_with_catalog(vec![seed]).unwrap_err();
        assert!(err.to_string().contains("validation error"));
    }
}

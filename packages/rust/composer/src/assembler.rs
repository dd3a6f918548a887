//! Document assembler.
//!
//! Takes a validated request, fetches sources through a [`SourceProvider`],
//! builds the narrative sections, and renders the flattened text. Total at
//! its boundary: every call returns a [`GenerationOutcome`], never an error.

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use paperwright_shared::{DocumentRequest, Result, SourceRecord, WorkKind};
use paperwright_sources::SourceProvider;

use crate::render;

/// Requirements recorded on a document when the request carries none.
pub const DEFAULT_REQUIREMENTS: &str = "Standard academic requirements";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The three narrative sections of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    pub introduction: String,
    pub main_body: String,
    pub conclusion: String,
}

/// A fully assembled academic work.
///
/// Derived deterministically from the request and the fetched record
/// sequence; never mutated after construction. `rendered_text` is a pure
/// function of the other fields.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Display title: `{topic} - {kind label}`.
    pub title: String,
    /// Kind of work.
    pub kind: WorkKind,
    /// Topic the work covers.
    pub topic: String,
    /// Requested length in pages.
    pub page_count: u32,
    /// Requester's requirements, defaulted when absent.
    pub requirements: String,
    /// Narrative sections.
    pub sections: SectionSet,
    /// Sources, exactly as returned by the provider.
    pub sources: Vec<SourceRecord>,
    /// Flattened plain-text form.
    pub rendered_text: String,
}

/// Partial response returned instead of a document when assembly faults.
///
/// Carries only an error indicator plus request echo fields.
#[derive(Debug, Clone, Serialize)]
pub struct DegradedResult {
    pub error: String,
    pub topic: String,
    pub kind: WorkKind,
}

/// What a generation call produced.
///
/// Callers must check for the degraded variant before trusting any other
/// field of the result.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Assembly completed; the document is fully populated.
    Complete(Box<Document>),
    /// Assembly faulted; only the error and request echoes are meaningful.
    Degraded(DegradedResult),
}

impl GenerationOutcome {
    /// The assembled document, if generation completed.
    pub fn document(&self) -> Option<&Document> {
        match self {
            Self::Complete(doc) => Some(doc),
            Self::Degraded(_) => None,
        }
    }

    /// The error indicator, if generation degraded.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded(degraded) => Some(&degraded.error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Assemble a document for `request`, fetching up to `source_limit` records.
///
/// A provider fault downgrades to an empty source list — absence of sources
/// is not itself a fault, and the document is still produced. Any internal
/// fault during assembly is caught, logged, and returned as the degraded
/// variant; nothing propagates past this boundary.
#[instrument(skip(provider), fields(topic = %request.topic, kind = %request.kind))]
pub async fn generate<P: SourceProvider>(
    provider: &P,
    request: &DocumentRequest,
    source_limit: usize,
) -> GenerationOutcome {
    let fetched = provider.fetch(&request.topic, source_limit).await;
    if let Some(err) = &fetched.error {
        warn!(error = %err, "source fetch degraded, continuing without sources");
    }

    match build_document(request, fetched.records) {
        Ok(document) => {
            info!(
                title = %document.title,
                sources = document.sources.len(),
                "document assembled"
            );
            GenerationOutcome::Complete(Box::new(document))
        }
        Err(e) => {
            error!(error = %e, "assembly failed, returning degraded result");
            GenerationOutcome::Degraded(DegradedResult {
                error: e.to_string(),
                topic: request.topic.clone(),
                kind: request.kind,
            })
        }
    }
}

/// Build the three narrative sections for a topic and kind.
///
/// The only branch is the kind-dependent opening clause of the introduction;
/// everything else is fixed template text with the topic (and, in the
/// conclusion, the kind) interpolated.
pub fn build_sections(topic: &str, kind: WorkKind) -> SectionSet {
    let opening = match kind {
        WorkKind::Coursework => format!("This coursework explores the topic of {topic}"),
        WorkKind::Report => format!("This report analyzes {topic}"),
    };

    SectionSet {
        introduction: format!(
            "{opening}. The purpose of this document is to provide comprehensive insights \
             based on academic research."
        ),
        main_body: format!(
            "Based on the research from the source provider, we examine various aspects of \
             {topic}. The analysis includes:"
        ),
        conclusion: format!(
            "This {kind} has examined {topic} through the lens of academic research. The \
             findings suggest important implications for the field."
        ),
    }
}

fn build_document(request: &DocumentRequest, sources: Vec<SourceRecord>) -> Result<Document> {
    let title = format!("{} - {}", request.topic, request.kind.label());
    let sections = build_sections(&request.topic, request.kind);
    let rendered_text = render::render(&title, &sections, &sources)?;

    Ok(Document {
        title,
        kind: request.kind,
        topic: request.topic.clone(),
        page_count: request.page_count,
        requirements: request
            .requirements
            .clone()
            .unwrap_or_else(|| DEFAULT_REQUIREMENTS.into()),
        sections,
        sources,
        rendered_text,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use paperwright_sources::{FetchOutcome, FixtureProvider};

    /// Provider that always reports a recovered internal fault.
    struct FailingProvider;

    impl SourceProvider for FailingProvider {
        async fn fetch(&self, topic: &str, _limit: usize) -> FetchOutcome {
            FetchOutcome::degraded(topic, "upstream unavailable")
        }
    }

    async fn generate_fixture(topic: &str, kind: WorkKind) -> Document {
        let provider = FixtureProvider::new();
        let request = DocumentRequest::new(topic, kind);
        match generate(&provider, &request, 5).await {
            GenerationOutcome::Complete(doc) => *doc,
            GenerationOutcome::Degraded(d) => panic!("unexpected degraded result: {}", d.error),
        }
    }

    #[tokio::test]
    async fn report_scenario() {
        let doc = generate_fixture("Climate Policy", WorkKind::Report).await;

        assert_eq!(doc.title, "Climate Policy - Report");
        assert!(
            doc.sections
                .introduction
                .starts_with("This report analyzes Climate Policy.")
        );
        assert!(doc.rendered_text.starts_with("# Climate Policy - Report\n"));
    }

    #[tokio::test]
    async fn coursework_scenario() {
        let doc = generate_fixture("AI Ethics", WorkKind::Coursework).await;

        assert_eq!(doc.title, "AI Ethics - Course Work");
        assert!(
            doc.sections
                .introduction
                .starts_with("This coursework explores the topic of AI Ethics.")
        );
        assert!(doc.sections.conclusion.contains("This coursework has examined AI Ethics"));
    }

    #[tokio::test]
    async fn defaults_requirements_when_absent() {
        let doc = generate_fixture("AI Ethics", WorkKind::Coursework).await;
        assert_eq!(doc.requirements, DEFAULT_REQUIREMENTS);

        let provider = FixtureProvider::new();
        let mut request = DocumentRequest::new("AI Ethics", WorkKind::Coursework);
        request.requirements = Some("APA style, 12pt".into());
        let outcome = generate(&provider, &request, 5).await;
        assert_eq!(outcome.document().expect("complete").requirements, "APA style, 12pt");
    }

    #[tokio::test]
    async fn sources_round_trip_into_references() {
        let doc = generate_fixture("AI Ethics", WorkKind::Coursework).await;
        assert_eq!(doc.sources.len(), 5);

        let refs = doc
            .rendered_text
            .split("## References")
            .nth(1)
            .expect("references section");
        let ref_lines: Vec<&str> = refs.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(ref_lines.len(), doc.sources.len());

        for (line, source) in ref_lines.iter().zip(&doc.sources) {
            assert_eq!(*line, render::format_reference(source));
        }
    }

    #[tokio::test]
    async fn generation_is_idempotent() {
        let first = generate_fixture("AI Ethics", WorkKind::Coursework).await;
        let second = generate_fixture("AI Ethics", WorkKind::Coursework).await;
        assert_eq!(first.rendered_text, second.rendered_text);
    }

    #[tokio::test]
    async fn provider_fault_yields_document_without_sources() {
        let request = DocumentRequest::new("AI Ethics", WorkKind::Coursework);
        let outcome = generate(&FailingProvider, &request, 5).await;

        let doc = outcome.document().expect("fetch faults are not fatal");
        assert!(doc.sources.is_empty());
        assert!(doc.rendered_text.contains(render::NO_SOURCES_FALLBACK));
    }

    #[tokio::test]
    async fn empty_catalog_yields_fallback_line() {
        let provider = FixtureProvider::try_with_catalog(vec![]).expect("empty catalog");
        let request = DocumentRequest::new("AI Ethics", WorkKind::Report);
        let outcome = generate(&provider, &request, 5).await;

        let doc = outcome.document().expect("complete");
        assert!(doc.rendered_text.contains(render::NO_SOURCES_FALLBACK));
    }

    #[test]
    fn degraded_result_serializes_error_and_echoes() {
        let degraded = DegradedResult {
            error: "boom".into(),
            topic: "AI Ethics".into(),
            kind: WorkKind::Coursework,
        };
        let json = serde_json::to_string(&degraded).expect("serialize");
        assert!(json.contains("\"error\":\"boom\""));
        assert!(json.contains("\"kind\":\"coursework\""));
    }

    #[test]
    fn outcome_accessors() {
        let degraded = GenerationOutcome::Degraded(DegradedResult {
            error: "boom".into(),
            topic: "AI Ethics".into(),
            kind: WorkKind::Coursework,
        });
        assert!(degraded.is_degraded());
        assert_eq!(degraded.error(), Some("boom"));
        assert!(degraded.document().is_none());
    }
}

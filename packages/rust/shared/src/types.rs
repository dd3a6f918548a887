//! Core domain types for PaperWright document production.

use serde::{Deserialize, Serialize};

/// Default page count for a document request when the caller does not specify one.
pub const DEFAULT_PAGE_COUNT: u32 = 10;

// ---------------------------------------------------------------------------
// WorkKind
// ---------------------------------------------------------------------------

/// The kind of academic work to produce.
///
/// A closed enum: all conditional text in the assembler branches on this,
/// never on free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkKind {
    Coursework,
    Report,
}

impl WorkKind {
    /// Human-readable label used in titles and headers only.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Coursework => "Course Work",
            Self::Report => "Report",
        }
    }
}

impl std::fmt::Display for WorkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coursework => write!(f, "coursework"),
            Self::Report => write!(f, "report"),
        }
    }
}

impl std::str::FromStr for WorkKind {
    type Err = crate::error::PaperwrightError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "coursework" => Ok(Self::Coursework),
            "report" => Ok(Self::Report),
            other => Err(crate::error::PaperwrightError::validation(format!(
                "unknown work kind '{other}': expected 'coursework' or 'report'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// SourceRecord
// ---------------------------------------------------------------------------

/// One bibliographic entry returned by a source provider.
///
/// Immutable once produced; created fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Provider-scoped identifier (stable within a single response).
    pub id: String,
    /// Article title.
    pub title: String,
    /// Authors, in citation order.
    pub authors: Vec<String>,
    /// Abstract text.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Canonical URL of the article.
    pub url: String,
    /// Publication year.
    pub year: i32,
    /// Journal or venue name.
    pub journal: String,
    /// Keywords, ordered, duplicates not expected.
    pub keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// DocumentRequest
// ---------------------------------------------------------------------------

/// A request to produce one academic document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Topic of the work. Must be non-empty; validated by the pipeline
    /// before any work begins.
    pub topic: String,
    /// Kind of work to produce.
    pub kind: WorkKind,
    /// Free-form requirements from the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    /// Requested length in pages (≥ 1).
    #[serde(default = "default_page_count")]
    pub page_count: u32,
}

fn default_page_count() -> u32 {
    DEFAULT_PAGE_COUNT
}

impl DocumentRequest {
    /// Build a request with the default page count and no requirements.
    pub fn new(topic: impl Into<String>, kind: WorkKind) -> Self {
        Self {
            topic: topic.into(),
            kind,
            requirements: None,
            page_count: DEFAULT_PAGE_COUNT,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceQuote
// ---------------------------------------------------------------------------

/// The computed cost of producing a given kind of work.
///
/// A pure derived value; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The kind the quote applies to.
    pub kind: WorkKind,
    /// Page count the quote was computed for. Currently does not affect
    /// the amount.
    pub page_count: u32,
    /// Amount in whole currency units.
    pub amount: u64,
    /// Currency code (e.g. "RUB").
    pub currency: String,
}

//! Catalog-backed source provider.
//!
//! Serves records from an ordered catalog of seed templates. Titles and
//! abstracts carry a `{topic}` placeholder filled in per request, so two
//! calls with the same topic always produce the same records.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use paperwright_shared::{PaperwrightError, Result, SourceRecord};

use crate::{FetchOutcome, SourceProvider};

/// Placeholder replaced with the request topic in seed templates.
const TOPIC_PLACEHOLDER: &str = "{topic}";

// ---------------------------------------------------------------------------
// SourceSeed
// ---------------------------------------------------------------------------

/// One catalog entry. Instantiated into a [`SourceRecord`] per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSeed {
    /// Record id assigned on instantiation.
    pub id: String,
    /// Title template; may contain `{topic}`.
    pub title: String,
    /// Authors, in citation order.
    pub authors: Vec<String>,
    /// Abstract template; may contain `{topic}`.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Canonical article URL. Must parse as an absolute URL.
    pub url: String,
    /// Publication year.
    pub year: i32,
    /// Journal or venue name.
    pub journal: String,
    /// Keyword tags; the topic itself is prepended on instantiation.
    pub tags: Vec<String>,
}

impl SourceSeed {
    /// Fill the topic into the seed's templates.
    fn instantiate(&self, topic: &str) -> SourceRecord {
        let mut keywords = Vec::with_capacity(self.tags.len() + 1);
        keywords.push(topic.to_string());
        keywords.extend(self.tags.iter().cloned());

        SourceRecord {
            id: self.id.clone(),
            title: self.title.replace(TOPIC_PLACEHOLDER, topic),
            authors: self.authors.clone(),
            abstract_text: self.abstract_text.replace(TOPIC_PLACEHOLDER, topic),
            url: self.url.clone(),
            year: self.year,
            journal: self.journal.clone(),
            keywords,
        }
    }
}

// ---------------------------------------------------------------------------
// FixtureProvider
// ---------------------------------------------------------------------------

/// Deterministic, catalog-backed [`SourceProvider`].
///
/// The built-in catalog holds five seeds so a default-limit fetch comes back
/// full. Custom catalogs can be supplied directly or loaded from a JSON file.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    catalog: Vec<SourceSeed>,
}

impl FixtureProvider {
    /// Provider with the built-in five-seed catalog.
    pub fn new() -> Self {
        Self {
            catalog: builtin_catalog(),
        }
    }

    /// Provider over a custom catalog, validating every seed URL.
    pub fn try_with_catalog(catalog: Vec<SourceSeed>) -> Result<Self> {
        for seed in &catalog {
            Url::parse(&seed.url).map_err(|e| {
                PaperwrightError::validation(format!(
                    "seed '{}' has an invalid url '{}': {e}",
                    seed.id, seed.url
                ))
            })?;
        }
        Ok(Self { catalog })
    }

    /// Load a catalog from a JSON file (an array of seeds).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PaperwrightError::io(path, e))?;
        let catalog: Vec<SourceSeed> = serde_json::from_str(&content).map_err(|e| {
            PaperwrightError::validation(format!("invalid catalog {}: {e}", path.display()))
        })?;
        Self::try_with_catalog(catalog)
    }

    /// Number of seeds in the catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceProvider for FixtureProvider {
    #[instrument(skip(self))]
    async fn fetch(&self, topic: &str, limit: usize) -> FetchOutcome {
        let records: Vec<SourceRecord> = self
            .catalog
            .iter()
            .take(limit)
            .map(|seed| seed.instantiate(topic))
            .collect();

        debug!(count = records.len(), limit, "served records from catalog");
        FetchOutcome::ok(topic, records)
    }
}

/// The built-in seed catalog.
fn builtin_catalog() -> Vec<SourceSeed> {
    vec![
        SourceSeed {
            id: "1".into(),
            title: "Sample Research on {topic}".into(),
            authors: vec!["Author A".into(), "Author B".into()],
            abstract_text: "This is a sample abstract for research on {topic}. This research \
                            explores various aspects of the topic and provides comprehensive \
                            insights."
                .into(),
            url: "https://journals.example.org/articles/sample-research".into(),
            year: 2023,
            journal: "Sample Journal".into(),
            tags: vec!["research".into(), "study".into()],
        },
        SourceSeed {
            id: "2".into(),
            title: "Analysis of {topic} Trends".into(),
            authors: vec!["Researcher C".into()],
            abstract_text: "This paper analyzes recent trends in {topic} and provides \
                            statistical data supporting various hypotheses."
                .into(),
            url: "https://journals.example.org/articles/analysis-trends".into(),
            year: 2022,
            journal: "Academic Journal".into(),
            tags: vec!["analysis".into(), "trends".into()],
        },
        SourceSeed {
            id: "3".into(),
            title: "Methodological Approaches to {topic}".into(),
            authors: vec!["Author D".into(), "Author E".into()],
            abstract_text: "A survey of methods applied to the study of {topic}, comparing \
                            their assumptions and limitations."
                .into(),
            url: "https://journals.example.org/articles/methodological-approaches".into(),
            year: 2021,
            journal: "Journal of Applied Methods".into(),
            tags: vec!["methodology".into(), "survey".into()],
        },
        SourceSeed {
            id: "4".into(),
            title: "A Comparative Review of {topic} Literature".into(),
            authors: vec!["Reviewer F".into()],
            abstract_text: "This review contrasts the major strands of published work on \
                            {topic} over the last decade."
                .into(),
            url: "https://journals.example.org/articles/comparative-review".into(),
            year: 2020,
            journal: "Review Quarterly".into(),
            tags: vec!["review".into(), "literature".into()],
        },
        SourceSeed {
            id: "5".into(),
            title: "Emerging Perspectives on {topic}".into(),
            authors: vec!["Author G".into()],
            abstract_text: "An overview of recent developments and open problems in {topic}."
                .into(),
            url: "https://journals.example.org/articles/emerging-perspectives".into(),
            year: 2024,
            journal: "Frontiers Digest".into(),
            tags: vec!["perspectives".into(), "overview".into()],
        },
    ]
}

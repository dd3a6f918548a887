//! Flattened-text rendering of an assembled document.
//!
//! The output format is a compatibility contract: UTF-8 plain text, sections
//! in fixed order (Title, Introduction, Main Body + four fixed bullets,
//! Conclusion, References), headings with Markdown `#`/`##` markers, one
//! `- {title} ({year}) - {url}` line per source. Rendering is a pure
//! function of its inputs.

use std::fmt::Write as _;

use paperwright_shared::{PaperwrightError, Result, SourceRecord};

use crate::assembler::SectionSet;

/// The fixed, topic-agnostic bullet list under the Main Body section.
pub const MAIN_BODY_BULLETS: [&str; 4] = [
    "Key concepts and theories",
    "Current state of research",
    "Critical analysis of different approaches",
    "Implications and applications",
];

/// Literal line emitted under References when no sources are available.
pub const NO_SOURCES_FALLBACK: &str = "No sources available";

// ---------------------------------------------------------------------------
// Section plan
// ---------------------------------------------------------------------------

/// One renderable section: heading, narrative body, optional fixed bullets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSection<'a> {
    /// Heading text (without the `##` marker).
    pub heading: &'static str,
    /// Narrative body paragraph.
    pub body: &'a str,
    /// Fixed bullet labels appended after the body.
    pub bullets: &'static [&'static str],
}

/// The declarative section list, in render order.
pub fn section_plan(sections: &SectionSet) -> Vec<RenderSection<'_>> {
    vec![
        RenderSection {
            heading: "Introduction",
            body: &sections.introduction,
            bullets: &[],
        },
        RenderSection {
            heading: "Main Body",
            body: &sections.main_body,
            bullets: &MAIN_BODY_BULLETS,
        },
        RenderSection {
            heading: "Conclusion",
            body: &sections.conclusion,
            bullets: &[],
        },
    ]
}

/// Format one reference line for a source record.
pub fn format_reference(record: &SourceRecord) -> String {
    format!("- {} ({}) - {}", record.title, record.year, record.url)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the flattened text form of a document.
pub fn render(title: &str, sections: &SectionSet, sources: &[SourceRecord]) -> Result<String> {
    let mut out = String::new();
    write_document(&mut out, title, sections, sources)
        .map_err(|e| PaperwrightError::generation(format!("rendering failed: {e}")))?;
    Ok(out)
}

fn write_document(
    out: &mut String,
    title: &str,
    sections: &SectionSet,
    sources: &[SourceRecord],
) -> std::fmt::Result {
    writeln!(out, "# {title}")?;

    for section in section_plan(sections) {
        writeln!(out)?;
        writeln!(out, "## {}", section.heading)?;
        writeln!(out, "{}", section.body)?;
        for bullet in section.bullets {
            writeln!(out, "- {bullet}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "## References")?;
    if sources.is_empty() {
        writeln!(out, "{NO_SOURCES_FALLBACK}")?;
    } else {
        for record in sources {
            writeln!(out, "{}", format_reference(record))?;
        }
    }

    Ok(())
}

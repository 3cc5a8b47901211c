//! Plain-text presentation of catalog data and session snapshots.
//!
//! Pure functions only: they read a catalog or a snapshot and return text,
//! which keeps the CLI a thin loop around the session.

use crate::generation::{GeneratedContent, GenerationResponse};
use crate::i18n::{LanguageCatalog, SelectedLanguages};
use crate::session::{RequestStatus, SessionSnapshot};

/// List the catalog, either flat or grouped by family.
///
/// Languages already in `selected` are marked, mirroring the disabled entries
/// of the picker.
pub fn render_catalog(
    catalog: &LanguageCatalog,
    selected: Option<&SelectedLanguages>,
    by_family: bool,
) -> String {
    let is_selected = |code: &str| selected.is_some_and(|s| s.contains(code));
    let mut out = String::new();

    if by_family {
        for family in catalog.group_by_family() {
            out.push_str(&format!("{} ({})\n", family.name, family.languages.len()));
            for record in family.languages {
                let marker = if is_selected(record.code) { " [selected]" } else { "" };
                out.push_str(&format!("  {:<7} {}{}\n", record.code, record.label(), marker));
            }
        }
    } else {
        for record in catalog.list_all() {
            let marker = if is_selected(record.code) { " [selected]" } else { "" };
            out.push_str(&format!(
                "{:<7} {:<28} {}{}\n",
                record.code,
                record.label(),
                record.family,
                marker
            ));
        }
    }

    out.push_str(&format!("{} languages & dialects", catalog.len()));
    out
}

/// Selected languages as a chip line, e.g. `Selected Languages (2): English, French`.
pub fn render_selection(selection: &SelectedLanguages, catalog: &LanguageCatalog) -> String {
    let names: Vec<&str> = selection.iter().map(|code| catalog.display_name(code)).collect();
    format!("Selected Languages ({}): {}", selection.len(), names.join(", "))
}

/// One-line status for the current snapshot.
pub fn render_status(snapshot: &SessionSnapshot) -> String {
    match &snapshot.status {
        RequestStatus::Idle => match &snapshot.error {
            Some(error) => format!("Error: {}", error),
            None => "Configure your content and generate".to_string(),
        },
        RequestStatus::Validating => "Checking request...".to_string(),
        RequestStatus::Generating => format!(
            "Generating content in {} languages...",
            snapshot.form.languages.len()
        ),
        RequestStatus::Succeeded(response) => render_timing(response),
        RequestStatus::Failed(error) => format!("Error: {}", error),
    }
}

/// `Generated in 800ms`, plus throughput when token usage was reported.
pub fn render_timing(response: &GenerationResponse) -> String {
    match response.tokens_per_second() {
        Some(rate) => format!(
            "Generated in {}ms • {} tokens/sec",
            response.processing_time_ms, rate
        ),
        None => format!("Generated in {}ms", response.processing_time_ms),
    }
}

/// Heading of the original content block.
pub fn original_heading(content: &GeneratedContent, catalog: &LanguageCatalog) -> String {
    format!("Original Content ({})", catalog.display_name(&content.language))
}

/// Heading of the `index`-th translation (zero-based).
pub fn translation_heading(
    index: usize,
    content: &GeneratedContent,
    catalog: &LanguageCatalog,
) -> String {
    match catalog.resolve(&content.language) {
        Some(record) if record.native_name != record.name => format!(
            "Translation {} ({}) - {}",
            index + 1,
            record.name,
            record.native_name
        ),
        Some(record) => format!("Translation {} ({})", index + 1, record.name),
        None => format!("Translation {} ({})", index + 1, content.language),
    }
}

/// Stats line for a block, or `None` when the service sent no metadata.
pub fn render_metadata(content: &GeneratedContent) -> Option<String> {
    content.metadata.map(|m| {
        format!(
            "{} words • {} min read • {} characters",
            m.word_count, m.estimated_reading_time_minutes, m.character_count
        )
    })
}

fn render_block(out: &mut String, heading: &str, content: &GeneratedContent) {
    let rule = "-".repeat(heading.chars().count());
    out.push_str(&format!("{}\n{}\n", heading, rule));
    out.push_str(content.content.trim_end());
    out.push('\n');
    if let Some(stats) = render_metadata(content) {
        out.push_str(&format!("\n{}\n", stats));
    }
}

/// Full result: timing line, original content, then translations in order.
pub fn render_response(response: &GenerationResponse, catalog: &LanguageCatalog) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", render_timing(response)));

    render_block(
        &mut out,
        &original_heading(&response.original_content, catalog),
        &response.original_content,
    );

    for (index, translation) in response.translations.iter().enumerate() {
        out.push('\n');
        render_block(
            &mut out,
            &translation_heading(index, translation, catalog),
            translation,
        );
    }

    out
}

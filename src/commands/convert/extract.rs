use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::warn;

const EMPTY_PAGE_PLACEHOLDER: &str = "[No text extracted]";

#[derive(Debug, Default)]
pub(super) struct ExtractedText {
    pub raw_text: String,
    pub page_count: usize,
    pub empty_page_count: usize,
    pub failure: Option<String>,
}

/// Raw page text for one PDF. Extraction failures never escape: they leave an
/// empty text and a failure message behind.
pub(super) fn extract_raw_text(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
) -> ExtractedText {
    match extract_pages_with_pdftotext(pdf_path, max_pages_per_doc) {
        Ok(pages) => ExtractedText {
            raw_text: render_pages(&pages),
            page_count: pages.len(),
            empty_page_count: pages.iter().filter(|page| page.trim().is_empty()).count(),
            failure: None,
        },
        Err(error) => {
            warn!(
                path = %pdf_path.display(),
                error = %format!("{error:#}"),
                "text extraction failed"
            );
            ExtractedText {
                failure: Some(format!("{}: {error:#}", pdf_path.display())),
                ..ExtractedText::default()
            }
        }
    }
}

/// Joins pages behind 1-indexed `--- Page N ---` separators.
pub(super) fn render_pages(pages: &[String]) -> String {
    let mut rendered = String::new();
    for (index, page) in pages.iter().enumerate() {
        let text = if page.trim().is_empty() {
            EMPTY_PAGE_PLACEHOLDER
        } else {
            page.as_str()
        };
        rendered.push_str(&format!("\n\n--- Page {} ---\n{}", index + 1, text));
    }
    rendered
}

fn extract_pages_with_pdftotext(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
) -> Result<Vec<String>> {
    let mut pdftotext = Command::new("pdftotext");
    pdftotext.args(["-enc", "UTF-8", "-f", "1"]);
    if let Some(last_page) = max_pages_per_doc {
        pdftotext.args(["-l", &last_page.to_string()]);
    }

    let output = pdftotext
        .arg(pdf_path)
        .arg("-")
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pdftotext_pages(&String::from_utf8_lossy(&output.stdout)))
}

/// pdftotext ends every page with a form feed, so the chunk after the last one
/// is not a page. Blank pages before it are kept.
pub(super) fn split_pdftotext_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    if pages.last().is_some_and(|last_page| last_page.trim().is_empty()) {
        pages.pop();
    }

    pages
}

/// Poppler build that produced the raw text, recorded in run manifests.
pub(super) fn pdftotext_version() -> Option<String> {
    let output = Command::new("pdftotext").arg("-v").output().ok()?;

    // Poppler prints its banner on stderr; older builds used stdout.
    [&output.stderr, &output.stdout]
        .into_iter()
        .find_map(|bytes| version_banner(&String::from_utf8_lossy(bytes)))
}

pub(super) fn version_banner(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

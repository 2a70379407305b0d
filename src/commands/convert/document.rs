use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use super::extract::extract_raw_text;
use crate::cli::OutputDirs;
use crate::law::{LawPipeline, ProcessedLaw};
use crate::model::DocumentOutcome;
use crate::util::{sha256_file, write_json_pretty, write_text};

/// File stem shared by the raw, clean and JSON artifacts of one source file.
pub(crate) fn base_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

pub(super) fn raw_text_path(raw_dir: &Path, base_name: &str) -> PathBuf {
    raw_dir.join(format!("{base_name}.txt"))
}

pub(crate) fn clean_text_path(clean_dir: &Path, base_name: &str) -> PathBuf {
    clean_dir.join(format!("{base_name}_clean.txt"))
}

pub(crate) fn json_path(json_dir: &Path, base_name: &str) -> PathBuf {
    json_dir.join(format!("{base_name}.json"))
}

pub(crate) fn write_structured_artifacts(
    clean_text_path: &Path,
    json_path: &Path,
    processed: &ProcessedLaw,
) -> Result<()> {
    write_text(clean_text_path, &processed.clean_text)?;
    write_json_pretty(json_path, &processed.document)
}

/// Extracts, normalizes and structures one PDF, writing all three artifacts.
/// A PDF without extractable text still gets (empty) artifacts.
pub(super) fn convert_pdf(
    pipeline: &LawPipeline,
    pdf_path: &Path,
    outputs: &OutputDirs,
    max_pages_per_doc: Option<usize>,
) -> Result<DocumentOutcome> {
    info!(path = %pdf_path.display(), "processing PDF");

    let base_name = base_name_for(pdf_path);
    let extracted = extract_raw_text(pdf_path, max_pages_per_doc);

    let raw_text_path = raw_text_path(&outputs.raw_dir, &base_name);
    write_text(&raw_text_path, &extracted.raw_text)?;

    let processed = pipeline.process(&extracted.raw_text);
    let clean_text_path = clean_text_path(&outputs.clean_dir, &base_name);
    let json_path = json_path(&outputs.json_dir, &base_name);
    write_structured_artifacts(&clean_text_path, &json_path, &processed)?;

    let sha256 = match sha256_file(pdf_path) {
        Ok(hash) => Some(hash),
        Err(error) => {
            warn!(path = %pdf_path.display(), error = %format!("{error:#}"), "failed to hash PDF");
            None
        }
    };

    let document = &processed.document;
    info!(
        base_name = %base_name,
        raw = %raw_text_path.display(),
        clean = %clean_text_path.display(),
        json = %json_path.display(),
        chapters = document.chapters.len(),
        articles = document.article_count(),
        "processed PDF"
    );

    Ok(DocumentOutcome {
        source_path: pdf_path.display().to_string(),
        sha256,
        base_name,
        extraction_ok: extracted.failure.is_none(),
        warning: extracted.failure,
        page_count: extracted.page_count,
        empty_page_count: extracted.empty_page_count,
        title: document.title.clone(),
        chapter_count: document.chapters.len(),
        section_count: document.section_count(),
        article_count: document.article_count(),
        raw_text_path: raw_text_path.display().to_string(),
        clean_text_path: clean_text_path.display().to_string(),
        json_path: json_path.display().to_string(),
    })
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::{ConvertArgs, FileArgs, OutputDirs};
use crate::commands::inventory;
use crate::law::LawPipeline;
use crate::model::{ConvertCounts, ConvertPaths, ConvertRunManifest, DocumentOutcome, ToolVersions};
use crate::util::{ensure_directory, now_utc_string, utc_compact_string, write_json_pretty};

mod document;
mod extract;

pub(crate) use document::{base_name_for, clean_text_path, json_path, write_structured_artifacts};

use document::convert_pdf;
use extract::pdftotext_version;

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: ConvertArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    // Checked before any output directory is created.
    if !args.input_dir.is_dir() {
        bail!(
            "input directory does not exist: {}",
            args.input_dir.display()
        );
    }
    ensure_output_dirs(&args.outputs)?;

    info!(input_dir = %args.input_dir.display(), run_id = %run_id, "starting conversion");

    let pdf_paths = inventory::discover_pdfs(&args.input_dir);
    if pdf_paths.is_empty() {
        warn!(
            input_dir = %args.input_dir.display(),
            "no PDF files found in input directory or its subdirectories"
        );
    }

    let pipeline = LawPipeline::new()?;
    let summary = convert_all(&pipeline, &pdf_paths, &args.outputs, args.max_pages_per_doc);

    if !args.no_manifest {
        let manifest = ConvertRunManifest {
            manifest_version: MANIFEST_VERSION,
            run_id,
            status: "completed".to_string(),
            started_at,
            updated_at: now_utc_string(),
            tool_versions: ToolVersions {
                pdftotext: pdftotext_version(),
            },
            paths: ConvertPaths {
                input_dir: args.input_dir.display().to_string(),
                raw_dir: args.outputs.raw_dir.display().to_string(),
                clean_dir: args.outputs.clean_dir.display().to_string(),
                json_dir: args.outputs.json_dir.display().to_string(),
            },
            counts: summary.counts.clone(),
            documents: summary.documents,
            warnings: summary.warnings,
        };

        let manifest_path = args.manifest_dir.join(format!(
            "convert_run_{}.json",
            utc_compact_string(started_ts)
        ));
        write_json_pretty(&manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote conversion run manifest");
    }

    info!(
        pdfs = summary.counts.pdf_count,
        processed = summary.counts.processed_pdf_count,
        extraction_failures = summary.counts.extraction_failure_count,
        chapters = summary.counts.chapter_count,
        articles = summary.counts.article_count,
        "conversion completed"
    );

    Ok(())
}

pub fn run_file(args: FileArgs) -> Result<()> {
    if !args.pdf_path.is_file() {
        bail!("PDF file does not exist: {}", args.pdf_path.display());
    }
    ensure_output_dirs(&args.outputs)?;

    let pipeline = LawPipeline::new()?;
    let outcome = convert_pdf(
        &pipeline,
        &args.pdf_path,
        &args.outputs,
        args.max_pages_per_doc,
    )?;

    if !outcome.extraction_ok {
        warn!(path = %args.pdf_path.display(), "no text extracted; wrote empty artifacts");
    }

    Ok(())
}

fn ensure_output_dirs(outputs: &OutputDirs) -> Result<()> {
    ensure_directory(&outputs.raw_dir)?;
    ensure_directory(&outputs.clean_dir)?;
    ensure_directory(&outputs.json_dir)
}

#[derive(Debug, Default)]
struct BatchSummary {
    counts: ConvertCounts,
    documents: Vec<DocumentOutcome>,
    warnings: Vec<String>,
}

impl BatchSummary {
    fn record(&mut self, outcome: DocumentOutcome) {
        self.counts.processed_pdf_count += 1;
        if !outcome.extraction_ok {
            self.counts.extraction_failure_count += 1;
        }
        self.counts.page_count += outcome.page_count;
        self.counts.empty_page_count += outcome.empty_page_count;
        self.counts.chapter_count += outcome.chapter_count;
        self.counts.section_count += outcome.section_count;
        self.counts.article_count += outcome.article_count;
        if let Some(warning) = &outcome.warning {
            self.warnings.push(warning.clone());
        }
        self.documents.push(outcome);
    }
}

/// Each PDF is handled on its own; a failing document is logged and skipped.
fn convert_all(
    pipeline: &LawPipeline,
    pdf_paths: &[PathBuf],
    outputs: &OutputDirs,
    max_pages_per_doc: Option<usize>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    summary.counts.pdf_count = pdf_paths.len();

    let mut seen_base_names = HashMap::<String, &Path>::new();

    for pdf_path in pdf_paths {
        let base_name = base_name_for(pdf_path);
        if let Some(previous) = seen_base_names.insert(base_name.clone(), pdf_path.as_path()) {
            let message = format!(
                "{} overwrites outputs of {} (shared base name '{}')",
                pdf_path.display(),
                previous.display(),
                base_name
            );
            warn!(
                path = %pdf_path.display(),
                previous = %previous.display(),
                "duplicate base name"
            );
            summary.warnings.push(message);
        }

        match convert_pdf(pipeline, pdf_path, outputs, max_pages_per_doc) {
            Ok(outcome) => summary.record(outcome),
            Err(error) => {
                warn!(
                    path = %pdf_path.display(),
                    error = %format!("{error:#}"),
                    "failed to convert PDF"
                );
                summary
                    .warnings
                    .push(format!("{}: {error:#}", pdf_path.display()));
            }
        }
    }

    summary
}

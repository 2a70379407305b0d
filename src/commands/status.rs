use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{ConvertRunManifest, PdfInventoryManifest};

const RUN_MANIFEST_PREFIX: &str = "convert_run_";

pub fn run(args: StatusArgs) -> Result<()> {
    info!(manifest_dir = %args.manifest_dir.display(), "status requested");

    match latest_run_manifest_path(&args.manifest_dir)? {
        Some(path) => {
            let manifest = read_run_manifest(&path)?;
            info!(
                path = %path.display(),
                run_id = %manifest.run_id,
                status = %manifest.status,
                started_at = %manifest.started_at,
                updated_at = %manifest.updated_at,
                input_dir = %manifest.paths.input_dir,
                pdftotext = %manifest.tool_versions.pdftotext.clone().unwrap_or_default(),
                pdfs = manifest.counts.pdf_count,
                processed = manifest.counts.processed_pdf_count,
                extraction_failures = manifest.counts.extraction_failure_count,
                pages = manifest.counts.page_count,
                empty_pages = manifest.counts.empty_page_count,
                chapters = manifest.counts.chapter_count,
                sections = manifest.counts.section_count,
                articles = manifest.counts.article_count,
                "loaded latest conversion run"
            );
            for warning in &manifest.warnings {
                warn!(warning = %warning, "run warning");
            }
        }
        None => warn!(
            manifest_dir = %args.manifest_dir.display(),
            "no conversion run manifest found"
        ),
    }

    let inventory_path = args.manifest_dir.join("pdf_inventory.json");
    if inventory_path.exists() {
        let raw = fs::read(&inventory_path)
            .with_context(|| format!("failed to read {}", inventory_path.display()))?;
        let inventory: PdfInventoryManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", inventory_path.display()))?;

        info!(
            generated_at = %inventory.generated_at,
            source = %inventory.source_directory,
            pdf_count = inventory.pdf_count,
            "loaded inventory manifest"
        );
    }

    Ok(())
}

/// Run manifests carry a compact UTC timestamp, so the newest sorts last.
fn latest_run_manifest_path(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.is_dir() {
        return Ok(None);
    }

    let mut latest: Option<PathBuf> = None;
    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(RUN_MANIFEST_PREFIX) && name.ends_with(".json"))
            .unwrap_or(false);
        if !is_run_manifest {
            continue;
        }

        if latest.as_ref().is_none_or(|current| path > *current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}

fn read_run_manifest(path: &Path) -> Result<ConvertRunManifest> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::cli::InventoryArgs;
use crate::model::{PdfEntry, PdfInventoryManifest};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};


pub fn run(args: InventoryArgs) -> Result<()> {
    if !args.input_dir.is_dir() {
        bail!(
            "input directory does not exist: {}",
            args.input_dir.display()
        );
    }

    let manifest = build_manifest(&args.input_dir)?;
    if manifest.pdf_count == 0 {
        warn!(
            input_dir = %args.input_dir.display(),
            "no PDF files found in input directory or its subdirectories"
        );
    }

    if args.dry_run {
        info!(
            pdf_count = manifest.pdf_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    write_json_pretty(&args.manifest_path, &manifest)?;
    info!(path = %args.manifest_path.display(), "wrote inventory manifest");
    info!(pdf_count = manifest.pdf_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(input_dir: &Path) -> Result<PdfInventoryManifest> {
    let pdf_paths = discover_pdfs(input_dir);

    let mut pdfs = Vec::with_capacity(pdf_paths.len());
    for path in pdf_paths {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("missing file name: {}", path.display()))?;
        let relative_path = path
            .strip_prefix(input_dir)
            .unwrap_or(&path)
            .display()
            .to_string();
        let size_bytes = fs::metadata(&path)
            .with_context(|| format!("failed to inspect {}", path.display()))?
            .len();
        let sha256 = sha256_file(&path)?;

        pdfs.push(PdfEntry {
            relative_path,
            filename,
            size_bytes,
            sha256,
        });
    }

    Ok(PdfInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: input_dir.display().to_string(),
        pdf_count: pdfs.len(),
        pdfs,
    })
}

/// Every file under `root` (recursively, following symlinks) with a `.pdf`
/// extension in any case, sorted by path. Unreadable entries are logged and
/// skipped so one bad subdirectory does not hide the rest of the tree.
pub fn discover_pdfs(root: &Path) -> Vec<PathBuf> {
    let mut pdfs = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(
                    path = %error.path().unwrap_or(root).display(),
                    error = %error,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && has_pdf_extension(path) {
            pdfs.push(path.to_path_buf());
        }
    }

    pdfs.sort();
    pdfs
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

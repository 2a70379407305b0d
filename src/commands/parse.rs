use std::fs;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ParseArgs;
use crate::commands::convert::{
    base_name_for, clean_text_path, json_path, write_structured_artifacts,
};
use crate::law::LawPipeline;
use crate::util::ensure_directory;

/// Re-runs normalization and structuring on a raw text file produced by an
/// earlier conversion, without touching the PDF.
pub fn run(args: ParseArgs) -> Result<()> {
    if !args.raw_text_path.is_file() {
        bail!(
            "raw text file does not exist: {}",
            args.raw_text_path.display()
        );
    }

    let raw_text = fs::read_to_string(&args.raw_text_path)
        .with_context(|| format!("failed to read {}", args.raw_text_path.display()))?;

    ensure_directory(&args.clean_dir)?;
    ensure_directory(&args.json_dir)?;

    let pipeline = LawPipeline::new()?;
    let processed = pipeline.process(&raw_text);

    let base_name = base_name_for(&args.raw_text_path);
    let clean_text_path = clean_text_path(&args.clean_dir, &base_name);
    let json_path = json_path(&args.json_dir, &base_name);
    write_structured_artifacts(&clean_text_path, &json_path, &processed)?;

    info!(
        source = %args.raw_text_path.display(),
        clean = %clean_text_path.display(),
        json = %json_path.display(),
        title = %processed.document.title,
        chapters = processed.document.chapters.len(),
        articles = processed.document.article_count(),
        "parsed raw text"
    );

    Ok(())
}

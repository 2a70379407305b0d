use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "loistruct",
    version,
    about = "Convert French legal-code PDFs into chapter/section/article JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process every PDF found under the input directory.
    Convert(ConvertArgs),
    /// Process a single PDF.
    File(FileArgs),
    /// Structure an already-extracted raw text file.
    Parse(ParseArgs),
    /// List every PDF under the input directory with its SHA-256.
    Inventory(InventoryArgs),
    /// Report the most recent conversion run.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OutputDirs {
    #[arg(long, default_value = "Lois/pdfs_fr_txt_raw")]
    pub raw_dir: PathBuf,

    #[arg(long, default_value = "Lois/pdfs_fr_txt_clean")]
    pub clean_dir: PathBuf,

    #[arg(long, default_value = "Lois/pdfs_fr_json")]
    pub json_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(long, default_value = "Lois/pdfs_fr")]
    pub input_dir: PathBuf,

    #[command(flatten)]
    pub outputs: OutputDirs,

    #[arg(long, default_value = "Lois/manifests")]
    pub manifest_dir: PathBuf,

    #[arg(long, default_value_t = false)]
    pub no_manifest: bool,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    pub pdf_path: PathBuf,

    #[command(flatten)]
    pub outputs: OutputDirs,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    pub raw_text_path: PathBuf,

    #[arg(long, default_value = "Lois/pdfs_fr_txt_clean")]
    pub clean_dir: PathBuf,

    #[arg(long, default_value = "Lois/pdfs_fr_json")]
    pub json_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "Lois/pdfs_fr")]
    pub input_dir: PathBuf,

    #[arg(long, default_value = "Lois/manifests/pdf_inventory.json")]
    pub manifest_path: PathBuf,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "Lois/manifests")]
    pub manifest_dir: PathBuf,
}

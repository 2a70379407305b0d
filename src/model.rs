use serde::{Deserialize, Serialize};

/// Structured form of one law, serialized with the French field names used by
/// downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "titre_loi")]
    pub title: String,
    #[serde(rename = "chapitres")]
    pub chapters: Vec<Chapter>,
}

impl Document {
    pub fn section_count(&self) -> usize {
        self.chapters
            .iter()
            .map(|chapter| chapter.sections.len())
            .sum()
    }

    pub fn article_count(&self) -> usize {
        self.chapters
            .iter()
            .map(|chapter| {
                chapter.articles.len()
                    + chapter
                        .sections
                        .iter()
                        .map(|section| section.articles.len())
                        .sum::<usize>()
            })
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "titre")]
    pub title: String,
    pub sections: Vec<Section>,
    /// Articles placed directly under the chapter, outside any section.
    pub articles: Vec<Article>,
}

impl Chapter {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.articles.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "titre")]
    pub title: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "contenu")]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEntry {
    pub relative_path: String,
    pub filename: String,
    pub size_bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub pdfs: Vec<PdfEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolVersions {
    pub pdftotext: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertPaths {
    pub input_dir: String,
    pub raw_dir: String,
    pub clean_dir: String,
    pub json_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertCounts {
    pub pdf_count: usize,
    pub processed_pdf_count: usize,
    pub extraction_failure_count: usize,
    pub page_count: usize,
    pub empty_page_count: usize,
    pub chapter_count: usize,
    pub section_count: usize,
    pub article_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub source_path: String,
    pub sha256: Option<String>,
    pub base_name: String,
    pub extraction_ok: bool,
    pub warning: Option<String>,
    pub page_count: usize,
    pub empty_page_count: usize,
    pub title: String,
    pub chapter_count: usize,
    pub section_count: usize,
    pub article_count: usize,
    pub raw_text_path: String,
    pub clean_text_path: String,
    pub json_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub tool_versions: ToolVersions,
    pub paths: ConvertPaths,
    pub counts: ConvertCounts,
    pub documents: Vec<DocumentOutcome>,
    pub warnings: Vec<String>,
}

use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug)]
pub struct LawTextNormalizer {
    page_marker: Regex,
    whitespace_run: Regex,
    structural_keyword: Regex,
}

impl LawTextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            page_marker: Regex::new(r"(?m)^--- Page \d+ ---\s*")
                .context("failed to compile page marker regex")?,
            whitespace_run: Regex::new(r"\s+").context("failed to compile whitespace regex")?,
            structural_keyword: Regex::new(r"\b(Chapitre|Section|Article)\b")
                .context("failed to compile structural keyword regex")?,
        })
    }

    /// Produces one logical line per structural keyword.
    ///
    /// Page markers are removed outright, every whitespace run (newlines
    /// included) collapses to a single space, and a line break is inserted in
    /// front of each whole-word `Chapitre`, `Section` or `Article`. Matching is
    /// case-sensitive here; only the parser is lenient about case.
    pub fn normalize(&self, raw_text: &str) -> String {
        let without_markers = self.page_marker.replace_all(raw_text, "");
        let collapsed = self.whitespace_run.replace_all(&without_markers, " ");
        let split = self
            .structural_keyword
            .replace_all(&collapsed, "\n${1}");

        split.trim().to_string()
    }
}

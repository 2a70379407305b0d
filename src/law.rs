//! Text-to-structure core: page text in, chapter/section/article tree out.

mod normalize;
mod parser;
#[cfg(test)]
mod tests;
mod title;

use anyhow::Result;

use crate::model::Document;

use normalize::LawTextNormalizer;
use parser::StructureParser;

#[derive(Debug)]
pub struct ProcessedLaw {
    pub clean_text: String,
    pub document: Document,
}

/// Normalizer and parser compiled once and shared across every document of a run.
#[derive(Debug)]
pub struct LawPipeline {
    normalizer: LawTextNormalizer,
    parser: StructureParser,
}

impl LawPipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: LawTextNormalizer::new()?,
            parser: StructureParser::new()?,
        })
    }

    pub fn process(&self, raw_text: &str) -> ProcessedLaw {
        let clean_text = self.normalizer.normalize(raw_text);
        let document = self.parser.parse_document(&clean_text);

        ProcessedLaw {
            clean_text,
            document,
        }
    }
}

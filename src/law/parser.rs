use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use super::title::clean_title;
use crate::model::{Article, Chapter, Document, Section};

/// Title of the synthetic chapter holding content seen before any `Chapitre` heading.
pub const DEFAULT_CHAPTER_TITLE: &str = "Contenu Général";

#[derive(Debug)]
pub struct StructureParser {
    chapter_heading: Regex,
    section_heading: Regex,
    article_heading: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Chapter(&'a str),
    Section(&'a str),
    Article { number: &'a str, rest: &'a str },
    Continuation(&'a str),
}

#[derive(Debug)]
struct OpenChapter {
    chapter: Chapter,
    synthetic: bool,
}

impl OpenChapter {
    fn titled(title: &str) -> Self {
        Self {
            chapter: Chapter {
                title: title.to_string(),
                ..Chapter::default()
            },
            synthetic: false,
        }
    }

    fn general() -> Self {
        Self {
            chapter: Chapter {
                title: DEFAULT_CHAPTER_TITLE.to_string(),
                ..Chapter::default()
            },
            synthetic: true,
        }
    }
}

/// Which nodes are still being filled. Each variant owns its open builders,
/// so committing a node is a move into its parent.
#[derive(Debug)]
enum ParserState {
    NoChapter,
    InChapter {
        chapter: OpenChapter,
        article: Option<Article>,
    },
    InSection {
        chapter: OpenChapter,
        section: Section,
        article: Option<Article>,
    },
}

impl ParserState {
    /// Commits the open article and section and hands back the enclosing chapter.
    fn close_section(self) -> Option<OpenChapter> {
        match self {
            ParserState::NoChapter => None,
            ParserState::InChapter {
                mut chapter,
                article,
            } => {
                chapter.chapter.articles.extend(article);
                Some(chapter)
            }
            ParserState::InSection {
                mut chapter,
                mut section,
                article,
            } => {
                section.articles.extend(article);
                chapter.chapter.sections.push(section);
                Some(chapter)
            }
        }
    }

    /// Commits the open article, if any, and opens `next` in the same container.
    fn replace_article(self, next: Article) -> Self {
        match self {
            ParserState::NoChapter => ParserState::InChapter {
                chapter: OpenChapter::general(),
                article: Some(next),
            },
            ParserState::InChapter {
                mut chapter,
                article,
            } => {
                chapter.chapter.articles.extend(article);
                ParserState::InChapter {
                    chapter,
                    article: Some(next),
                }
            }
            ParserState::InSection {
                chapter,
                mut section,
                article,
            } => {
                section.articles.extend(article);
                ParserState::InSection {
                    chapter,
                    section,
                    article: Some(next),
                }
            }
        }
    }

    fn open_article_mut(&mut self) -> Option<&mut Article> {
        match self {
            ParserState::NoChapter => None,
            ParserState::InChapter { article, .. } | ParserState::InSection { article, .. } => {
                article.as_mut()
            }
        }
    }
}

#[derive(Debug)]
struct DocumentBuilder {
    chapters: Vec<Chapter>,
    state: ParserState,
    dropped_lines: usize,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            chapters: Vec::new(),
            state: ParserState::NoChapter,
            dropped_lines: 0,
        }
    }

    fn apply(&mut self, line: LineKind<'_>) {
        let state = std::mem::replace(&mut self.state, ParserState::NoChapter);

        self.state = match line {
            LineKind::Chapter(title) => {
                if let Some(open) = state.close_section() {
                    self.commit_chapter(open);
                }
                ParserState::InChapter {
                    chapter: OpenChapter::titled(title),
                    article: None,
                }
            }
            LineKind::Section(title) => ParserState::InSection {
                chapter: state.close_section().unwrap_or_else(OpenChapter::general),
                section: Section {
                    title: title.to_string(),
                    articles: Vec::new(),
                },
                article: None,
            },
            LineKind::Article { number, rest } => state.replace_article(Article {
                number: number.to_string(),
                content: rest.to_string(),
            }),
            LineKind::Continuation(text) => {
                let mut state = state;
                match state.open_article_mut() {
                    Some(article) => {
                        article.content.push(' ');
                        article.content.push_str(text);
                    }
                    None => self.dropped_lines += 1,
                }
                state
            }
        };
    }

    fn commit_chapter(&mut self, open: OpenChapter) {
        // A general chapter that never received content is not a real chapter.
        if open.synthetic && open.chapter.is_empty() {
            return;
        }
        self.chapters.push(open.chapter);
    }

    fn finish(mut self, title: String) -> Document {
        let state = std::mem::replace(&mut self.state, ParserState::NoChapter);
        if let Some(open) = state.close_section() {
            self.commit_chapter(open);
        }

        if self.dropped_lines > 0 {
            debug!(
                dropped_lines = self.dropped_lines,
                "discarded text outside any article"
            );
        }

        Document {
            title,
            chapters: self.chapters,
        }
    }
}

impl StructureParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            chapter_heading: Regex::new(r"(?i)^chapitre\b")
                .context("failed to compile chapter heading regex")?,
            section_heading: Regex::new(r"(?i)^section\b")
                .context("failed to compile section heading regex")?,
            article_heading: Regex::new(r"(?i)^article\s+\w+")
                .context("failed to compile article heading regex")?,
        })
    }

    /// Builds the document tree from normalized text in a single forward pass.
    ///
    /// The first non-blank line is the law's title and is not parsed for
    /// structure. Never fails: lines that fit nowhere are dropped.
    pub fn parse_document(&self, normalized_text: &str) -> Document {
        let mut lines = normalized_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let title = lines.next().map(clean_title).unwrap_or_default();

        let mut builder = DocumentBuilder::new();
        for line in lines {
            builder.apply(self.classify(line));
        }

        builder.finish(title)
    }

    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if self.chapter_heading.is_match(line) {
            return LineKind::Chapter(line);
        }

        if self.section_heading.is_match(line) {
            return LineKind::Section(line);
        }

        if let Some(heading) = self.article_heading.find(line) {
            return LineKind::Article {
                number: heading.as_str(),
                rest: line[heading.end()..].trim(),
            };
        }

        LineKind::Continuation(line)
    }
}

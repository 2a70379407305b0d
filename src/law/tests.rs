use super::*;
use crate::model::{Article, Chapter, Section};

use super::parser::DEFAULT_CHAPTER_TITLE;
use super::title::clean_title;

fn parse(lines: &[&str]) -> Document {
    let parser = StructureParser::new().expect("parser regexes compile");
    parser.parse_document(&lines.join("\n"))
}

fn normalize(raw: &str) -> String {
    let normalizer = LawTextNormalizer::new().expect("normalizer regexes compile");
    normalizer.normalize(raw)
}

fn article(number: &str, content: &str) -> Article {
    Article {
        number: number.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn clean_title_truncates_at_boilerplate_marker() {
    assert_eq!(
        clean_title("LOI N 123 LOUANGE A DIEU SEUL ARTICLE PREMIER"),
        "LOI N 123"
    );
    assert_eq!(clean_title("  LOI N 7 portant code  "), "LOI N 7 portant code");
    assert_eq!(clean_title("LOUANGE A DIEU SEUL"), "");
}

#[test]
fn normalize_strips_page_markers_and_breaks_before_keywords() {
    let raw = "\n\n--- Page 1 ---\nLOI N 1\nChapitre I Dispositions\n\n--- Page 2 ---\nArticle 1 Le texte  suit.\nArticle 2 Fin.";

    assert_eq!(
        normalize(raw),
        "LOI N 1 \nChapitre I Dispositions \nArticle 1 Le texte suit. \nArticle 2 Fin."
    );
}

#[test]
fn normalize_keeps_placeholder_pages_as_text() {
    let raw = "\n\n--- Page 1 ---\n[No text extracted]\n\n--- Page 12 ---   \nSection 3";

    assert_eq!(normalize(raw), "[No text extracted] \nSection 3");
}

#[test]
fn normalize_ignores_keywords_inside_longer_words_and_other_cases() {
    let raw = "voir les Articles 3 et 4, les Sections suivantes et l'article 9";

    assert_eq!(normalize(raw), raw);
}

#[test]
fn normalize_is_stable_after_one_pass() {
    let raw = "\n\n--- Page 1 ---\nLOI   N 5\n\nChapitre premier\tObjet\nSection 1\nArticle 1 Texte\n\n--- Page 2 ---\nsuite Article 2 encore";

    let once = normalize(raw);
    let twice = normalize(&once);
    assert_eq!(once, twice);
    assert!(!once.contains("--- Page"));
}

#[test]
fn normalize_of_empty_text_is_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("\n\n--- Page 1 ---\n   \n"), "");
}

#[test]
fn articles_without_chapter_go_to_general_chapter() {
    let document = parse(&["Some Title", "Article 1 Text one."]);

    assert_eq!(document.title, "Some Title");
    assert_eq!(
        document.chapters,
        vec![Chapter {
            title: DEFAULT_CHAPTER_TITLE.to_string(),
            sections: Vec::new(),
            articles: vec![article("Article 1", "Text one.")],
        }]
    );
}

#[test]
fn chapter_section_and_article_nest_with_continuations() {
    let document = parse(&[
        "T",
        "Chapitre I",
        "Section A",
        "Article 5 Hello.",
        "continued line.",
    ]);

    assert_eq!(document.title, "T");
    assert_eq!(
        document.chapters,
        vec![Chapter {
            title: "Chapitre I".to_string(),
            sections: vec![Section {
                title: "Section A".to_string(),
                articles: vec![article("Article 5", "Hello. continued line.")],
            }],
            articles: Vec::new(),
        }]
    );
}

#[test]
fn empty_text_yields_no_chapters() {
    let pipeline = LawPipeline::new().expect("pipeline compiles");
    let processed = pipeline.process("");

    assert_eq!(processed.clean_text, "");
    assert_eq!(processed.document.title, "");
    assert!(processed.document.chapters.is_empty());
}

#[test]
fn title_only_document_has_no_chapters() {
    let document = parse(&["LOI N 1 LOUANGE A DIEU SEUL"]);

    assert_eq!(document.title, "LOI N 1");
    assert!(document.chapters.is_empty());
}

#[test]
fn articles_before_first_section_stay_on_chapter() {
    let document = parse(&[
        "T",
        "Chapitre I",
        "Article 1 a",
        "Section 1",
        "Article 2 b",
        "Chapitre II",
        "Article 3 c",
    ]);

    assert_eq!(document.chapters.len(), 2);

    let first = &document.chapters[0];
    assert_eq!(first.articles, vec![article("Article 1", "a")]);
    assert_eq!(first.sections.len(), 1);
    assert_eq!(first.sections[0].title, "Section 1");
    assert_eq!(first.sections[0].articles, vec![article("Article 2", "b")]);

    let second = &document.chapters[1];
    assert_eq!(second.title, "Chapitre II");
    assert!(second.sections.is_empty());
    assert_eq!(second.articles, vec![article("Article 3", "c")]);
}

#[test]
fn every_article_is_placed_exactly_once() {
    let document = parse(&[
        "T",
        "Article 1 a",
        "Section 1",
        "Article 2 b",
        "Section 2",
        "Article 3 c",
        "Chapitre I",
        "Article 4 d",
        "Section 3",
        "Article 5 e",
        "Article 6 f",
    ]);

    let mut numbers = Vec::new();
    for chapter in &document.chapters {
        numbers.extend(chapter.articles.iter().map(|a| a.number.clone()));
        for section in &chapter.sections {
            numbers.extend(section.articles.iter().map(|a| a.number.clone()));
        }
    }
    numbers.sort();

    assert_eq!(
        numbers,
        vec![
            "Article 1",
            "Article 2",
            "Article 3",
            "Article 4",
            "Article 5",
            "Article 6"
        ]
    );
    assert_eq!(document.article_count(), 6);
    assert_eq!(document.section_count(), 3);
}

#[test]
fn section_before_any_chapter_opens_general_chapter() {
    let document = parse(&["T", "Section 1 Définitions", "Article 1 x"]);

    assert_eq!(document.chapters.len(), 1);
    assert_eq!(document.chapters[0].title, DEFAULT_CHAPTER_TITLE);
    assert_eq!(document.chapters[0].sections[0].title, "Section 1 Définitions");
    assert_eq!(
        document.chapters[0].sections[0].articles,
        vec![article("Article 1", "x")]
    );
}

#[test]
fn general_chapter_is_kept_when_it_has_content() {
    let document = parse(&["T", "Article 1 a", "Chapitre I", "Article 2 b"]);

    let titles = document
        .chapters
        .iter()
        .map(|chapter| chapter.title.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(titles, vec![DEFAULT_CHAPTER_TITLE, "Chapitre I"]);
}

#[test]
fn text_outside_articles_is_dropped() {
    let document = parse(&[
        "T",
        "Préambule sans article",
        "Chapitre I",
        "Dispositions générales",
        "Article 1 x",
    ]);

    assert_eq!(document.chapters.len(), 1);
    assert_eq!(document.chapters[0].title, "Chapitre I");
    assert_eq!(document.chapters[0].articles, vec![article("Article 1", "x")]);
}

#[test]
fn headings_match_case_insensitively() {
    let document = parse(&["T", "CHAPITRE PREMIER", "ARTICLE PREMIER Dispositions."]);

    assert_eq!(document.chapters[0].title, "CHAPITRE PREMIER");
    assert_eq!(
        document.chapters[0].articles,
        vec![article("ARTICLE PREMIER", "Dispositions.")]
    );
}

#[test]
fn keyword_lines_that_are_not_headings_continue_the_article() {
    let document = parse(&[
        "T",
        "Article 1 voir",
        "Article",
        "Chapitres suivants",
        "Sectionnement",
    ]);

    assert_eq!(
        document.chapters[0].articles,
        vec![article(
            "Article 1",
            "voir Article Chapitres suivants Sectionnement"
        )]
    );
}

#[test]
fn bare_headings_are_accepted_as_titles() {
    let document = parse(&["T", "Chapitre", "Section", "Article 2"]);

    assert_eq!(document.chapters[0].title, "Chapitre");
    assert_eq!(document.chapters[0].sections[0].title, "Section");
    assert_eq!(
        document.chapters[0].sections[0].articles,
        vec![article("Article 2", "")]
    );
}

#[test]
fn article_content_keeps_every_body_word_in_order() {
    let raw = "\n\n--- Page 1 ---\nCODE DU TRAVAIL\nChapitre I\nArticle 1 Le salarié\nbénéficie d'un\n\n--- Page 2 ---\ncongé payé.\nArticle 2 Le contrat\nest écrit.";
    let pipeline = LawPipeline::new().expect("pipeline compiles");
    let processed = pipeline.process(raw);

    let articles = &processed.document.chapters[0].articles;
    assert_eq!(
        articles,
        &vec![
            article("Article 1", "Le salarié bénéficie d'un congé payé."),
            article("Article 2", "Le contrat est écrit."),
        ]
    );

    let body_words = processed
        .clean_text
        .lines()
        .skip(1)
        .flat_map(str::split_whitespace)
        .collect::<Vec<&str>>();
    let rebuilt_words = processed.document.chapters[0]
        .articles
        .iter()
        .flat_map(|a| a.number.split_whitespace().chain(a.content.split_whitespace()))
        .collect::<Vec<&str>>();
    assert_eq!(body_words[2..], rebuilt_words[..]);
}

#[test]
fn document_json_uses_french_keys_and_literal_accents() {
    let document = parse(&["T", "Article 1 Données à caractère personnel."]);
    let json = serde_json::to_string_pretty(&document).expect("document serializes");

    assert!(json.starts_with("{\n  \"titre_loi\": \"T\",\n  \"chapitres\": ["));
    assert!(json.contains("\"titre\": \"Contenu Général\""));
    assert!(json.contains("\"numero\": \"Article 1\""));
    assert!(json.contains("\"contenu\": \"Données à caractère personnel.\""));

    let chapter_keys = serde_json::to_value(&document.chapters[0]).expect("chapter serializes");
    let keys = chapter_keys
        .as_object()
        .expect("chapter is an object")
        .keys()
        .cloned()
        .collect::<Vec<String>>();
    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"sections".to_string()));
    assert!(keys.contains(&"articles".to_string()));
}

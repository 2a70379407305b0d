/// Boilerplate that follows the law's name on its first line.
const TITLE_BOILERPLATE_MARKERS: [&str; 1] = ["LOUANGE A DIEU SEUL"];

pub fn clean_title(raw_title: &str) -> String {
    let cut = TITLE_BOILERPLATE_MARKERS
        .iter()
        .filter_map(|marker| raw_title.find(marker))
        .min();

    match cut {
        Some(index) => raw_title[..index].trim().to_string(),
        None => raw_title.trim().to_string(),
    }
}

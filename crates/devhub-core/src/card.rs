//! Resource cards
//!
//! The view model behind a single resource card: what it shows, where it
//! links, and how much text fits before clamping.

use serde::{Deserialize, Serialize};

use crate::models::ResourceRecord;

/// Line limits applied to card text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub max_title_lines: usize,
    pub max_description_lines: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            max_title_lines: 2,
            max_description_lines: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCard {
    pub title: String,
    pub description: String,
    pub resource_path: String,
    pub source_path: String,
    pub source_name: String,
    /// Empty when the resource has no image
    pub image: String,
}

impl ComponentCard {
    pub fn from_record(record: &ResourceRecord) -> Self {
        let (source_name, source_path) = record
            .source
            .as_ref()
            .map(|s| (s.name.clone(), s.path.clone()))
            .unwrap_or_default();

        Self {
            title: record.title().to_string(),
            description: record.unfurl.description.clone().unwrap_or_default(),
            resource_path: record.resource.path.clone(),
            source_path,
            source_name,
            image: record.unfurl.image.clone().unwrap_or_default(),
        }
    }
}

/// Word-wrap `text` to `width` columns and keep at most `max_lines` lines
///
/// Clamped output ends with "..." on its last line.
pub fn clamp(text: &str, max_lines: usize, width: usize) -> Vec<String> {
    if max_lines == 0 || width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() <= max_lines {
        return lines;
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        *last = ellipsize(last, width);
    }
    lines
}

/// Shorten a line so that it fits `width` columns with a trailing "..."
fn ellipsize(line: &str, width: usize) -> String {
    let keep = width.saturating_sub(3);
    let mut shortened: String = line.chars().take(keep).collect();
    shortened.truncate(shortened.trim_end().len());
    format!("{}...", shortened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceType;

    #[test]
    fn test_card_from_full_record() {
        let record = ResourceRecord::new("1", ResourceType::Components, "Header")
            .with_path("https://design.example.com/header")
            .with_description("The site header")
            .with_image("https://img.example.com/header.png")
            .with_source("design-system", "https://github.com/example/design-system");

        let card = ComponentCard::from_record(&record);
        assert_eq!(card.title, "Header");
        assert_eq!(card.description, "The site header");
        assert_eq!(card.resource_path, "https://design.example.com/header");
        assert_eq!(card.source_name, "design-system");
        assert_eq!(card.source_path, "https://github.com/example/design-system");
        assert_eq!(card.image, "https://img.example.com/header.png");
    }

    #[test]
    fn test_card_defaults_missing_fields() {
        let record = ResourceRecord::new("1", ResourceType::People, "Jo");
        let card = ComponentCard::from_record(&record);
        assert_eq!(card.image, "");
        assert_eq!(card.description, "");
        assert_eq!(card.source_name, "");
    }

    #[test]
    fn test_clamp_short_text() {
        assert_eq!(clamp("hello world", 2, 20), vec!["hello world"]);
        assert!(clamp("", 2, 20).is_empty());
        assert!(clamp("anything", 0, 20).is_empty());
    }

    #[test]
    fn test_clamp_wraps() {
        assert_eq!(
            clamp("one two three four", 3, 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn test_clamp_truncates_with_ellipsis() {
        let lines = clamp("one two three four five six", 2, 9);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert_eq!(lines[1], "three...");
    }

    #[test]
    fn test_clamp_long_word_keeps_own_line() {
        let lines = clamp("supercalifragilistic ok", 5, 8);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }
}

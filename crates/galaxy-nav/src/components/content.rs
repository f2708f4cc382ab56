use serde::{Deserialize, Serialize};

/// Per-entity content payload, shown by the content surface as tabs.
/// Opaque to the navigation core; only the overlay reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityContent {
    pub sections: Vec<ContentSection>,
}

/// One tab of content. `key` names the tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub key: String,
    #[serde(flatten)]
    pub body: ContentBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBody {
    Text { text: String },
    Timeline { items: Vec<TimelineItem> },
    Code { language: String, snippet: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub year: String,
    pub title: String,
    pub description: String,
}

impl EntityContent {
    pub fn new(sections: Vec<ContentSection>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl ContentSection {
    pub fn text(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: ContentBody::Text { text: text.into() },
        }
    }

    /// Tab title: the key with its first character upper-cased.
    pub fn title(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_sections() {
        let json = r#"[
            { "key": "overview", "type": "text", "text": "Hello" },
            { "key": "timeline", "type": "timeline", "items": [
                { "year": "2023", "title": "Lead", "description": "Led things." }
            ] },
            { "key": "code", "type": "code", "language": "rust", "snippet": "fn main() {}" }
        ]"#;
        let content: EntityContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.sections.len(), 3);
        assert!(matches!(content.sections[1].body, ContentBody::Timeline { ref items } if items.len() == 1));
        assert!(matches!(content.sections[2].body, ContentBody::Code { ref language, .. } if language == "rust"));
    }

    #[test]
    fn title_capitalizes_first_letter() {
        assert_eq!(ContentSection::text("timeline", "").title(), "Timeline");
        assert_eq!(ContentSection::text("", "").title(), "");
    }
}

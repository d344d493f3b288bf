//! Story documents as produced by the content provider.
//!
//! The wire shape is the provider's JSON:
//!
//! ```json
//! {
//!   "title": "小兔子的冒險",
//!   "segments": [
//!     { "text": "小兔子跑走了。", "moduleHints": [{ "module": "wind", "action": "..." }] }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::paragraph::Paragraph;

/// Errors raised while building or loading story content.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A paragraph had no text to narrate.
    #[error("Paragraph text must not be empty")]
    EmptyParagraph,

    /// The document contained no paragraphs.
    #[error("Story '{0}' has no paragraphs")]
    NoParagraphs(String),

    /// Failed to read the story file.
    #[error("Failed to read story file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document was not valid story JSON.
    #[error("Invalid story document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A titled, ordered list of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "segments")]
    pub paragraphs: Vec<Paragraph>,
}

impl Story {
    /// Parse and validate a story document.
    pub fn from_json(json: &str) -> Result<Self, StoryError> {
        let story: Self = serde_json::from_str(json)?;
        story.validate()?;
        Ok(story)
    }

    /// Read, parse and validate a story document from disk.
    pub fn load(path: &Path) -> Result<Self, StoryError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let story = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            title = %story.title,
            paragraphs = story.paragraphs.len(),
            "Loaded story"
        );
        Ok(story)
    }

    fn validate(&self) -> Result<(), StoryError> {
        if self.paragraphs.is_empty() {
            return Err(StoryError::NoParagraphs(self.title.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_document() {
        let story = Story::from_json(
            r#"{
                "title": "小兔子",
                "segments": [
                    {"text": "小兔子跑走了。牠很開心！", "suggestedLines": "耶！"},
                    {"text": "太陽出來了。", "moduleHints": [{"module": "heat", "action": "打開熱燈"}]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(story.title, "小兔子");
        assert_eq!(story.paragraphs.len(), 2);
        assert_eq!(story.paragraphs[1].module_hints().len(), 1);
    }

    #[test]
    fn empty_segment_list_is_rejected() {
        let err = Story::from_json(r#"{"title": "空", "segments": []}"#).unwrap_err();
        assert!(matches!(err, StoryError::NoParagraphs(title) if title == "空"));
    }

    #[test]
    fn empty_paragraph_text_is_a_parse_error() {
        let err = Story::from_json(r#"{"segments": [{"text": ""}]}"#).unwrap_err();
        assert!(matches!(err, StoryError::Parse(_)));
    }
}

//! Paragraph and sensory module hint types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::story::StoryError;

/// Sensory device a module hint refers to.
///
/// Codes outside the known set are kept verbatim in [`SensoryModule::Other`]
/// so hints survive a deserialize/serialize cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SensoryModule {
    Wind,
    Heat,
    Vibration,
    Recording,
    Other(String),
}

impl SensoryModule {
    /// Convert module to its wire code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wind => "wind",
            Self::Heat => "heat",
            Self::Vibration => "vibration",
            Self::Recording => "recording",
            Self::Other(code) => code,
        }
    }

    /// Whether this is one of the four modules with a dedicated presentation.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for SensoryModule {
    fn from(code: String) -> Self {
        match code.as_str() {
            "wind" => Self::Wind,
            "heat" => Self::Heat,
            "vibration" => Self::Vibration,
            "recording" => Self::Recording,
            _ => Self::Other(code),
        }
    }
}

impl From<SensoryModule> for String {
    fn from(module: SensoryModule) -> Self {
        match module {
            SensoryModule::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for SensoryModule {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for SensoryModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisory suggestion to use a sensory module while a paragraph plays.
///
/// The engine never interprets hints; they are handed to the render layer
/// exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleHint {
    pub module: SensoryModule,
    pub action: String,
}

impl ModuleHint {
    pub fn new(module: SensoryModule, action: impl Into<String>) -> Self {
        Self {
            module,
            action: action.into(),
        }
    }
}

/// One narratable paragraph of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawParagraph")]
pub struct Paragraph {
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    module_hints: Vec<ModuleHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_lines: Option<String>,
}

impl Paragraph {
    /// Create a paragraph without hints.
    ///
    /// Fails with [`StoryError::EmptyParagraph`] when `text` is empty.
    pub fn new(text: impl Into<String>) -> Result<Self, StoryError> {
        let text = text.into();
        if text.is_empty() {
            return Err(StoryError::EmptyParagraph);
        }
        Ok(Self {
            text,
            module_hints: Vec::new(),
            suggested_lines: None,
        })
    }

    /// Attach module hints, replacing any existing ones.
    #[must_use]
    pub fn with_hints(mut self, hints: Vec<ModuleHint>) -> Self {
        self.module_hints = hints;
        self
    }

    /// Attach suggested performance lines.
    #[must_use]
    pub fn with_suggested_lines(mut self, lines: impl Into<String>) -> Self {
        self.suggested_lines = Some(lines.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn module_hints(&self) -> &[ModuleHint] {
        &self.module_hints
    }

    pub fn suggested_lines(&self) -> Option<&str> {
        self.suggested_lines.as_deref()
    }

    /// Length of the text in chars, the unit narrator offsets are counted in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Wire shape accepted from content providers.
///
/// `moduleHints` may be absent or an explicit `null`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParagraph {
    text: String,
    #[serde(default)]
    module_hints: Option<Vec<ModuleHint>>,
    #[serde(default)]
    suggested_lines: Option<String>,
}

impl TryFrom<RawParagraph> for Paragraph {
    type Error = StoryError;

    fn try_from(raw: RawParagraph) -> Result<Self, Self::Error> {
        let mut paragraph = Self::new(raw.text)?.with_hints(raw.module_hints.unwrap_or_default());
        paragraph.suggested_lines = raw.suggested_lines;
        Ok(paragraph)
    }
}

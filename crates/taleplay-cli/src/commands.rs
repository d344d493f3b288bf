//! Main commands enum and subcommand arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use taleplay_core::{DEFAULT_RATE, HighlightPolicy, PlaybackSettings};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Split text into narration units
    Segment {
        /// Text to segment
        text: String,
        /// Print units as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the module hints of every paragraph in a story
    Hints {
        /// Path to a story JSON document
        story: PathBuf,
        /// Print hints as JSON
        #[arg(long)]
        json: bool,
    },

    /// Narrate a story in the terminal
    Play(PlayArgs),
}

/// Which units may be drawn highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HighlightArg {
    /// Every unit, punctuation included
    All,
    /// Content units only
    Content,
}

impl From<HighlightArg> for HighlightPolicy {
    fn from(arg: HighlightArg) -> Self {
        match arg {
            HighlightArg::All => Self::AllUnits,
            HighlightArg::Content => Self::ContentOnly,
        }
    }
}

/// Arguments for `taleplay play`.
#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Path to a story JSON document
    pub story: PathBuf,

    /// Paragraph to start from (0-based)
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Speech rate (0.5 to 2.0)
    #[arg(long, env = "TALEPLAY_RATE", default_value_t = DEFAULT_RATE)]
    pub rate: f32,

    /// Voice identifier passed to the narrator
    #[arg(long, env = "TALEPLAY_VOICE")]
    pub voice: Option<String>,

    /// Simulated narration time per character at rate 1.0
    #[arg(long = "per-char-ms", env = "TALEPLAY_PER_CHAR_MS", default_value_t = 180)]
    pub per_char_ms: u64,

    /// Which units to highlight
    #[arg(long, value_enum, env = "TALEPLAY_HIGHLIGHT", default_value_t = HighlightArg::Content)]
    pub highlight: HighlightArg,

    /// Stop after the starting paragraph instead of continuing
    #[arg(long, env = "TALEPLAY_NO_ADVANCE")]
    pub no_advance: bool,
}

impl PlayArgs {
    /// Playback settings described by these arguments. Not yet validated.
    pub fn settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            rate: self.rate,
            voice: self.voice.clone(),
            highlight: self.highlight.into(),
            auto_advance: !self.no_advance,
        }
    }
}

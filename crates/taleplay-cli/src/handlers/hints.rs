//! Hints command handler.
//!
//! Lists the sensory module hints attached to each paragraph of a story.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use taleplay_core::{ModuleHint, Paragraph, Story};
use taleplay_engine::HintProjector;

use crate::error::CliError;

/// Execute the hints command.
pub fn execute(path: &Path, json: bool) -> Result<(), CliError> {
    let story = Story::load(path)?;
    if json {
        println!("{}", render_json(&story)?);
    } else {
        print!("{}", render(&story));
    }
    Ok(())
}

/// `wind: blow gently, heat: warm up`; `-` when there are none.
pub fn format_hints(hints: &[ModuleHint]) -> String {
    if hints.is_empty() {
        return "-".to_string();
    }
    hints
        .iter()
        .map(|hint| format!("{}: {}", hint.module, hint.action))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable table of paragraph hints.
pub fn render(story: &Story) -> String {
    let projector = projector(story);
    let mut out = String::new();
    if !story.title.is_empty() {
        let _ = writeln!(out, "{}\n", story.title);
    }
    for (i, paragraph) in story.paragraphs.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", i + 1, paragraph.text());
        let _ = writeln!(out, "    hints: {}", format_hints(projector.hints(i)));
    }
    out
}

/// JSON array of `{ index, hints }`, hints passed through as received.
pub fn render_json(story: &Story) -> Result<String, CliError> {
    let projector = projector(story);
    let entries: Vec<_> = (0..story.paragraphs.len())
        .map(|i| json!({ "index": i, "hints": projector.hints(i) }))
        .collect();
    serde_json::to_string_pretty(&entries).map_err(|e| CliError::Output(e.to_string()))
}

fn projector(story: &Story) -> HintProjector {
    let paragraphs: Arc<[Paragraph]> = story.paragraphs.clone().into();
    HintProjector::new(paragraphs)
}

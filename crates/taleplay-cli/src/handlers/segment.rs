//! Segment command handler.

use std::fmt::Write as _;

use taleplay_core::{Unit, UnitKind, segment};

use crate::error::CliError;

/// Execute the segment command.
pub fn execute(text: &str, json: bool) -> Result<(), CliError> {
    let units = segment(text);
    tracing::debug!(units = units.len(), "Segmented text");

    if json {
        let json = serde_json::to_string_pretty(&units)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{json}");
    } else {
        print!("{}", render(&units));
    }
    Ok(())
}

/// One line per unit: index, start offset, length, kind and text.
pub fn render(units: &[Unit]) -> String {
    let mut out = format!("{:<4} {:<6} {:<4} {:<12} Text\n", "#", "Start", "Len", "Kind");
    for (i, unit) in units.iter().enumerate() {
        let kind = match unit.kind {
            UnitKind::Content => "content",
            UnitKind::Punctuation => "punctuation",
        };
        let _ = writeln!(
            out,
            "{:<4} {:<6} {:<4} {:<12} {:?}",
            i, unit.start_offset, unit.length, kind, unit.text
        );
    }
    out
}

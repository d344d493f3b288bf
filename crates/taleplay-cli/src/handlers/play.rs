//! Play command handler.
//!
//! Narrates a story with [`PacedNarrator`] and draws the highlighted unit
//! under a progress bar for each paragraph. Ctrl-C stops narration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use taleplay_core::{Story, narrator_channel};
use taleplay_engine::{
    PacedNarrator, PlayOutcome, PlaybackSession, PlaybackState, SessionSnapshot,
};

use crate::commands::PlayArgs;
use crate::error::CliError;
use crate::handlers::hints::format_hints;

enum Step {
    Event,
    Closed,
    Interrupted,
}

/// Execute the play command.
pub async fn execute(args: &PlayArgs) -> Result<(), CliError> {
    let story = Story::load(&args.story)?;
    let finished = Arc::new(AtomicBool::new(false));
    let mut session = build_session(&story, args, Arc::clone(&finished))?;

    if !story.title.is_empty() {
        println!("{}\n", style(&story.title).bold());
    }

    match session.play() {
        PlayOutcome::Started(_) => {}
        PlayOutcome::Failed(e) => return Err(CliError::Narration(e.to_string())),
        PlayOutcome::Unavailable | PlayOutcome::Skipped => return Ok(()),
    }

    let mut view = ParagraphView::open(&session.snapshot());
    loop {
        let step = tokio::select! {
            outcome = session.wait_event() => {
                if outcome.is_some() { Step::Event } else { Step::Closed }
            }
            _ = tokio::signal::ctrl_c() => Step::Interrupted,
        };

        match step {
            Step::Event => {}
            Step::Closed => break,
            Step::Interrupted => {
                session.stop();
                view.close();
                println!("{}", style("Stopped.").dim());
                return Ok(());
            }
        }

        let snapshot = session.snapshot();
        if snapshot.current_paragraph_index != view.index {
            view.close();
            view = ParagraphView::open(&snapshot);
        }
        view.update(&snapshot);

        if session.state() == PlaybackState::Idle {
            break;
        }
    }

    view.close();
    if finished.load(Ordering::SeqCst) {
        println!("{}", style("The end.").bold());
    }
    Ok(())
}

/// Build a paced session positioned on `args.start`.
pub fn build_session(
    story: &Story,
    args: &PlayArgs,
    finished: Arc<AtomicBool>,
) -> Result<PlaybackSession, CliError> {
    let (tx, rx) = narrator_channel();
    let narrator = PacedNarrator::new(tx, Duration::from_millis(args.per_char_ms));
    let completion = move || finished.store(true, Ordering::SeqCst);

    let mut session = PlaybackSession::new(
        story.paragraphs.clone(),
        Box::new(narrator),
        rx,
        Box::new(completion),
        args.settings(),
    )?;

    if !session.go_to(args.start) {
        return Err(CliError::Arguments(format!(
            "--start {} is out of range; the story has {} paragraphs",
            args.start,
            story.paragraphs.len()
        )));
    }
    Ok(session)
}

/// Paragraph text with the highlighted unit emphasized.
pub fn highlight_line(snapshot: &SessionSnapshot) -> String {
    snapshot
        .units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            if snapshot.highlighted_unit_index == Some(i) {
                style(&unit.text).reverse().bold().to_string()
            } else {
                unit.text.clone()
            }
        })
        .collect()
}

/// Progress display for the paragraph being narrated.
struct ParagraphView {
    index: usize,
    bar: ProgressBar,
}

impl ParagraphView {
    fn open(snapshot: &SessionSnapshot) -> Self {
        println!(
            "{} {}",
            style(format!("[{}]", snapshot.position_label())).cyan(),
            format_hints(&snapshot.hints)
        );
        if let Some(lines) = &snapshot.suggested_lines {
            println!("    {}", style(lines).italic());
        }

        let total = snapshot.units.last().map_or(0, |u| u.end_offset());
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Self {
            index: snapshot.current_paragraph_index,
            bar,
        }
    }

    fn update(&self, snapshot: &SessionSnapshot) {
        self.bar.set_position(snapshot.char_progress as u64);
        self.bar.set_message(highlight_line(snapshot));
    }

    fn close(&self) {
        self.bar.finish();
    }
}

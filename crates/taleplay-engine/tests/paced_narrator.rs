//! Integration tests for `PacedNarrator` driving a real session.
//!
//! Runs on a paused tokio clock, so the pacing sleeps complete instantly
//! while elapsed virtual time still reflects the configured pace.

use std::time::Duration;

use taleplay_core::{Paragraph, PlaybackSettings, narrator_channel};
use taleplay_engine::{EventOutcome, PacedNarrator, PlaybackSession, PlaybackState};
use tokio::time::Instant;
use tokio_test::assert_ok;

const PER_CHAR: Duration = Duration::from_millis(100);

fn paced_session(texts: &[&str], settings: PlaybackSettings) -> PlaybackSession {
    let paragraphs: Vec<Paragraph> = texts.iter().map(|t| Paragraph::new(*t).unwrap()).collect();
    let (tx, rx) = narrator_channel();
    assert_ok!(PlaybackSession::new(
        paragraphs,
        Box::new(PacedNarrator::new(tx, PER_CHAR)),
        rx,
        Box::new(|| {}),
        settings,
    ))
}

/// Apply events until the session goes idle, recording the unit after each.
async fn run_to_idle(session: &mut PlaybackSession) -> Vec<Option<usize>> {
    let mut seen = Vec::new();
    while let Some(outcome) = session.wait_event().await {
        seen.push(session.current_unit_index());
        if outcome != EventOutcome::Applied && session.state() == PlaybackState::Idle {
            break;
        }
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn paced_narration_highlights_every_unit() {
    let mut session = paced_session(&["小兔子跑走了。牠很開心！"], PlaybackSettings::default());
    let start = Instant::now();

    assert!(session.play().token().is_some());
    let seen = run_to_idle(&mut session).await;

    assert_eq!(
        seen,
        [Some(0), Some(0), Some(1), Some(2), Some(3), None]
    );
    assert_eq!(session.state(), PlaybackState::Idle);
    assert_eq!(session.playback().char_progress(), 12);

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1190), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1300), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn rate_shortens_narration() {
    let settings = PlaybackSettings {
        rate: 2.0,
        ..Default::default()
    };
    let mut session = paced_session(&["小兔子跑走了。牠很開心！"], settings);
    let start = Instant::now();

    session.play();
    run_to_idle(&mut session).await;

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(590), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(700), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn stop_discards_queued_events() {
    let mut session = paced_session(&["小兔子跑走了。牠很開心！"], PlaybackSettings::default());

    session.play();
    assert_eq!(session.wait_event().await, Some(EventOutcome::Applied));
    session.stop();

    tokio::time::sleep(Duration::from_secs(5)).await;
    session.pump_events();

    assert_eq!(session.state(), PlaybackState::Idle);
    assert_eq!(session.current_unit_index(), None);
}

#[tokio::test(start_paused = true)]
async fn auto_advance_narrates_whole_story() {
    let settings = PlaybackSettings {
        auto_advance: true,
        ..Default::default()
    };
    let mut session = paced_session(&["一。", "二。", "三。"], settings);

    session.play();
    while session.wait_event().await.is_some() {
        if session.state() == PlaybackState::Idle {
            break;
        }
    }

    assert_eq!(session.current_paragraph_index(), 2);
    assert_eq!(session.state(), PlaybackState::Idle);
}

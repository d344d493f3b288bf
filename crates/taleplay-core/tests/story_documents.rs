//! Integration tests for loading story documents and segmenting their text.

use std::io::Write;

use taleplay_core::{OffsetIndex, SensoryModule, Story, StoryError, UnitKind, segment};

const STORY_JSON: &str = r#"{
    "title": "小兔子的冒險",
    "segments": [
        {
            "text": "小兔子跑走了。牠很開心！",
            "suggestedLines": "我跑得好快！",
            "moduleHints": [
                {"module": "vibration", "action": "小兔子奔跑時，打開震動馬達"},
                {"module": "wind", "action": "打開風扇感受風"}
            ]
        },
        {
            "text": "太陽出來了，暖暖的。",
            "moduleHints": null
        },
        {
            "text": "「晚安！」小兔子說。"
        }
    ]
}"#;

fn write_story(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_story_from_disk() {
    let file = write_story(STORY_JSON);
    let story = Story::load(file.path()).unwrap();

    assert_eq!(story.title, "小兔子的冒險");
    assert_eq!(story.paragraphs.len(), 3);

    let hints = story.paragraphs[0].module_hints();
    assert_eq!(hints.len(), 2);
    assert_eq!(hints[0].module, SensoryModule::Vibration);
    assert_eq!(hints[1].module, SensoryModule::Wind);
    assert!(story.paragraphs[1].module_hints().is_empty());
    assert!(story.paragraphs[2].module_hints().is_empty());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = Story::load(&path).unwrap_err();
    assert!(matches!(err, StoryError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let file = write_story("{ not json");
    assert!(matches!(
        Story::load(file.path()).unwrap_err(),
        StoryError::Parse(_)
    ));
}

#[test]
fn every_paragraph_segments_losslessly() {
    let story = Story::from_json(STORY_JSON).unwrap();
    for paragraph in &story.paragraphs {
        let units = segment(paragraph.text());
        let rejoined: String = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(rejoined, paragraph.text());

        let index = OffsetIndex::new(&units);
        assert_eq!(index.total_chars(), paragraph.char_len());
    }
}

#[test]
fn quoted_dialogue_segments_into_alternating_units() {
    let story = Story::from_json(STORY_JSON).unwrap();
    let units = segment(story.paragraphs[2].text());

    let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
    assert_eq!(texts, ["「", "晚安", "！」", "小兔子說", "。"]);
    assert_eq!(units[1].kind, UnitKind::Content);
    assert_eq!(units[2].kind, UnitKind::Punctuation);
}

#[test]
fn story_round_trips_through_json() {
    let story = Story::from_json(STORY_JSON).unwrap();
    let json = serde_json::to_string(&story).unwrap();
    let again = Story::from_json(&json).unwrap();
    assert_eq!(story, again);
}

use super::*;

fn word(text: &str, start: f64, end: f64) -> SubtitleWord {
    SubtitleWord {
        text: text.to_string(),
        start,
        end,
    }
}

#[test]
fn first_token_start_per_mode() {
    let composed = Subtitle {
        id: "s1".to_string(),
        mode: SubtitleMode::ComposedStack,
        container_end: 4.0,
        style: None,
        layout_align: None,
        lines: vec![SubtitleLine {
            style: "highlight_red".to_string(),
            words: vec![word("hi", 1.25, 1.5)],
        }],
        items: vec![],
        words: vec![],
    };
    assert_eq!(composed.first_token_start(), Some(1.25));

    let list = Subtitle {
        mode: SubtitleMode::VerticalList,
        lines: vec![],
        items: vec![ListItem {
            text: "first".to_string(),
            start: 2.0,
        }],
        ..composed.clone()
    };
    assert_eq!(list.first_token_start(), Some(2.0));

    let words = Subtitle {
        mode: SubtitleMode::WordByWord,
        lines: vec![],
        words: vec![word("go", 0.5, 0.75)],
        ..composed.clone()
    };
    assert_eq!(words.first_token_start(), Some(0.5));

    let empty = Subtitle {
        lines: vec![],
        ..composed
    };
    assert_eq!(empty.first_token_start(), None);
}

#[test]
fn script_accepts_legacy_settings_field_name() {
    let json = serde_json::json!({
        "project_settings": { "fps": 30.0, "width": 1920, "height": 1080 },
        "scenes": [],
        "subtitles": [],
        "audio_path": "audio/voice.wav"
    });
    let script: Script = serde_json::from_value(json).unwrap();
    assert_eq!(script.settings.fps, 30.0);
    assert_eq!(script.settings.width, 1920);
    assert!(script.text_track.is_empty());
}

#[test]
fn roles_and_modes_parse_snake_case() {
    assert_eq!(
        serde_json::from_str::<Role>("\"prop_secondary\"").unwrap(),
        Role::PropSecondary
    );
    assert_eq!(
        serde_json::from_str::<SubtitleMode>("\"word_by_word\"").unwrap(),
        SubtitleMode::WordByWord
    );
    assert!(serde_json::from_str::<Role>("\"narrator\"").is_err());
}

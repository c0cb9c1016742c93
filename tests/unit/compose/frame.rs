use super::*;
use crate::foundation::diag::DiagKind;
use serde_json::json;

fn base_doc() -> serde_json::Value {
    json!({
        "settings": { "fps": 30.0, "width": 1920, "height": 1080 },
        "audio_path": "audio/voiceover.mp3",
        "scenes": [
            {
                "id": "intro",
                "start": 0.0,
                "duration": 4.0,
                "layout": "avatar_right_text_left",
                "elements": [
                    {
                        "id": "host",
                        "role": "avatar",
                        "local_path": "assets/host.png",
                        "anim_enter": "pop",
                        "anim_idle": "breathe"
                    }
                ]
            }
        ],
        "subtitles": [
            {
                "id": "line1",
                "mode": "word_by_word",
                "container_end": 3.0,
                "words": [
                    { "text": "HELLO", "start": 1.0, "end": 1.5 },
                    { "text": "WORLD", "start": 1.5, "end": 2.0 }
                ]
            }
        ]
    })
}

fn engine() -> Engine {
    // Route diagnostic warnings to the test harness instead of stderr.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Engine::new(Registries::builtin())
}

fn image_count(state: &FrameState) -> usize {
    state
        .draws
        .iter()
        .filter(|op| matches!(op, DrawOp::Image { .. }))
        .count()
}

#[test]
fn identical_requests_yield_identical_frames() {
    let engine = engine();
    let session = engine.open(&base_doc());
    assert!(session.is_ready());
    for f in [0, 35, 60, 149, 10_000] {
        assert_eq!(session.frame(FrameIndex(f)), session.frame(FrameIndex(f)));
    }
}

#[test]
fn schema_failure_yields_a_diagnostic_frame_at_every_index() {
    let engine = engine();
    let mut doc = base_doc();
    doc["scenes"][0]["start"] = json!("soon");
    doc["settings"]["fps"] = json!(true);
    let session = engine.open(&doc);
    assert!(!session.is_ready());
    assert!(session.script().is_none());

    for f in [0, 77, 599] {
        let state = session.frame(FrameIndex(f));
        assert_eq!(state.canvas.width, 1920);
        assert_eq!(state.draws.len(), 2);
        assert_eq!(
            state.draws[0],
            DrawOp::Solid {
                color: ERROR_BG,
                z: Z_BACKGROUND
            }
        );
        let DrawOp::Banner { message } = &state.draws[1] else {
            panic!("expected banner, got {:?}", state.draws[1]);
        };
        assert!(message.contains("scenes[0].start"));
        assert!(message.contains("settings.fps"));
        assert!(state.audio.is_none());
    }
    // Diagnostic sessions still report a usable length.
    assert_eq!(session.total_frames(), 600);
}

#[test]
fn prop_overflow_routes_then_skips_with_one_diagnostic() {
    let engine = engine();
    let doc = json!({
        "settings": { "fps": 30.0, "width": 1920, "height": 1080 },
        "audio_path": "audio/voiceover.mp3",
        "scenes": [{
            "id": "props",
            "start": 0.0,
            "duration": 4.0,
            "layout": "props_triple_row",
            "elements": [
                { "id": "p1", "role": "prop", "local_path": "a.png" },
                { "id": "p2", "role": "prop", "local_path": "b.png" },
                { "id": "p3", "role": "prop", "local_path": "c.png" },
                { "id": "p4", "role": "prop", "local_path": "d.png" }
            ]
        }],
        "subtitles": []
    });
    let session = engine.open(&doc);
    assert!(session.is_ready());

    let mismatches: Vec<_> = session
        .diagnostics()
        .iter()
        .filter(|d| d.kind == DiagKind::AssetSlotMismatch)
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert!(mismatches[0].message.contains("'p4'"));

    // Well past the entrance so every placed prop is visible.
    let state = session.frame(FrameIndex(90));
    assert_eq!(image_count(&state), 3);
}

#[test]
fn orphaned_subtitles_never_reach_the_draw_list() {
    let engine = engine();
    let mut doc = base_doc();
    doc["subtitles"][0]["words"] = json!([
        { "text": "LOST", "start": 9.0, "end": 9.5 }
    ]);
    doc["subtitles"][0]["container_end"] = json!(10.0);
    let session = engine.open(&doc);
    assert!(session.is_ready());

    let orphans: Vec<_> = session
        .diagnostics()
        .iter()
        .filter(|d| d.kind == DiagKind::SubtitleOrphan)
        .collect();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].subtitle_id.as_deref(), Some("line1"));

    for f in 0..session.total_frames() {
        let state = session.frame(FrameIndex(f));
        assert!(
            !state.draws.iter().any(|op| matches!(op, DrawOp::Text { .. })),
            "frame {f}"
        );
    }
}

#[test]
fn strict_policy_fails_the_session_on_an_unknown_layout() {
    let mut doc = base_doc();
    doc["scenes"][0]["layout"] = json!("cinematic_hero");
    let engine = engine().with_policy(ErrorPolicy::Strict);
    let session = engine.open(&doc);
    assert!(!session.is_ready());

    let state = session.frame(FrameIndex(0));
    let DrawOp::Banner { message } = &state.draws[1] else {
        panic!("expected banner");
    };
    assert!(message.contains("cinematic_hero"));
    assert!(message.contains("text_full_center")); // lists the valid names
}

#[test]
fn strict_policy_aggregates_every_layout_violation() {
    let mut doc = base_doc();
    doc["scenes"] = json!([
        { "id": "a", "start": 0.0, "duration": 1.0, "layout": "vortex", "elements": [] },
        { "id": "b", "start": 1.0, "duration": 1.0, "layout": "nebula", "elements": [] }
    ]);
    let engine = engine().with_policy(ErrorPolicy::Strict);
    let session = engine.open(&doc);
    assert!(!session.is_ready());
    assert_eq!(
        session
            .diagnostics()
            .iter()
            .filter(|d| d.kind == DiagKind::LayoutReference)
            .count(),
        2
    );

    // The banner names both offenders, not just the first.
    let DrawOp::Banner { message } = &session.frame(FrameIndex(0)).draws[1] else {
        panic!("expected banner");
    };
    assert!(message.contains("vortex"));
    assert!(message.contains("nebula"));
}

#[test]
fn lenient_policy_skips_the_broken_scene_and_renders_the_rest() {
    let mut doc = base_doc();
    doc["scenes"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "id": "broken",
            "start": 4.0,
            "duration": 2.0,
            "layout": "cinematic_hero",
            "elements": [
                { "id": "ghost", "role": "avatar", "local_path": "g.png" }
            ]
        }));
    let engine = engine();
    let session = engine.open(&doc);
    assert!(session.is_ready());
    assert!(
        session
            .diagnostics()
            .iter()
            .any(|d| d.kind == DiagKind::LayoutReference && d.scene_id.as_deref() == Some("broken"))
    );

    // First scene renders normally.
    assert_eq!(image_count(&session.frame(FrameIndex(60))), 1);
    // The broken scene contributes nothing during its own window.
    assert_eq!(image_count(&session.frame(FrameIndex(150))), 0);
    // But it still counts toward the composition length.
    assert_eq!(session.total_frames(), 180);
}

#[test]
fn draws_are_sorted_background_to_text() {
    let engine = engine();
    let session = engine.open(&base_doc());
    // Frame 35: avatar visible and HELLO's window is open.
    let state = session.frame(FrameIndex(35));
    assert_eq!(
        state.draws[0],
        DrawOp::Solid {
            color: CANVAS_BG,
            z: Z_BACKGROUND
        }
    );
    assert!(matches!(state.draws[1], DrawOp::Image { .. }));
    assert!(matches!(state.draws.last(), Some(DrawOp::Text { .. })));

    let zs: Vec<i32> = state.draws.iter().map(DrawOp::z).collect();
    let mut sorted = zs.clone();
    sorted.sort_unstable();
    assert_eq!(zs, sorted);
}

#[test]
fn the_audio_track_rides_along_on_every_content_frame() {
    let engine = engine();
    let session = engine.open(&base_doc());
    for f in [0, 50, 149, 500] {
        assert_eq!(
            session.frame(FrameIndex(f)).audio,
            Some(AudioRef {
                path: "audio/voiceover.mp3".to_string()
            })
        );
    }
}

#[test]
fn text_track_captions_follow_their_preset_inside_an_inclusive_window() {
    let engine = engine();
    let mut doc = base_doc();
    doc["text_track"] = json!([
        { "text": "BREAKING", "style": "pop_in", "start": 1.0, "end": 2.0 }
    ]);
    let session = engine.open(&doc);
    assert!(session.is_ready());

    let caption_at = |f: u64| {
        session
            .frame(FrameIndex(f))
            .draws
            .iter()
            .find_map(|op| match op {
                DrawOp::Caption {
                    text,
                    transform,
                    opacity,
                    ..
                } => Some((text.clone(), *transform, *opacity)),
                _ => None,
            })
    };

    assert!(caption_at(29).is_none());
    // Both endpoints of the window are drawn.
    let (text, start_t, _) = caption_at(30).unwrap();
    assert_eq!(text, "BREAKING");
    assert_eq!(start_t.scale.x, 0.0); // pop_in begins from nothing
    let (_, end_t, end_o) = caption_at(60).unwrap();
    assert_eq!(end_t.scale.x, 1.0);
    assert_eq!(end_o, 1.0);
    assert!(caption_at(61).is_none());
}

#[test]
fn parallel_ranges_match_sequential_frames() {
    let engine = engine();
    let session = engine.open(&base_doc());
    let batch = session.frames(20, 80);
    assert_eq!(batch.len(), 60);
    for (offset, state) in batch.iter().enumerate() {
        assert_eq!(*state, session.frame(FrameIndex(20 + offset as u64)));
    }
}

#[test]
fn background_elements_cover_the_canvas_behind_everything() {
    let engine = engine();
    let doc = json!({
        "settings": { "fps": 30.0, "width": 1280, "height": 720 },
        "audio_path": "audio/voiceover.mp3",
        "scenes": [{
            "id": "bg",
            "start": 0.0,
            "duration": 2.0,
            "layout": "avatar_full_center",
            "elements": [
                { "id": "sky", "role": "background", "local_path": "sky.png" },
                { "id": "host", "role": "avatar", "local_path": "host.png" }
            ]
        }],
        "subtitles": []
    });
    let session = engine.open(&doc);
    let state = session.frame(FrameIndex(30));

    let rects: Vec<(String, Rect, i32)> = state
        .draws
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image {
                element_id, rect, z, ..
            } => Some((element_id.clone(), *rect, *z)),
            _ => None,
        })
        .collect();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].0, "sky");
    assert_eq!(rects[0].1, Rect::new(0.0, 0.0, 1280.0, 720.0));
    assert_eq!(rects[0].2, Z_BACKGROUND);
    assert!(rects[1].2 > rects[0].2);
}

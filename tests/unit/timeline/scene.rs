use super::*;

fn scene(start: f64, duration: f64) -> Scene {
    Scene {
        id: "s".to_string(),
        start,
        duration,
        layout: "avatar_right_text_left".to_string(),
        elements: vec![],
    }
}

#[test]
fn window_floors_start_and_ceils_duration() {
    let fps = Fps::new(30.0).unwrap();
    let w = active_window(&scene(2.0, 3.0), fps);
    assert_eq!(w.start, FrameIndex(60));
    assert_eq!(w.end, FrameIndex(150));

    let w = active_window(&scene(0.033, 0.034), fps);
    assert_eq!(w.start, FrameIndex(0)); // floor(0.99)
    assert_eq!(w.end, FrameIndex(2)); // 0 + ceil(1.02)
}

#[test]
fn overlapping_scenes_are_permitted() {
    let fps = Fps::new(30.0).unwrap();
    let a = active_window(&scene(0.0, 2.0), fps);
    let b = active_window(&scene(1.0, 2.0), fps);
    assert!(a.contains(FrameIndex(45)));
    assert!(b.contains(FrameIndex(45)));
}

#[test]
fn total_frames_sums_durations() {
    let fps = Fps::new(30.0).unwrap();
    let scenes = vec![scene(0.0, 5.0), scene(5.0, 7.0)];
    assert_eq!(total_frames(&scenes, fps), 360);
}

#[test]
fn default_window_applies_when_scenes_are_empty_or_zero() {
    let fps = Fps::new(30.0).unwrap();
    assert_eq!(total_frames(&[], fps), 600);
    let zeroed = vec![scene(0.0, 0.0), scene(3.0, 0.0)];
    assert_eq!(total_frames(&zeroed, fps), 600);

    let fps60 = Fps::new(60.0).unwrap();
    assert_eq!(total_frames(&[], fps60), 1200);
}

#[test]
fn total_frames_is_never_zero() {
    let fps = Fps::new(30.0).unwrap();
    assert_eq!(total_frames(&[scene(0.0, 0.001)], fps), 1);
}

use super::*;

#[test]
fn unknown_names_fall_back_to_default() {
    let reg = MotionRegistry::builtin();
    assert_eq!(reg.resolve("warp_speed"), MotionPreset::Default);
    assert_eq!(reg.resolve("bounce"), MotionPreset::Bounce);
    assert_eq!(reg.names().len(), 8);
}

#[test]
fn pop_in_scales_with_progress() {
    let t = MotionPreset::PopIn.transform(0.25);
    assert_eq!(t.scale, Vec2::new(0.25, 0.25));
    assert_eq!(MotionPreset::PopIn.opacity(0.25), 0.25);
}

#[test]
fn slides_travel_one_hundred_pixels() {
    let left = MotionPreset::SlideInLeft.transform(0.0);
    assert_eq!(left.translate.x, -100.0);
    let left_done = MotionPreset::SlideInLeft.transform(1.0);
    assert_eq!(left_done.translate.x, 0.0);

    let right = MotionPreset::SlideInRight.transform(0.5);
    assert_eq!(right.translate.x, 50.0);
    // Opacity floors at zero even for pre-window progress values.
    assert_eq!(MotionPreset::SlideInRight.opacity(-0.5), 0.0);
}

#[test]
fn bounce_peaks_mid_rise() {
    let quarter = MotionPreset::Bounce.transform(0.25);
    assert!((quarter.translate.y + 30.0).abs() < 1e-9);
    let end = MotionPreset::Bounce.transform(1.0);
    assert!(end.translate.y.abs() < 1e-9);
    assert_eq!(MotionPreset::Bounce.opacity(0.3), 1.0);
}

#[test]
fn progress_is_not_clamped_by_the_presets() {
    // The visibility guard lives at the call site; the preset functions
    // simply extrapolate.
    assert_eq!(MotionPreset::FadeIn.opacity(1.5), 1.5);
    let t = MotionPreset::SlideInLeft.transform(2.0);
    assert_eq!(t.translate.x, 100.0);
}

#[test]
fn highlight_red_holds_a_fixed_emphasis_scale() {
    for progress in [0.0, 0.5, 1.0] {
        let t = MotionPreset::HighlightRed.transform(progress);
        assert_eq!(t.scale, Vec2::new(1.1, 1.1));
        assert_eq!(MotionPreset::HighlightRed.opacity(progress), 1.0);
    }
}

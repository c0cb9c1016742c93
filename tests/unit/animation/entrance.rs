use super::*;

#[test]
fn unknown_names_fall_back_to_pop() {
    assert_eq!(EntranceKind::from_name("pop"), EntranceKind::Pop);
    assert_eq!(EntranceKind::from_name("slide_up"), EntranceKind::SlideUp);
    assert_eq!(EntranceKind::from_name("teleport"), EntranceKind::Pop);
    assert_eq!(EntranceKind::from_name(""), EntranceKind::Pop);
}

#[test]
fn pop_scales_from_nothing_to_identity() {
    let start = EntranceKind::Pop.at(0.0, 400.0, 600.0);
    assert_eq!(start.scale, Vec2::new(0.0, 0.0));
    let done = EntranceKind::Pop.at(1.0, 400.0, 600.0);
    assert_eq!(done, Transform2D::default());
}

#[test]
fn slides_travel_relative_to_the_slot_box() {
    let up = EntranceKind::SlideUp.at(0.0, 400.0, 600.0);
    assert_eq!(up.translate, Vec2::new(0.0, 600.0));

    let drop = EntranceKind::DropDown.at(0.0, 400.0, 600.0);
    assert_eq!(drop.translate, Vec2::new(0.0, -900.0));

    let left = EntranceKind::SlideLeft.at(0.0, 400.0, 600.0);
    assert_eq!(left.translate, Vec2::new(-400.0, 0.0));

    for kind in [
        EntranceKind::SlideUp,
        EntranceKind::DropDown,
        EntranceKind::SlideLeft,
    ] {
        assert_eq!(kind.at(1.0, 400.0, 600.0), Transform2D::default());
    }
}

#[test]
fn overshoot_carries_past_the_rest_position() {
    // v > 1 from an underdamped spring pushes slide_up above its anchor.
    let t = EntranceKind::SlideUp.at(1.1, 400.0, 600.0);
    assert!((t.translate.y + 60.0).abs() < 1e-9);
}

#[test]
fn drop_down_pivots_at_the_top() {
    assert_eq!(EntranceKind::DropDown.origin(), TransformOrigin::TopCenter);
    for kind in [
        EntranceKind::Pop,
        EntranceKind::SlideUp,
        EntranceKind::SlideLeft,
    ] {
        assert_eq!(kind.origin(), TransformOrigin::BottomCenter);
    }
}

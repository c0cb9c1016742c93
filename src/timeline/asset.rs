use crate::{
    animation::{
        entrance::EntranceKind,
        idle::IdleKind,
        spring::{SpringConfig, spring_progress},
    },
    foundation::core::{FrameIndex, Transform2D, TransformOrigin},
    script::model::Element,
};

/// Resolved visual state of one element at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementPose {
    /// Entrance transform composed with the idle oscillation.
    pub transform: Transform2D,
    /// Pivot of the transform within the slot box.
    pub origin: TransformOrigin,
    /// Tracks the entrance spring directly (no separate clamp), so
    /// underdamped overshoot reads as a flash past full opacity.
    pub opacity: f64,
}

/// Animate one element.
///
/// `delay_frames` shifts the element's eligibility within its scene; while
/// `frame < scene_start + delay_frames` the element is absent entirely, not
/// present at zero opacity. The entrance spring is keyed by frames elapsed
/// since eligibility; the idle oscillation is keyed by the absolute frame
/// number so it never resets.
pub fn animate(
    element: &Element,
    frame: FrameIndex,
    scene_start: FrameIndex,
    delay_frames: u64,
    fps: f64,
    spring: SpringConfig,
    slot_width: f64,
    slot_height: f64,
) -> Option<ElementPose> {
    let eligible_at = scene_start.0 + delay_frames;
    if frame.0 < eligible_at {
        return None;
    }
    let elapsed = frame.0 - eligible_at;

    let entrance = EntranceKind::from_name(&element.anim_enter);
    let idle = IdleKind::from_name(&element.anim_idle);

    let v = spring_progress(spring, elapsed, fps);
    let transform = entrance.at(v, slot_width, slot_height).then(idle.at(frame.0));

    Some(ElementPose {
        transform,
        origin: entrance.origin(),
        opacity: v,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/asset.rs"]
mod tests;

use crate::{
    foundation::core::{FrameIndex, FrameRange, Fps},
    script::model::Scene,
};

/// Composition length used when scenes are absent or sum to zero duration,
/// in seconds at the project frame rate (600 frames at 30 fps).
pub const DEFAULT_TOTAL_SECS: f64 = 20.0;

/// Frame window during which a scene's elements are eligible to render.
///
/// Start rounds down and duration rounds up, so content is never cut short
/// by fractional-second timings. Scenes are not required to be disjoint;
/// overlapping windows are resolved by slot z-order alone.
pub fn active_window(scene: &Scene, fps: Fps) -> FrameRange {
    let start = fps.secs_to_frame_floor(scene.start);
    let len = fps.secs_to_frames_ceil(scene.duration.max(0.0));
    FrameRange {
        start: FrameIndex(start),
        end: FrameIndex(start + len),
    }
}

/// Total composition length in frames: `ceil(fps * sum of durations)`, at
/// least 1, with the [`DEFAULT_TOTAL_SECS`] fallback when scenes are empty
/// or their durations sum to zero.
pub fn total_frames(scenes: &[Scene], fps: Fps) -> u64 {
    let sum: f64 = scenes.iter().map(|s| s.duration.max(0.0)).sum();
    if sum <= 0.0 {
        return fps.secs_to_frames_ceil(DEFAULT_TOTAL_SECS).max(1);
    }
    fps.secs_to_frames_ceil(sum).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scene.rs"]
mod tests;

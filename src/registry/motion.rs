use std::collections::BTreeMap;

use crate::foundation::core::{Transform2D, Vec2};

/// A motion preset for the flat text track: a pair of pure functions from
/// progress to transform and to opacity.
///
/// Progress is `(frame - start) / (end - start)` and is deliberately not
/// clamped here; visibility is an explicit `start <= frame <= end` guard at
/// the call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreset {
    /// Static text, fully opaque.
    Default,
    /// Slide in 100 px from the left while fading in.
    SlideInLeft,
    /// Slide in 100 px from the right while fading in.
    SlideInRight,
    /// Scale up from nothing while fading in.
    PopIn,
    /// Rotational wobble, two full sine cycles over the window.
    Shake,
    /// Fixed 1.1x emphasis scale.
    HighlightRed,
    /// Opacity tracks progress; no motion.
    FadeIn,
    /// Rise 30 px and settle, triangle-mapped sine.
    Bounce,
}

impl MotionPreset {
    /// Transform at `progress` through the display window.
    pub fn transform(self, progress: f64) -> Transform2D {
        match self {
            Self::Default | Self::FadeIn => Transform2D::default(),
            Self::SlideInLeft => Transform2D {
                translate: Vec2::new(-100.0 + progress * 100.0, 0.0),
                ..Transform2D::default()
            },
            Self::SlideInRight => Transform2D {
                translate: Vec2::new(100.0 - progress * 100.0, 0.0),
                ..Transform2D::default()
            },
            Self::PopIn => Transform2D {
                scale: Vec2::new(progress, progress),
                ..Transform2D::default()
            },
            Self::Shake => Transform2D {
                rotation_rad: ((progress * std::f64::consts::PI * 4.0).sin() * 5.0).to_radians(),
                ..Transform2D::default()
            },
            Self::HighlightRed => Transform2D {
                scale: Vec2::new(1.1, 1.1),
                ..Transform2D::default()
            },
            Self::Bounce => {
                let bounce = if progress < 0.5 {
                    progress * 2.0
                } else {
                    2.0 - progress * 2.0
                };
                Transform2D {
                    translate: Vec2::new(0.0, -((bounce * std::f64::consts::PI).sin() * 30.0)),
                    ..Transform2D::default()
                }
            }
        }
    }

    /// Opacity at `progress` through the display window.
    pub fn opacity(self, progress: f64) -> f64 {
        match self {
            Self::Default | Self::Shake | Self::HighlightRed | Self::Bounce => 1.0,
            Self::SlideInLeft | Self::SlideInRight => progress.max(0.0),
            Self::PopIn | Self::FadeIn => progress,
        }
    }
}

/// Immutable name-to-preset table for the flat text track.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MotionRegistry {
    presets: BTreeMap<String, MotionPreset>,
}

impl MotionRegistry {
    /// Empty registry, for tests that register their own presets.
    pub fn empty() -> Self {
        Self {
            presets: BTreeMap::new(),
        }
    }

    /// Register a preset under `name`, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, preset: MotionPreset) {
        self.presets.insert(name.into(), preset);
    }

    /// Look up a preset; unknown names fall back to [`MotionPreset::Default`].
    pub fn resolve(&self, name: &str) -> MotionPreset {
        self.presets
            .get(name)
            .copied()
            .unwrap_or(MotionPreset::Default)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    /// The canonical preset vocabulary.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.register("default", MotionPreset::Default);
        reg.register("slide_in_left", MotionPreset::SlideInLeft);
        reg.register("slide_in_right", MotionPreset::SlideInRight);
        reg.register("pop_in", MotionPreset::PopIn);
        reg.register("shake", MotionPreset::Shake);
        reg.register("highlight_red", MotionPreset::HighlightRed);
        reg.register("fade_in", MotionPreset::FadeIn);
        reg.register("bounce", MotionPreset::Bounce);
        reg
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/motion.rs"]
mod tests;

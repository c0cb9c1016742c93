use crate::foundation::core::{Transform2D, TransformOrigin, Vec2};

/// One-shot entrance animation, a pure function of spring progress.
///
/// Translations are expressed as fractions of the element's slot box and
/// scaled to pixels by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntranceKind {
    /// Scale up from nothing.
    Pop,
    /// Rise from one box-height below.
    SlideUp,
    /// Fall from one-and-a-half box-heights above.
    DropDown,
    /// Slide in from one box-width to the left.
    SlideLeft,
}

impl EntranceKind {
    /// Parse a script-provided name; unknown names fall back to `pop`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "slide_up" => Self::SlideUp,
            "drop_down" => Self::DropDown,
            "slide_left" => Self::SlideLeft,
            _ => Self::Pop,
        }
    }

    /// Transform at spring progress `v`, for a slot box of the given pixel
    /// size. `v` may overshoot [0, 1]; the mapping is linear so overshoot
    /// carries through to the motion.
    pub fn at(self, v: f64, box_width: f64, box_height: f64) -> Transform2D {
        match self {
            Self::Pop => Transform2D {
                scale: Vec2::new(v, v),
                ..Transform2D::default()
            },
            Self::SlideUp => Transform2D {
                translate: Vec2::new(0.0, (1.0 - v) * box_height),
                ..Transform2D::default()
            },
            Self::DropDown => Transform2D {
                translate: Vec2::new(0.0, (1.0 - v) * -1.5 * box_height),
                ..Transform2D::default()
            },
            Self::SlideLeft => Transform2D {
                translate: Vec2::new((1.0 - v) * -box_width, 0.0),
                ..Transform2D::default()
            },
        }
    }

    /// Pivot for the entrance transform. Grounded animations pivot at the
    /// bottom; `drop_down` pivots at the top so the element falls from above
    /// its anchor.
    pub fn origin(self) -> TransformOrigin {
        match self {
            Self::DropDown => TransformOrigin::TopCenter,
            _ => TransformOrigin::BottomCenter,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/entrance.rs"]
mod tests;

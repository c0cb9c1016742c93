use crate::foundation::core::{Transform2D, Vec2};

/// Continuous idle oscillation, a pure function of the absolute frame number.
///
/// Idle motion is independent of entrance progress and delay: it runs for an
/// element's entire visible lifetime and is composed with (never replacing)
/// the entrance transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleKind {
    /// Slow vertical sinusoid, ~5 px amplitude.
    Breathe,
    /// Fast horizontal jitter with a small rotational wobble.
    Shake,
    /// No idle motion.
    Still,
}

impl IdleKind {
    /// Parse a script-provided name; unknown names fall back to `breathe`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "shake" => Self::Shake,
            "still" => Self::Still,
            _ => Self::Breathe,
        }
    }

    /// Offset at an absolute frame number.
    pub fn at(self, frame: u64) -> Transform2D {
        let f = frame as f64;
        match self {
            Self::Breathe => Transform2D {
                translate: Vec2::new(0.0, (f / 30.0).sin() * 5.0),
                ..Transform2D::default()
            },
            Self::Shake => Transform2D {
                translate: Vec2::new((f / 2.0).sin() * 3.0, 0.0),
                rotation_rad: ((f / 3.0).sin() * 2.0).to_radians(),
                ..Transform2D::default()
            },
            Self::Still => Transform2D::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/idle.rs"]
mod tests;

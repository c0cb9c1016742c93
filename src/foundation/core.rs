use crate::foundation::error::{EngineError, EngineResult};

pub use kurbo::{Point, Rect, Vec2};

/// Zero-based index of one frame of the composition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(
    /// Zero-based frame number.
    pub u64,
);

/// Half-open frame interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame of the range (inclusive).
    pub start: FrameIndex,
    /// End of the range (exclusive).
    pub end: FrameIndex,
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> EngineResult<Self> {
        if start.0 > end.0 {
            return Err(EngineError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered by the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// True when `f` lies within the half-open interval.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Validated frame rate in frames per second.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fps(
    /// Frames per second; finite and strictly positive.
    pub f64,
);

impl Fps {
    /// Build a frame rate, rejecting non-finite or non-positive values.
    pub fn new(value: f64) -> EngineResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(EngineError::validation("fps must be finite and > 0"));
        }
        Ok(Self(value))
    }

    /// Frame index at which an event starting at `secs` first renders.
    pub fn secs_to_frame_floor(self, secs: f64) -> u64 {
        (secs * self.0).floor().max(0.0) as u64
    }

    /// Frame count covering a span of `secs` (rounds up to not cut content).
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.0).ceil().max(0.0) as u64
    }

    /// Seconds elapsed after `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 / self.0
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Straight (non-premultiplied) RGBA8. The engine only names colors for the
/// external rasterizer; it never blends pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Neutral white, the default token color.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Highlight red.
    pub const RED: Self = Self::opaque(255, 0, 0);
    /// Highlight green.
    pub const GREEN: Self = Self::opaque(0, 255, 0);
    /// Highlight gold (`#FFD700`).
    pub const GOLD: Self = Self::opaque(255, 215, 0);
}

/// Where an element's transform pivots, as a fraction of its slot box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransformOrigin {
    /// Pivot at the bottom edge, horizontally centered (grounded feel).
    BottomCenter,
    /// Pivot at the top edge, horizontally centered (falling feel).
    TopCenter,
}

/// Decomposed 2D transform applied around an explicit pivot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Rotation in radians, counterclockwise.
    pub rotation_rad: f64,
    /// Per-axis scale; identity is `(1, 1)`.
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Compose `self` then `other`, the way CSS chains transform functions.
    /// Translations add, rotations add, scales multiply.
    pub fn then(self, other: Self) -> Self {
        Self {
            translate: self.translate + other.translate,
            rotation_rad: self.rotation_rad + other.rotation_rad,
            scale: Vec2::new(self.scale.x * other.scale.x, self.scale.y * other.scale.y),
        }
    }

    /// Lower to a [`kurbo::Affine`] pivoting around `origin`.
    pub fn to_affine(self, origin: Point) -> kurbo::Affine {
        kurbo::Affine::translate(self.translate)
            * kurbo::Affine::translate(origin.to_vec2())
            * kurbo::Affine::rotate(self.rotation_rad)
            * kurbo::Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * kurbo::Affine::translate(-origin.to_vec2())
    }
}

//! Kinoscript is a timeline resolution and animation engine.
//!
//! It turns a structured script document (timed scenes with visual elements,
//! timed subtitle tokens, one audio track) into the exact visual state of
//! every on-screen item at any frame: positions, transforms, opacity,
//! z-order, and visible text. The output is an ordered draw list consumed by
//! an external rasterizer/encoder; the engine itself never touches pixels,
//! files, or the network.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: raw JSON -> typed [`Script`], or a fatal error list
//! 2. **Open**: [`Engine::open`] resolves layouts eagerly and collects all
//!    structural diagnostics up front
//! 3. **Compute**: [`Session::frame`] maps a frame index to a [`FrameState`]
//!    (z-sorted [`DrawOp`]s plus the audio reference)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: frame computation is referentially transparent, so
//!   frames can be produced in any order and in parallel.
//! - **No IO**: asset decoding, rasterization, and encoding are external.
//! - **Explicit registries**: layout and motion tables are injected via
//!   [`Registries`], never read from globals, so tests can substitute fakes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod compose;
mod foundation;
mod registry;
mod script;
mod timeline;

pub use animation::entrance::EntranceKind;
pub use animation::idle::IdleKind;
pub use animation::spring::{SpringConfig, SpringTuning, spring_progress};
pub use compose::frame::{
    AudioRef, DrawOp, Engine, ErrorPolicy, FrameState, Session,
};
pub use foundation::core::{
    Canvas, FrameIndex, FrameRange, Fps, Point, Rect, Rgba8, Transform2D, TransformOrigin, Vec2,
};
pub use foundation::diag::{DiagKind, Diagnostic};
pub use foundation::error::{EngineError, EngineResult};
pub use registry::Registries;
pub use registry::layout::{
    HAnchor, LayoutDef, LayoutRegistry, SlotBox, SlotKind, TEXT_ONLY_LAYOUT, VAnchor,
    Z_BACKGROUND, Z_TEXT, Z_VISUAL,
};
pub use registry::motion::{MotionPreset, MotionRegistry};
pub use script::model::{
    Element, ListItem, Role, Scene, Script, Settings, Subtitle, SubtitleLine, SubtitleMode,
    SubtitleWord, TextAlign, TextTrackItem,
};
pub use script::validate::validate_script;
pub use timeline::asset::{ElementPose, animate};
pub use timeline::scene::{DEFAULT_TOTAL_SECS, active_window, total_frames};
pub use timeline::subtitle::{ResolvedSubtitle, TokenDraw, covering_scene, highlight_color};

use rayon::prelude::*;

use crate::{
    animation::spring::SpringTuning,
    foundation::core::{Canvas, FrameIndex, Fps, Rect, Rgba8, Transform2D, TransformOrigin},
    foundation::diag::Diagnostic,
    foundation::error::EngineError,
    registry::Registries,
    registry::layout::{LayoutDef, SlotKind, Z_BACKGROUND, Z_TEXT},
    script::model::{Role, Scene, Script},
    script::validate::validate_script,
    timeline::{asset, scene as scene_tl, subtitle},
};

/// Fill behind every content frame.
const CANVAS_BG: Rgba8 = Rgba8::opaque(0x1a, 0x1a, 0x1a);
/// Fill of the full-frame diagnostic state.
const ERROR_BG: Rgba8 = Rgba8::opaque(0xff, 0x44, 0x44);
/// Canvas assumed when the document is too broken to carry its own.
const FALLBACK_CANVAS: Canvas = Canvas {
    width: 1920,
    height: 1080,
};
const FALLBACK_FPS: f64 = 30.0;

/// How structural (non-schema) validation failures are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorPolicy {
    /// Any layout-reference violation fails the whole session into
    /// diagnostic frames, like a schema error.
    Strict,
    /// Scenes with unknown layouts are skipped; everything else renders.
    /// All skips surface in the diagnostics list.
    #[default]
    Lenient,
}

/// Reference to the composition's single audio track. Attached once for the
/// whole composition, never time-sliced.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AudioRef {
    /// Path to the audio file, as given by the script.
    pub path: String,
}

/// One command of a frame's ordered draw list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Full-frame fill.
    Solid {
        /// Fill color.
        color: Rgba8,
        /// Z-order of the fill.
        z: i32,
    },
    /// One visual element, placed in its resolved slot box.
    Image {
        /// Id of the element being drawn.
        element_id: String,
        /// Id of the scene the element belongs to.
        scene_id: String,
        /// Path to the image asset, as given by the script.
        path: String,
        /// Slot box the element is placed in, in canvas coordinates.
        rect: Rect,
        /// Animation transform applied to the slot box.
        transform: Transform2D,
        /// Anchor point the transform is applied around.
        origin: TransformOrigin,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Z-order of the element.
        z: i32,
    },
    /// One resolved subtitle with its visible tokens.
    Text {
        /// The resolved subtitle and its visible tokens.
        subtitle: subtitle::ResolvedSubtitle,
        /// Z-order of the subtitle.
        z: i32,
    },
    /// One flat text-track caption (motion-preset driven).
    Caption {
        /// Caption text.
        text: String,
        /// Motion preset name driving the caption.
        style: String,
        /// Animation transform of the caption.
        transform: Transform2D,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Z-order of the caption.
        z: i32,
    },
    /// Formatted error message of the diagnostic frame.
    Banner {
        /// The formatted error message.
        message: String,
    },
}

impl DrawOp {
    fn z(&self) -> i32 {
        match self {
            Self::Solid { z, .. }
            | Self::Image { z, .. }
            | Self::Text { z, .. }
            | Self::Caption { z, .. } => *z,
            Self::Banner { .. } => i32::MAX,
        }
    }
}

/// The complete visual state of one frame: a z-sorted draw list plus the
/// audio reference. Recomputed fresh per request, never cached.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameState {
    /// The frame this state describes.
    pub frame: FrameIndex,
    /// Canvas the draw list targets.
    pub canvas: Canvas,
    /// Draw commands, back to front.
    pub draws: Vec<DrawOp>,
    /// The composition's audio track; absent on diagnostic frames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioRef>,
}

/// Engine configuration: registries plus policy and spring tuning.
///
/// The engine holds only immutable lookup tables; all per-script state lives
/// in the [`Session`] it opens.
#[derive(Clone, Debug)]
pub struct Engine {
    registries: Registries,
    policy: ErrorPolicy,
    tuning: SpringTuning,
}

impl Engine {
    /// Engine with the given registries, lenient policy, default tuning.
    pub fn new(registries: Registries) -> Self {
        Self {
            registries,
            policy: ErrorPolicy::default(),
            tuning: SpringTuning::default(),
        }
    }

    /// Replace the error policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the spring tunings.
    pub fn with_tuning(mut self, tuning: SpringTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// The lookup tables this engine resolves names against.
    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Validate a raw document and open a render session.
    ///
    /// All validation is eager: schema first (fatal), then a batch
    /// layout-reference check over every scene, then static analysis of
    /// per-element and per-subtitle skips. After this call the session's
    /// diagnostics are complete and [`Session::frame`] is pure.
    #[tracing::instrument(skip(self, doc))]
    pub fn open(&self, doc: &serde_json::Value) -> Session<'_> {
        match validate_script(doc) {
            Ok(script) => self.open_script(script),
            Err(err) => Session::failed(self, err, Vec::new()),
        }
    }

    /// Open a session from an already-typed script (skips the JSON schema
    /// pass, keeps every structural check).
    pub fn open_script(&self, script: Script) -> Session<'_> {
        let fps = match Fps::new(script.settings.fps) {
            Ok(fps) => fps,
            Err(err) => return Session::failed(self, err, Vec::new()),
        };

        let mut diagnostics = Vec::new();
        let mut layout_errors = Vec::new();
        let valid_names = self.registries.layouts.names().join(", ");
        for scene in &script.scenes {
            if self.registries.layouts.resolve(&scene.layout).is_none() {
                let message = format!(
                    "scene '{}' uses unknown layout '{}'; valid layouts: {}",
                    scene.id, scene.layout, valid_names
                );
                diagnostics.push(Diagnostic::layout_reference(&scene.id, &message));
                layout_errors.push(message);
            }
        }
        if self.policy == ErrorPolicy::Strict && !layout_errors.is_empty() {
            return Session::failed(self, EngineError::Layout(layout_errors), diagnostics);
        }

        // Static skip analysis: these never change per frame, so report once.
        for scene in &script.scenes {
            let Some(layout) = self.registries.layouts.resolve(&scene.layout) else {
                continue;
            };
            for diag in assign_slots(scene, layout).skipped {
                diagnostics.push(diag);
            }
        }
        for sub in &script.subtitles {
            if subtitle::covering_scene(sub, &script.scenes).is_none() {
                diagnostics.push(Diagnostic::subtitle_orphan(
                    &sub.id,
                    format!("subtitle '{}' has no covering scene; skipped", sub.id),
                ));
            } else if subtitle::text_zone_hidden(sub, &script.scenes, &self.registries.layouts) {
                diagnostics.push(Diagnostic::subtitle_orphan(
                    &sub.id,
                    format!(
                        "subtitle '{}' is covered by a layout without a text zone; skipped",
                        sub.id
                    ),
                ));
            }
        }

        for diag in &diagnostics {
            diag.emit();
        }

        let total = scene_tl::total_frames(&script.scenes, fps);
        Session {
            engine: self,
            outcome: Outcome::Ready {
                script: Box::new(script),
                fps,
                total,
                diagnostics,
            },
        }
    }
}

enum Outcome {
    Ready {
        script: Box<Script>,
        fps: Fps,
        total: u64,
        diagnostics: Vec<Diagnostic>,
    },
    Failed {
        message: String,
        diagnostics: Vec<Diagnostic>,
    },
}

/// An opened render session: a validated script bound to an engine.
///
/// Frame computation has no hidden state and performs no IO, so frames may be
/// requested in any order, in parallel, and recomputed idempotently.
pub struct Session<'e> {
    engine: &'e Engine,
    outcome: Outcome,
}

impl<'e> Session<'e> {
    fn failed(engine: &'e Engine, err: EngineError, diagnostics: Vec<Diagnostic>) -> Self {
        tracing::error!("session failed: {err}");
        Self {
            engine,
            outcome: Outcome::Failed {
                message: err.formatted(),
                diagnostics,
            },
        }
    }

    /// False when every frame of this session is a diagnostic frame.
    pub fn is_ready(&self) -> bool {
        matches!(self.outcome, Outcome::Ready { .. })
    }

    /// The validated script, when the session is ready.
    pub fn script(&self) -> Option<&Script> {
        match &self.outcome {
            Outcome::Ready { script, .. } => Some(script),
            Outcome::Failed { .. } => None,
        }
    }

    /// All structured skip/violation records collected at open time.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match &self.outcome {
            Outcome::Ready { diagnostics, .. } | Outcome::Failed { diagnostics, .. } => diagnostics,
        }
    }

    /// Canvas dimensions the session renders to.
    pub fn canvas(&self) -> Canvas {
        match &self.outcome {
            Outcome::Ready { script, .. } => Canvas {
                width: script.settings.width,
                height: script.settings.height,
            },
            Outcome::Failed { .. } => FALLBACK_CANVAS,
        }
    }

    /// Frame rate of the session.
    pub fn fps(&self) -> f64 {
        match &self.outcome {
            Outcome::Ready { fps, .. } => fps.0,
            Outcome::Failed { .. } => FALLBACK_FPS,
        }
    }

    /// Total composition length in frames; at least 1.
    pub fn total_frames(&self) -> u64 {
        match &self.outcome {
            Outcome::Ready { total, .. } => *total,
            Outcome::Failed { .. } => {
                Fps(FALLBACK_FPS).secs_to_frames_ceil(scene_tl::DEFAULT_TOTAL_SECS)
            }
        }
    }

    /// Compute the full visual state of one frame.
    ///
    /// Referentially transparent: identical arguments yield identical output.
    #[tracing::instrument(skip(self))]
    pub fn frame(&self, frame: FrameIndex) -> FrameState {
        match &self.outcome {
            Outcome::Failed { message, .. } => FrameState {
                frame,
                canvas: FALLBACK_CANVAS,
                draws: vec![
                    DrawOp::Solid {
                        color: ERROR_BG,
                        z: Z_BACKGROUND,
                    },
                    DrawOp::Banner {
                        message: message.clone(),
                    },
                ],
                audio: None,
            },
            Outcome::Ready { script, fps, .. } => self.content_frame(script, *fps, frame),
        }
    }

    /// Compute a contiguous range of frames in parallel. Output order and
    /// content are identical to sequential [`Session::frame`] calls.
    pub fn frames(&self, start: u64, end: u64) -> Vec<FrameState> {
        (start..end)
            .into_par_iter()
            .map(|f| self.frame(FrameIndex(f)))
            .collect()
    }

    fn content_frame(&self, script: &Script, fps: Fps, frame: FrameIndex) -> FrameState {
        let canvas = self.canvas();
        let layouts = &self.engine.registries.layouts;
        // Sort key mirrors painter's order: z, then scene, then source order.
        let mut keyed: Vec<((i32, usize, usize), DrawOp)> = Vec::new();

        keyed.push((
            (Z_BACKGROUND, 0, 0),
            DrawOp::Solid {
                color: CANVAS_BG,
                z: Z_BACKGROUND,
            },
        ));

        for (scene_idx, scene) in script.scenes.iter().enumerate() {
            let Some(layout) = layouts.resolve(&scene.layout) else {
                continue; // lenient skip, reported at open
            };
            let window = scene_tl::active_window(scene, fps);
            if !window.contains(frame) {
                continue;
            }
            let assignment = assign_slots(scene, layout);
            for placed in assignment.placed {
                let element = &scene.elements[placed.element_idx];
                let (rect, z) = match placed.target {
                    SlotTarget::Background => (
                        Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height)),
                        Z_BACKGROUND,
                    ),
                    SlotTarget::Slot(kind) => {
                        // assign_slots only places into visible slots
                        let Some(slot) = layout.slot(kind) else { continue };
                        (slot.resolve(canvas), slot.z)
                    }
                };
                let Some(pose) = asset::animate(
                    element,
                    frame,
                    window.start,
                    0,
                    fps.0,
                    self.engine.tuning.entrance,
                    rect.width(),
                    rect.height(),
                ) else {
                    continue;
                };
                keyed.push((
                    (z, 1 + scene_idx, placed.element_idx),
                    DrawOp::Image {
                        element_id: element.id.clone(),
                        scene_id: scene.id.clone(),
                        path: element.local_path.clone(),
                        rect,
                        transform: pose.transform,
                        origin: pose.origin,
                        opacity: pose.opacity,
                        z,
                    },
                ));
            }
        }

        let scene_count = script.scenes.len();
        for (sub_idx, sub) in script.subtitles.iter().enumerate() {
            if let Some(resolved) = subtitle::resolve(
                sub,
                &script.scenes,
                layouts,
                canvas,
                frame,
                fps,
                self.engine.tuning.text,
            ) {
                keyed.push((
                    (Z_TEXT, 1 + scene_count + sub_idx, 0),
                    DrawOp::Text {
                        subtitle: resolved,
                        z: Z_TEXT,
                    },
                ));
            }
        }

        let caption_base = 1 + scene_count + script.subtitles.len();
        for (item_idx, item) in script.text_track.iter().enumerate() {
            let start = fps.secs_to_frame_floor(item.start);
            let end = fps.secs_to_frame_floor(item.end);
            // Inclusive guard; progress itself is intentionally unclamped.
            if frame.0 < start || frame.0 > end || end == start {
                continue;
            }
            let progress = (frame.0 - start) as f64 / (end - start) as f64;
            let preset = self.engine.registries.motion.resolve(&item.style);
            keyed.push((
                (Z_TEXT, caption_base + item_idx, 0),
                DrawOp::Caption {
                    text: item.text.clone(),
                    style: item.style.clone(),
                    transform: preset.transform(progress),
                    opacity: preset.opacity(progress),
                    z: Z_TEXT,
                },
            ));
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        FrameState {
            frame,
            canvas,
            draws: keyed.into_iter().map(|(_, op)| op).collect(),
            audio: Some(AudioRef {
                path: script.audio_path.clone(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotTarget {
    Slot(SlotKind),
    Background,
}

#[derive(Clone, Copy, Debug)]
struct Placed {
    element_idx: usize,
    target: SlotTarget,
}

struct SlotAssignment {
    placed: Vec<Placed>,
    skipped: Vec<Diagnostic>,
}

/// Deterministically route a scene's elements into layout slots.
///
/// Role `prop` overflows into `prop_secondary` / `prop_tertiary` in source
/// order; explicit secondary/tertiary roles target their slot directly. At
/// most one element occupies a named slot; elements left without a visible
/// slot are skipped.
fn assign_slots(scene: &Scene, layout: &LayoutDef) -> SlotAssignment {
    let mut occupied = [false; 5];
    let mut placed = Vec::new();
    let mut skipped = Vec::new();

    for (element_idx, element) in scene.elements.iter().enumerate() {
        if element.role == Role::Background {
            placed.push(Placed {
                element_idx,
                target: SlotTarget::Background,
            });
            continue;
        }
        let candidates: &[SlotKind] = match element.role {
            Role::Avatar => &[SlotKind::Avatar],
            Role::Prop => &[SlotKind::Prop, SlotKind::PropSecondary, SlotKind::PropTertiary],
            Role::PropSecondary => &[SlotKind::PropSecondary],
            Role::PropTertiary => &[SlotKind::PropTertiary],
            Role::Background => unreachable!(),
        };
        let slot = candidates.iter().copied().find(|&kind| {
            layout.slot(kind).is_some() && !occupied[slot_index(kind)]
        });
        match slot {
            Some(kind) => {
                occupied[slot_index(kind)] = true;
                placed.push(Placed {
                    element_idx,
                    target: SlotTarget::Slot(kind),
                });
            }
            None => skipped.push(Diagnostic::slot_mismatch(
                &scene.id,
                format!(
                    "element '{}' (role {:?}) has no free slot in layout '{}'; skipped",
                    element.id, element.role, scene.layout
                ),
            )),
        }
    }

    SlotAssignment { placed, skipped }
}

fn slot_index(kind: SlotKind) -> usize {
    match kind {
        SlotKind::Avatar => 0,
        SlotKind::Prop => 1,
        SlotKind::PropSecondary => 2,
        SlotKind::PropTertiary => 3,
        SlotKind::TextZone => 4,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;

use crate::{
    foundation::core::{FrameIndex, FrameRange, Fps, Rect, Rgba8, Transform2D, Vec2},
    registry::layout::{LayoutRegistry, TEXT_ONLY_LAYOUT},
    script::model::{Scene, Subtitle, SubtitleMode, SubtitleWord, TextAlign},
    animation::spring::{SpringConfig, spring_progress},
};

/// Font baseline for composed-stack lines under the text-only layout.
const FONT_COMPOSED_LARGE: f64 = 120.0;
/// Font baseline for composed-stack lines under mixed layouts.
const FONT_COMPOSED_SMALL: f64 = 64.0;
/// Font size for vertical-list items.
const FONT_LIST: f64 = 60.0;
/// Font size for word-by-word tokens.
const FONT_WORD: f64 = 48.0;
/// Font scale applied to highlighted words.
const HIGHLIGHT_SCALE: f64 = 1.15;

/// One subtitle token ready to draw. Geometry inside the text zone (line
/// wrapping, word advance) is the rasterizer's job; the engine fixes stacking
/// order, style, and animation state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TokenDraw {
    /// Displayed text.
    pub text: String,
    /// Vertical stacking position (line index, or item index for lists).
    pub line: u32,
    /// Position within the line.
    pub index: u32,
    /// Font size in pixels, after any highlight scaling.
    pub font_px: f64,
    /// Token color, after any highlight substitution.
    pub color: Rgba8,
    /// True while the frame lies inside this word's own timing window.
    pub highlighted: bool,
    /// Spring-driven pop transform.
    pub transform: Transform2D,
    /// Spring progress; overshoots above 1 for underdamped tunings.
    pub opacity: f64,
}

/// A subtitle resolved at one frame: its text zone plus visible tokens.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedSubtitle {
    /// Identifier of the source subtitle.
    pub subtitle_id: String,
    /// Display mode of the source subtitle.
    pub mode: SubtitleMode,
    /// Horizontal alignment inside the text zone.
    pub align: TextAlign,
    /// Text zone in canvas pixels.
    pub zone: Rect,
    /// Tokens visible at the requested frame.
    pub tokens: Vec<TokenDraw>,
}

/// The scene whose active window contains the subtitle's first token start.
/// `None` means the subtitle is orphaned and never drawn.
pub fn covering_scene<'a>(subtitle: &Subtitle, scenes: &'a [Scene]) -> Option<&'a Scene> {
    let start = subtitle.first_token_start()?;
    scenes
        .iter()
        .find(|scene| scene.start <= start && start < scene.start + scene.duration)
}

/// Resolve one subtitle at one frame against its covering layout.
///
/// Returns `None` when the subtitle is orphaned, the covering layout hides
/// its text zone, or no token is visible at `frame`. Orphan/suppression
/// diagnostics are reported once at session build, not per frame.
pub fn resolve(
    subtitle: &Subtitle,
    scenes: &[Scene],
    layouts: &LayoutRegistry,
    canvas: crate::foundation::core::Canvas,
    frame: FrameIndex,
    fps: Fps,
    spring: SpringConfig,
) -> Option<ResolvedSubtitle> {
    let scene = covering_scene(subtitle, scenes)?;
    let layout = layouts.resolve(&scene.layout)?;
    let zone = layout.text_zone?.resolve(canvas);

    let tokens = match subtitle.mode {
        SubtitleMode::ComposedStack => {
            composed_tokens(subtitle, &scene.layout, frame, fps, spring)?
        }
        SubtitleMode::WordByWord => word_tokens(subtitle, frame, fps, spring),
        SubtitleMode::VerticalList => list_tokens(subtitle, frame, fps, spring),
    };
    if tokens.is_empty() {
        return None;
    }

    Some(ResolvedSubtitle {
        subtitle_id: subtitle.id.clone(),
        mode: subtitle.mode,
        align: subtitle.layout_align.unwrap_or(TextAlign::Center),
        zone,
        tokens,
    })
}

/// Highlight color for a style name; unmatched styles get neutral white.
pub fn highlight_color(style: &str) -> Rgba8 {
    match style {
        "highlight_red" => Rgba8::RED,
        "highlight_green" => Rgba8::GREEN,
        "highlight_yellow" => Rgba8::GOLD,
        _ => Rgba8::WHITE,
    }
}

fn token_window(start_secs: f64, len_secs: f64, fps: Fps) -> FrameRange {
    let start = fps.secs_to_frame_floor(start_secs);
    FrameRange {
        start: FrameIndex(start),
        end: FrameIndex(start + fps.secs_to_frames_ceil(len_secs.max(0.0))),
    }
}

fn word_is_active(word: &SubtitleWord, frame: FrameIndex, fps: Fps) -> bool {
    token_window(word.start, word.end - word.start, fps).contains(frame)
}

fn pop_transform(v: f64) -> Transform2D {
    Transform2D {
        scale: Vec2::new(v, v),
        ..Transform2D::default()
    }
}

/// All words across all lines share one window and one spring, keyed by the
/// frame offset into the window. Per-word state only decides highlighting.
fn composed_tokens(
    subtitle: &Subtitle,
    layout_name: &str,
    frame: FrameIndex,
    fps: Fps,
    spring: SpringConfig,
) -> Option<Vec<TokenDraw>> {
    let first_start = subtitle.first_token_start()?;
    let window = token_window(first_start, subtitle.container_end - first_start, fps);
    if !window.contains(frame) {
        return Some(Vec::new());
    }
    let v = spring_progress(spring, frame.0 - window.start.0, fps.0);
    let transform = pop_transform(v);

    let base_font = if layout_name == TEXT_ONLY_LAYOUT {
        FONT_COMPOSED_LARGE
    } else {
        FONT_COMPOSED_SMALL
    };

    let mut tokens = Vec::new();
    for (li, line) in subtitle.lines.iter().enumerate() {
        let color = highlight_color(&line.style);
        for (wi, word) in line.words.iter().enumerate() {
            let highlighted = word_is_active(word, frame, fps);
            tokens.push(TokenDraw {
                text: word.text.clone(),
                line: li as u32,
                index: wi as u32,
                font_px: if highlighted {
                    base_font * HIGHLIGHT_SCALE
                } else {
                    base_font
                },
                color: if highlighted { color } else { Rgba8::WHITE },
                highlighted,
                transform,
                opacity: v,
            });
        }
    }
    Some(tokens)
}

/// Each word is an independent block with its own window and spring.
fn word_tokens(
    subtitle: &Subtitle,
    frame: FrameIndex,
    fps: Fps,
    spring: SpringConfig,
) -> Vec<TokenDraw> {
    let color = highlight_color(subtitle.style.as_deref().unwrap_or(""));
    subtitle
        .words
        .iter()
        .enumerate()
        .filter_map(|(wi, word)| {
            let window = token_window(word.start, word.end - word.start, fps);
            if !window.contains(frame) {
                return None;
            }
            let v = spring_progress(spring, frame.0 - window.start.0, fps.0);
            Some(TokenDraw {
                text: word.text.clone(),
                line: 0,
                index: wi as u32,
                font_px: FONT_WORD,
                color,
                highlighted: false,
                transform: pop_transform(v),
                opacity: v,
            })
        })
        .collect()
}

/// Items appear at their start time, stay until the container closes, and
/// stack vertically in source order.
fn list_tokens(
    subtitle: &Subtitle,
    frame: FrameIndex,
    fps: Fps,
    spring: SpringConfig,
) -> Vec<TokenDraw> {
    let color = highlight_color(subtitle.style.as_deref().unwrap_or(""));
    subtitle
        .items
        .iter()
        .enumerate()
        .filter_map(|(ii, item)| {
            let window = token_window(item.start, subtitle.container_end - item.start, fps);
            if !window.contains(frame) {
                return None;
            }
            let v = spring_progress(spring, frame.0 - window.start.0, fps.0);
            Some(TokenDraw {
                text: item.text.clone(),
                line: ii as u32,
                index: 0,
                font_px: FONT_LIST,
                color,
                highlighted: false,
                transform: pop_transform(v),
                opacity: v,
            })
        })
        .collect()
}

/// True when the subtitle's covering layout suppresses text entirely.
pub fn text_zone_hidden(subtitle: &Subtitle, scenes: &[Scene], layouts: &LayoutRegistry) -> bool {
    covering_scene(subtitle, scenes)
        .and_then(|scene| layouts.resolve(&scene.layout))
        .is_some_and(|layout| layout.text_zone.is_none())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/subtitle.rs"]
mod tests;

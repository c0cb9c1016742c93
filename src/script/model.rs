/// A complete script document.
///
/// The script is a pure data model, parsed once per render session and
/// immutable thereafter. It is produced by an upstream authoring/asset
/// pipeline; `local_path` fields are expected to reference existing files,
/// which the engine never opens.
///
/// Turning a script into per-frame draw lists is performed by
/// [`crate::Engine::open`] / [`crate::Session::frame`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Global render settings (frame rate and canvas size).
    #[serde(alias = "project_settings")]
    pub settings: Settings,
    /// Timed scenes. Windows may overlap; z-order alone resolves precedence.
    pub scenes: Vec<Scene>,
    /// Structured subtitle entities, independent of scenes.
    pub subtitles: Vec<Subtitle>,
    /// Single audio track for the whole composition.
    pub audio_path: String,
    /// Legacy flat text track, rendered through the motion-preset table.
    #[serde(default)]
    pub text_track: Vec<TextTrackItem>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
/// Global render settings.
pub struct Settings {
    /// Frame rate in frames per second.
    pub fps: f64,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A timed container of visual elements governed by one layout.
pub struct Scene {
    /// Scene identifier (stable within a script).
    pub id: String,
    /// Scene start time in seconds.
    pub start: f64,
    /// Scene duration in seconds.
    pub duration: f64,
    /// Name of the governing layout; must exist in the layout registry.
    pub layout: String,
    /// Visual elements owned by this scene.
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One visual asset with an entrance and idle animation.
pub struct Element {
    /// Element identifier.
    pub id: String,
    /// Which slot family this element targets.
    pub role: Role,
    /// Generation prompt, carried through for provenance only.
    #[serde(default)]
    pub prompt: String,
    /// Path to the already-materialized image file.
    #[serde(default)]
    pub local_path: String,
    /// Entrance animation name; unknown names fall back to `pop`.
    #[serde(default)]
    pub anim_enter: String,
    /// Idle animation name; unknown names fall back to `breathe`.
    #[serde(default)]
    pub anim_idle: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Slot family an element renders into.
pub enum Role {
    /// Character artwork.
    Avatar,
    /// Primary prop.
    Prop,
    /// Secondary prop.
    PropSecondary,
    /// Tertiary prop.
    PropTertiary,
    /// Full-frame backdrop behind everything.
    Background,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A timed text entity. References scenes only indirectly, by timestamp
/// overlap of its first token.
pub struct Subtitle {
    /// Subtitle identifier.
    pub id: String,
    /// Display mode; decides which of `lines`/`items`/`words` is read.
    pub mode: SubtitleMode,
    /// Time at which the subtitle's display window closes, in seconds.
    pub container_end: f64,
    /// Optional style name (flat track styles; carried through to tokens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Optional horizontal alignment inside the text zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_align: Option<TextAlign>,
    /// Lines for `composed_stack` mode.
    #[serde(default)]
    pub lines: Vec<SubtitleLine>,
    /// Items for `vertical_list` mode.
    #[serde(default)]
    pub items: Vec<ListItem>,
    /// Words for `word_by_word` mode.
    #[serde(default)]
    pub words: Vec<SubtitleWord>,
}

impl Subtitle {
    /// Start time of the first token, used to locate the covering scene.
    pub fn first_token_start(&self) -> Option<f64> {
        match self.mode {
            SubtitleMode::ComposedStack => self
                .lines
                .first()
                .and_then(|line| line.words.first())
                .map(|w| w.start),
            SubtitleMode::VerticalList => self.items.first().map(|i| i.start),
            SubtitleMode::WordByWord => self.words.first().map(|w| w.start),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Subtitle display mode.
pub enum SubtitleMode {
    /// Grouped lines/words sharing one timing window and one spring.
    ComposedStack,
    /// Independent stacked items, each with its own window.
    VerticalList,
    /// Independent single words, each with its own window.
    WordByWord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal alignment of tokens inside the text zone.
pub enum TextAlign {
    /// Flush left within the text zone.
    Left,
    /// Centered within the text zone.
    Center,
    /// Flush right within the text zone.
    Right,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One styled line of a `composed_stack` subtitle.
pub struct SubtitleLine {
    /// Style name; matched against the highlight-color table.
    pub style: String,
    /// Timed words of this line.
    pub words: Vec<SubtitleWord>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One timed word.
pub struct SubtitleWord {
    /// Displayed text.
    pub text: String,
    /// Word start in seconds.
    pub start: f64,
    /// Word end in seconds; `start <= end`.
    pub end: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One timed item of a `vertical_list` subtitle. Items stay visible until
/// the container closes.
pub struct ListItem {
    /// Displayed text.
    pub text: String,
    /// Item start in seconds.
    pub start: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One entry of the legacy flat text track.
pub struct TextTrackItem {
    /// Displayed text.
    pub text: String,
    /// Display window start in seconds.
    pub start: f64,
    /// Display window end in seconds.
    pub end: f64,
    /// Motion-preset name; unknown names fall back to `default`.
    #[serde(default)]
    pub style: String,
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;

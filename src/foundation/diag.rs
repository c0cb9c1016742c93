/// Kind discriminator for non-fatal diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DiagKind {
    /// A scene names a layout absent from the registry.
    LayoutReference,
    /// An element's role has no visible slot in its scene's resolved layout.
    AssetSlotMismatch,
    /// A subtitle has no covering scene, or its covering layout hides text.
    SubtitleOrphan,
}

/// One structured record for the external logging/observability sink.
///
/// The engine collects these during eager session validation; it does not own
/// log transport or persistence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagKind,
    /// Offending scene, when the record concerns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    /// Offending subtitle, when the record concerns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle_id: Option<String>,
    /// Human-readable description of the skip.
    pub message: String,
}

impl Diagnostic {
    /// Record a scene referencing a layout absent from the registry.
    pub fn layout_reference(scene_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagKind::LayoutReference,
            scene_id: Some(scene_id.into()),
            subtitle_id: None,
            message: message.into(),
        }
    }

    /// Record an element whose role has no free visible slot.
    pub fn slot_mismatch(scene_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagKind::AssetSlotMismatch,
            scene_id: Some(scene_id.into()),
            subtitle_id: None,
            message: message.into(),
        }
    }

    /// Record a subtitle that will never be drawn.
    pub fn subtitle_orphan(subtitle_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagKind::SubtitleOrphan,
            scene_id: None,
            subtitle_id: Some(subtitle_id.into()),
            message: message.into(),
        }
    }

    /// Mirror the record onto the tracing sink so operators see skips even
    /// when they never read the structured list.
    pub fn emit(&self) {
        tracing::warn!(
            kind = ?self.kind,
            scene_id = self.scene_id.as_deref(),
            subtitle_id = self.subtitle_id.as_deref(),
            "{}",
            self.message
        );
    }
}

pub mod layout;
pub mod motion;

use crate::registry::{layout::LayoutRegistry, motion::MotionRegistry};

/// The read-only lookup tables the engine resolves names against.
///
/// Registries are populated once and passed into [`crate::Engine::new`], never
/// referenced as globals, so tests can substitute reduced or fake tables.
/// After construction they are only ever read, which makes unsynchronized
/// concurrent access from frame-computation workers safe.
///
/// The entrance/idle animation vocabulary is a closed set
/// ([`crate::EntranceKind`] / [`crate::IdleKind`]) with documented name
/// fallbacks, so it needs no table here.
#[derive(Clone, Debug)]
pub struct Registries {
    /// Named layout catalog.
    pub layouts: LayoutRegistry,
    /// Motion presets for the flat text track.
    pub motion: MotionRegistry,
}

impl Registries {
    /// The canonical built-in tables.
    pub fn builtin() -> Self {
        Self {
            layouts: LayoutRegistry::builtin(),
            motion: MotionRegistry::builtin(),
        }
    }
}

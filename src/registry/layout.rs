use std::collections::BTreeMap;

use crate::foundation::core::{Canvas, Rect};

/// Z tier for full-frame backgrounds.
pub const Z_BACKGROUND: i32 = 0;
/// Z tier for avatar/prop slots.
pub const Z_VISUAL: i32 = 20;
/// Z tier for the text zone (always topmost).
pub const Z_TEXT: i32 = 100;

/// The layout whose text zone spans the whole frame; composed-stack lines
/// use a larger font baseline when covered by it.
pub const TEXT_ONLY_LAYOUT: &str = "text_full_center";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Named position target within a layout.
pub enum SlotKind {
    /// Character artwork slot.
    Avatar,
    /// Primary prop slot.
    Prop,
    /// Secondary prop slot.
    PropSecondary,
    /// Tertiary prop slot.
    PropTertiary,
    /// Subtitle text zone.
    TextZone,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Horizontal placement, insets as fractions of canvas width.
pub enum HAnchor {
    /// Inset from the left edge.
    Left(f64),
    /// Inset from the right edge.
    Right(f64),
    /// Centered.
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Vertical placement, insets as fractions of canvas height.
pub enum VAnchor {
    /// Inset from the top edge.
    Top(f64),
    /// Inset from the bottom edge.
    Bottom(f64),
    /// Centered.
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A positioned box for one slot. Width/height are fractions of the canvas,
/// so layouts are resolution-independent until resolved.
pub struct SlotBox {
    /// Horizontal anchoring.
    pub x: HAnchor,
    /// Vertical anchoring.
    pub y: VAnchor,
    /// Box width as a fraction of the canvas width.
    pub width: f64,
    /// Box height as a fraction of the canvas height.
    pub height: f64,
    /// Explicit z-order of draws placed in this slot.
    pub z: i32,
}

impl SlotBox {
    /// Resolve to pixel coordinates on a concrete canvas.
    pub fn resolve(&self, canvas: Canvas) -> Rect {
        let cw = f64::from(canvas.width);
        let ch = f64::from(canvas.height);
        let w = self.width * cw;
        let h = self.height * ch;
        let x0 = match self.x {
            HAnchor::Left(inset) => inset * cw,
            HAnchor::Right(inset) => cw - inset * cw - w,
            HAnchor::Center => (cw - w) / 2.0,
        };
        let y0 = match self.y {
            VAnchor::Top(inset) => inset * ch,
            VAnchor::Bottom(inset) => ch - inset * ch - h,
            VAnchor::Center => (ch - h) / 2.0,
        };
        Rect::new(x0, y0, x0 + w, y0 + h)
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// A named mapping from slot to box-or-hidden. `None` means the slot is
/// hidden: elements targeting it are skipped, and a hidden text zone
/// suppresses subtitles entirely for covered scenes.
pub struct LayoutDef {
    /// Avatar slot, or hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<SlotBox>,
    /// Primary prop slot, or hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prop: Option<SlotBox>,
    /// Secondary prop slot, or hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prop_secondary: Option<SlotBox>,
    /// Tertiary prop slot, or hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prop_tertiary: Option<SlotBox>,
    /// Subtitle text zone, or hidden (suppresses subtitles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_zone: Option<SlotBox>,
}

impl LayoutDef {
    /// Box for `kind`, or `None` when the slot is hidden.
    pub fn slot(&self, kind: SlotKind) -> Option<&SlotBox> {
        match kind {
            SlotKind::Avatar => self.avatar.as_ref(),
            SlotKind::Prop => self.prop.as_ref(),
            SlotKind::PropSecondary => self.prop_secondary.as_ref(),
            SlotKind::PropTertiary => self.prop_tertiary.as_ref(),
            SlotKind::TextZone => self.text_zone.as_ref(),
        }
    }
}

/// Immutable table of named layouts, populated once and shared read-only by
/// all frame-computation workers.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LayoutRegistry {
    layouts: BTreeMap<String, LayoutDef>,
}

impl LayoutRegistry {
    /// Empty registry, for tests that register their own layouts.
    pub fn empty() -> Self {
        Self {
            layouts: BTreeMap::new(),
        }
    }

    /// Register a layout under `name`, replacing any previous definition.
    pub fn register(&mut self, name: impl Into<String>, def: LayoutDef) {
        self.layouts.insert(name.into(), def);
    }

    /// Look up a layout by name.
    pub fn resolve(&self, name: &str) -> Option<&LayoutDef> {
        self.layouts.get(name)
    }

    /// All registered names, sorted, for diagnostics and external tooling.
    pub fn names(&self) -> Vec<&str> {
        self.layouts.keys().map(String::as_str).collect()
    }

    /// Iterate the full catalog.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayoutDef)> {
        self.layouts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The canonical catalog of 14 layouts.
    pub fn builtin() -> Self {
        fn boxed(x: HAnchor, y: VAnchor, width: f64, height: f64, z: i32) -> Option<SlotBox> {
            Some(SlotBox {
                x,
                y,
                width,
                height,
                z,
            })
        }
        use HAnchor::{Center as HCenter, Left, Right};
        use VAnchor::{Bottom, Center as VCenter, Top};

        let mut reg = Self::empty();

        // Single-subject full-frame variants.
        reg.register(
            "avatar_full_center",
            LayoutDef {
                avatar: boxed(HCenter, Bottom(0.0), 0.8, 1.0, Z_VISUAL),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "prop_full_center",
            LayoutDef {
                prop: boxed(HCenter, VCenter, 0.8, 0.9, Z_VISUAL),
                ..LayoutDef::default()
            },
        );
        reg.register(
            TEXT_ONLY_LAYOUT.to_string(),
            LayoutDef {
                text_zone: boxed(Left(0.15), Top(0.15), 0.7, 0.7, Z_TEXT),
                ..LayoutDef::default()
            },
        );

        // Subject-beside-text variants.
        reg.register(
            "avatar_right_text_left",
            LayoutDef {
                avatar: boxed(Right(0.05), Bottom(0.0), 0.3, 0.85, Z_VISUAL),
                text_zone: boxed(Left(0.05), VCenter, 0.6, 0.6, Z_TEXT),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "prop_right_text_left",
            LayoutDef {
                prop: boxed(Right(0.05), VCenter, 0.3, 0.5, Z_VISUAL),
                text_zone: boxed(Left(0.05), VCenter, 0.6, 0.6, Z_TEXT),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "avatar_left_text_right",
            LayoutDef {
                avatar: boxed(Left(0.05), Bottom(0.0), 0.3, 0.85, Z_VISUAL),
                text_zone: boxed(Right(0.05), VCenter, 0.6, 0.6, Z_TEXT),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "prop_left_text_right",
            LayoutDef {
                prop: boxed(Left(0.05), VCenter, 0.3, 0.5, Z_VISUAL),
                text_zone: boxed(Right(0.05), VCenter, 0.6, 0.6, Z_TEXT),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "avatar_middle_text_sides",
            LayoutDef {
                avatar: boxed(HCenter, Bottom(0.0), 0.3, 0.85, Z_VISUAL),
                text_zone: boxed(Left(0.05), VCenter, 0.9, 0.5, Z_TEXT),
                ..LayoutDef::default()
            },
        );

        // Stacked variants.
        reg.register(
            "text_top_avatar_bottom",
            LayoutDef {
                text_zone: boxed(Left(0.05), Top(0.05), 0.9, 0.35, Z_TEXT),
                avatar: boxed(HCenter, Bottom(0.0), 0.5, 0.55, Z_VISUAL),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "text_top_prop_bottom",
            LayoutDef {
                text_zone: boxed(Left(0.05), Top(0.05), 0.9, 0.35, Z_TEXT),
                prop: boxed(HCenter, Bottom(0.05), 0.5, 0.55, Z_VISUAL),
                ..LayoutDef::default()
            },
        );

        // Multi-prop variants.
        reg.register(
            "avatar_center_props_sides",
            LayoutDef {
                avatar: boxed(HCenter, Bottom(0.0), 0.4, 0.9, Z_VISUAL),
                prop: boxed(Left(0.05), VCenter, 0.25, 0.4, Z_VISUAL),
                prop_secondary: boxed(Right(0.05), VCenter, 0.25, 0.4, Z_VISUAL),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "props_triple_row",
            LayoutDef {
                prop: boxed(Left(0.05), VCenter, 0.28, 0.5, Z_VISUAL),
                prop_secondary: boxed(HCenter, VCenter, 0.28, 0.5, Z_VISUAL),
                prop_tertiary: boxed(Right(0.05), VCenter, 0.28, 0.5, Z_VISUAL),
                ..LayoutDef::default()
            },
        );

        // Avatar-with-prop variants.
        reg.register(
            "avatar_right_prop_left",
            LayoutDef {
                avatar: boxed(Right(0.1), Bottom(0.0), 0.5, 0.9, Z_VISUAL),
                prop: boxed(Left(0.1), VCenter, 0.4, 0.6, Z_VISUAL),
                ..LayoutDef::default()
            },
        );
        reg.register(
            "avatar_left_prop_right",
            LayoutDef {
                avatar: boxed(Left(0.1), Bottom(0.0), 0.5, 0.9, Z_VISUAL),
                prop: boxed(Right(0.1), VCenter, 0.4, 0.6, Z_VISUAL),
                ..LayoutDef::default()
            },
        );

        reg
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/layout.rs"]
mod tests;

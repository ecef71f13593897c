#![forbid(unsafe_code)]

//! Highlight style categories and their user-configurable appearance.

/// Which of the two visual categories an annotation uses.
///
/// Touching matches alternate between the two so the boundary between
/// adjacent occurrences stays visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    /// Default style for an occurrence.
    #[default]
    Primary,
    /// Style for an occurrence that touches the previous one.
    Alternate,
}

impl StyleCategory {
    /// The other category.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Primary => Self::Alternate,
            Self::Alternate => Self::Primary,
        }
    }
}

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

bitflags::bitflags! {
    /// Text attribute flags for a highlight.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Italic text.
        const ITALIC    = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
        /// Reverse video (swap fg/bg).
        const REVERSE   = 0b0000_1000;
    }
}

/// Appearance of one highlight category. Unset colors inherit from the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HighlightStyle {
    /// Foreground color override.
    pub fg: Option<Rgb>,
    /// Background color override.
    pub bg: Option<Rgb>,
    /// Attribute flags.
    pub flags: StyleFlags,
}

impl HighlightStyle {
    /// Style with no overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags.
    #[must_use]
    pub const fn flags(mut self, flags: StyleFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }
}

/// The two user-visible highlight styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightStyles {
    /// Appearance of non-adjacent matches.
    pub primary: HighlightStyle,
    /// Appearance of matches touching their predecessor.
    pub alternate: HighlightStyle,
}

impl Default for HighlightStyles {
    fn default() -> Self {
        Self {
            primary: HighlightStyle::new().bg(Rgb::new(60, 60, 80)),
            alternate: HighlightStyle::new().bg(Rgb::new(80, 60, 60)),
        }
    }
}

impl HighlightStyles {
    /// Appearance for `category`.
    #[must_use]
    pub const fn resolve(&self, category: StyleCategory) -> HighlightStyle {
        match category {
            StyleCategory::Primary => self.primary,
            StyleCategory::Alternate => self.alternate,
        }
    }
}

use rand::Rng;

use crate::color::model::{ColorValue, Hsl, normalize};

/// One palette slot: a fixed color, or a list to draw from on every resolution.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PaletteEntry {
    /// One color, used every time.
    Single(String),
    /// Candidates for a uniform random pick; empty defers to the outline's own attribute.
    Many(Vec<String>),
}

impl PaletteEntry {
    /// Fixed-color entry.
    pub fn single(color: impl Into<String>) -> Self {
        Self::Single(color.into())
    }

    /// List entry.
    pub fn many<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(colors.into_iter().map(Into::into).collect())
    }
}

/// Names one slot of a [`Palette`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteKey {
    /// Canvas background.
    Background,
    /// Outline strokes.
    Stroke,
    /// Fill of the first circuit.
    Fill,
    /// Word overlay.
    Text,
    /// Debug markers.
    Debug,
}

impl PaletteKey {
    /// Lower-case name, as used for outline attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Stroke => "stroke",
            Self::Fill => "fill",
            Self::Text => "text",
            Self::Debug => "debug",
        }
    }
}

/// Colors a pass draws with, one entry per [`PaletteKey`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Canvas background.
    pub background: PaletteEntry,
    /// Outline strokes.
    pub stroke: PaletteEntry,
    /// Fill of the first circuit.
    pub fill: PaletteEntry,
    /// Word overlay.
    pub text: PaletteEntry,
    /// Debug markers.
    pub debug: PaletteEntry,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: PaletteEntry::single("#ffffff"),
            stroke: PaletteEntry::single("#000000"),
            fill: PaletteEntry::single("#ffffff"),
            text: PaletteEntry::single("#000000"),
            debug: PaletteEntry::single("blue"),
        }
    }
}

/// Per-outline color attributes consulted when a palette list is empty.
pub trait ColorAttributes {
    /// The outline's own color for `key`, if it carries one.
    fn color_attribute(&self, key: PaletteKey) -> Option<&str>;
}

impl ColorAttributes for () {
    fn color_attribute(&self, _key: PaletteKey) -> Option<&str> {
        None
    }
}

impl Palette {
    /// Entry stored for `key`.
    pub fn entry(&self, key: PaletteKey) -> &PaletteEntry {
        match key {
            PaletteKey::Background => &self.background,
            PaletteKey::Stroke => &self.stroke,
            PaletteKey::Fill => &self.fill,
            PaletteKey::Text => &self.text,
            PaletteKey::Debug => &self.debug,
        }
    }

    /// Resolve `key` to a canonical color.
    ///
    /// A single entry is used as is; a non-empty list yields a uniformly random element on
    /// every call, so callers needing a stable color must resolve once and keep the result.
    /// An empty list falls back to the outline's own attribute, then to black. Text that does
    /// not normalize also resolves to black.
    pub fn resolve<R, A>(&self, key: PaletteKey, attrs: &A, rng: &mut R) -> ColorValue
    where
        R: Rng + ?Sized,
        A: ColorAttributes + ?Sized,
    {
        let text = match self.entry(key) {
            PaletteEntry::Single(c) => Some(c.as_str()),
            PaletteEntry::Many(list) if !list.is_empty() => {
                Some(list[rng.gen_range(0..list.len())].as_str())
            }
            PaletteEntry::Many(_) => attrs.color_attribute(key),
        };

        let Some(text) = text else {
            return ColorValue::Hsl(Hsl::BLACK);
        };
        match normalize(text) {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!(key = key.as_str(), %err, "falling back to black");
                ColorValue::Hsl(Hsl::BLACK)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;

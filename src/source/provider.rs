use std::path::Path;

use anyhow::Context;

use crate::{
    color::palette::{ColorAttributes, PaletteKey},
    foundation::error::{RemnantError, RemnantResult},
};

/// One outline as handed over by a source: a path-command string plus the colors the
/// source attached to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceOutline {
    /// Path-command string.
    pub d: String,
    /// Fill color text, if the source set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke color text, if the source set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

impl SourceOutline {
    /// Outline without color attributes.
    pub fn new(d: impl Into<String>) -> Self {
        Self {
            d: d.into(),
            ..Self::default()
        }
    }

    /// Attach a fill color.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Attach a stroke color.
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }
}

impl ColorAttributes for SourceOutline {
    fn color_attribute(&self, key: PaletteKey) -> Option<&str> {
        match key {
            PaletteKey::Fill => self.fill.as_deref(),
            PaletteKey::Stroke => self.stroke.as_deref(),
            PaletteKey::Background | PaletteKey::Text | PaletteKey::Debug => None,
        }
    }
}

/// Anything that can hand the pipeline an ordered list of outlines.
pub trait OutlineSource {
    /// Outlines in draw order.
    fn list_outlines(&self) -> RemnantResult<Vec<SourceOutline>>;

    /// Natural width and height of the figure, when the source knows it.
    fn source_size(&self) -> Option<(f64, f64)> {
        None
    }
}

/// In-memory outline list.
#[derive(Clone, Debug, Default)]
pub struct StaticOutlines {
    /// Returned as is by `list_outlines`.
    pub outlines: Vec<SourceOutline>,
    /// Reported by `source_size`.
    pub size: Option<(f64, f64)>,
}

impl StaticOutlines {
    /// List with no known size.
    pub fn new(outlines: Vec<SourceOutline>) -> Self {
        Self {
            outlines,
            size: None,
        }
    }
}

impl OutlineSource for StaticOutlines {
    fn list_outlines(&self) -> RemnantResult<Vec<SourceOutline>> {
        Ok(self.outlines.clone())
    }

    fn source_size(&self) -> Option<(f64, f64)> {
        self.size
    }
}

/// JSON outline document: `{ "width", "height", "outlines": [{ "d", "fill"?, "stroke"? }] }`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlineManifest {
    /// Figure width in source units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Figure height in source units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Outlines in draw order.
    pub outlines: Vec<SourceOutline>,
}

impl OutlineManifest {
    /// Parse a manifest document.
    pub fn from_json(json: &str) -> RemnantResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> RemnantResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read outline manifest {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Serialize with indentation.
    pub fn to_json_pretty(&self) -> RemnantResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RemnantError::serde(e.to_string()))
    }
}

impl OutlineSource for OutlineManifest {
    fn list_outlines(&self) -> RemnantResult<Vec<SourceOutline>> {
        Ok(self.outlines.clone())
    }

    fn source_size(&self) -> Option<(f64, f64)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some((w, h)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/provider.rs"]
mod tests;

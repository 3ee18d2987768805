use crate::{
    color::palette::Palette,
    foundation::core::{Affine, Canvas, Vec2},
    foundation::error::{RemnantError, RemnantResult},
};

/// Shortest dash period, in canvas pixels, the stroker is asked to draw.
pub const MIN_DASH_PERIOD: f64 = 0.1;

/// Largest canvas, in pixels, a pass may allocate.
pub const MAX_CANVAS_PIXELS: u64 = 64 * 1024 * 1024;

/// Every tunable of one render pass.
///
/// The struct is plain data: hosts that edit parameters build a new value and render again.
/// Partial JSON documents deserialize onto the defaults, with `palette` and `font` merged per
/// key.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Stroke width of the repeated circuits, in source units.
    pub thickness: f64,
    /// Jitter diameter applied to every coordinate.
    pub drift: f64,
    /// Number of passes over every outline. Circuit 1 is filled and shaded.
    pub circuits: u32,
    /// Colors for background, strokes, fill, text and debug markers.
    pub palette: Palette,
    /// Optional text drawn centered over the sketch.
    pub word: Option<String>,
    /// Font of the word overlay.
    pub font: FontSpec,
    /// Frames per second for continuous re-rendering; `false`/`null` renders once.
    #[serde(deserialize_with = "deserialize_refresh")]
    pub refresh: Option<u32>,
    /// JPEG quality, 1..=100.
    pub image_quality: u8,
    /// Horizontal canvas offset of the source origin, in pixels.
    pub start_from_x: f64,
    /// Vertical canvas offset of the source origin, in pixels.
    pub start_from_y: f64,
    /// Source-to-pixel scale. The canvas is `width * scale` by `height * scale` pixels.
    pub scale: f64,
    /// Signed lightness delta of the shadow layer.
    pub default_shadow: f64,
    /// Signed lightness delta of the highlight layer.
    pub default_highlight: f64,
    /// Distance the shadow and highlight clips are shifted by.
    pub shading_offset: f64,
    /// Canvas width before scaling.
    pub width: u32,
    /// Canvas height before scaling.
    pub height: u32,
    /// Corner style of every stroke.
    pub line_join: LineJoin,
    /// End style of every stroke.
    pub line_cap: LineCap,
    /// `:`-separated dash lengths; empty draws solid lines.
    pub line_dash: String,
    /// Draw markers at every point of the shaded circuit.
    pub debug: bool,
    /// Seed for jitter and palette selection; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            thickness: 8.0,
            drift: 14.0,
            circuits: 2,
            palette: Palette::default(),
            word: Some("helloworld".to_owned()),
            font: FontSpec::default(),
            refresh: None,
            image_quality: 80,
            start_from_x: 0.0,
            start_from_y: 0.0,
            scale: 1.0,
            default_shadow: -15.0,
            default_highlight: 15.0,
            shading_offset: 20.0,
            width: 1000,
            height: 1000,
            line_join: LineJoin::Round,
            line_cap: LineCap::Round,
            line_dash: String::new(),
            debug: false,
            seed: None,
        }
    }
}

/// Font request for the word overlay. Only the loaded font file is ever used; `family` is
/// kept for hosts that pick files by name.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Family name.
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    /// Weight keyword.
    pub weight: FontWeight,
    /// Slant keyword.
    pub style: FontStyle,
    /// Small-caps switch.
    pub variant: FontVariant,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_owned(),
            size: 42.0,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            variant: FontVariant::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// CSS weight keyword.
pub enum FontWeight {
    /// 400.
    #[default]
    Normal,
    /// 700.
    Bold,
    /// 800.
    Bolder,
    /// 300.
    Lighter,
}

impl FontWeight {
    /// OpenType weight value.
    pub fn value(self) -> f32 {
        match self {
            Self::Lighter => 300.0,
            Self::Normal => 400.0,
            Self::Bold => 700.0,
            Self::Bolder => 800.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// CSS style keyword.
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic face.
    Italic,
    /// Slanted upright face.
    Oblique,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// CSS variant keyword.
pub enum FontVariant {
    /// Regular glyphs.
    #[default]
    Normal,
    /// Small capitals. Kept for configuration round-trips; layout draws regular glyphs.
    SmallCaps,
}

/// Corner style between stroke segments. `arcs` and `miter-clip` have no raster equivalent and
/// draw as `round` and `miter`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    /// Drawn as `Round`.
    Arcs,
    /// Corner cut flat.
    Bevel,
    /// Sharp corner.
    Miter,
    /// Drawn as `Miter`.
    MiterClip,
    /// Rounded corner.
    #[default]
    Round,
}

/// Shape drawn at the open ends of a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Flat, ending exactly at the endpoint.
    Butt,
    /// Half-disc past the endpoint.
    #[default]
    Round,
    /// Half-square past the endpoint.
    Square,
}

/// Canvas size plus the source-to-canvas placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Pixel size of the raster.
    pub canvas: Canvas,
    /// Canvas position of the source origin.
    pub origin: Vec2,
    /// Uniform source-to-pixel scale.
    pub scale: f64,
}

impl Viewport {
    /// `translate(origin) * scale(scale)`.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin) * Affine::scale(self.scale)
    }
}

impl RenderConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> RemnantResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject tunables a render pass cannot honor. Nothing is clamped silently.
    pub fn validate(&self) -> RemnantResult<()> {
        if self.circuits == 0 {
            return Err(RemnantError::configuration("circuits must be >= 1"));
        }
        for (name, v) in [
            ("thickness", self.thickness),
            ("drift", self.drift),
            ("shadingOffset", self.shading_offset),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(RemnantError::configuration(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, v) in [
            ("startFromX", self.start_from_x),
            ("startFromY", self.start_from_y),
            ("defaultShadow", self.default_shadow),
            ("defaultHighlight", self.default_highlight),
        ] {
            if !v.is_finite() {
                return Err(RemnantError::configuration(format!(
                    "{name} must be finite"
                )));
            }
        }
        if !(1..=100).contains(&self.image_quality) {
            return Err(RemnantError::configuration(
                "imageQuality must be in 1..=100",
            ));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(RemnantError::configuration(
                "font size must be finite and > 0",
            ));
        }
        if self.refresh == Some(0) {
            return Err(RemnantError::configuration("refresh fps must be > 0"));
        }
        self.line_dash()?;
        self.viewport()?;
        Ok(())
    }

    /// Dash lengths from `line_dash`. Empty or all-zero patterns mean a solid line.
    pub fn line_dash(&self) -> RemnantResult<Vec<f64>> {
        let spec = self.line_dash.trim();
        if spec.is_empty() {
            return Ok(Vec::new());
        }
        let mut dashes = Vec::new();
        for part in spec.split(':') {
            let v: f64 = part.trim().parse().map_err(|_| {
                RemnantError::configuration(format!("lineDash segment '{part}' is not a number"))
            })?;
            if !v.is_finite() || v < 0.0 {
                return Err(RemnantError::configuration(format!(
                    "lineDash segment '{part}' must be finite and >= 0"
                )));
            }
            dashes.push(v);
        }
        if dashes.iter().all(|&d| d == 0.0) {
            return Ok(Vec::new());
        }
        let period: f64 = dashes.iter().sum();
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        if period * scale < MIN_DASH_PERIOD {
            return Err(RemnantError::configuration(format!(
                "lineDash pattern '{spec}' is shorter than {MIN_DASH_PERIOD} px"
            )));
        }
        // An odd pattern repeats to even length.
        if dashes.len() % 2 == 1 {
            dashes.extend_from_within(..);
        }
        Ok(dashes)
    }

    /// Canvas of `width * scale` by `height * scale` pixels with the configured origin.
    pub fn viewport(&self) -> RemnantResult<Viewport> {
        Ok(Viewport {
            canvas: self.canvas()?,
            origin: Vec2::new(self.start_from_x, self.start_from_y),
            scale: self.scale,
        })
    }

    /// Letterbox a `source_width` by `source_height` figure into the configured canvas.
    ///
    /// The canvas keeps its size; the origin centers the figure along the axis with spare
    /// room and the scale fits the other axis exactly.
    pub fn fit_to_source(&self, source_width: f64, source_height: f64) -> RemnantResult<Viewport> {
        if !(source_width.is_finite() && source_height.is_finite())
            || source_width <= 0.0
            || source_height <= 0.0
        {
            return Err(RemnantError::configuration(
                "source size must be finite and > 0",
            ));
        }
        let canvas = self.canvas()?;
        let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
        let aspect = source_width / source_height;
        let fitted_width = ch * aspect;

        let (origin, scale) = if fitted_width < cw {
            (
                Vec2::new((cw - fitted_width) / 2.0, self.start_from_y),
                fitted_width / source_width,
            )
        } else {
            let fitted_height = cw / aspect;
            (
                Vec2::new(self.start_from_x, (ch - fitted_height) / 2.0),
                fitted_height / source_height,
            )
        };
        Ok(Viewport {
            canvas,
            origin,
            scale,
        })
    }

    fn canvas(&self) -> RemnantResult<Canvas> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RemnantError::configuration("scale must be finite and > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(RemnantError::configuration("width/height must be > 0"));
        }
        let px = |v: u32| (f64::from(v) * self.scale).round();
        let (w, h) = (px(self.width), px(self.height));
        if w < 1.0 || h < 1.0 || w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
            return Err(RemnantError::configuration(format!(
                "scaled canvas {w}x{h} must be between 1 and {} pixels per side",
                u16::MAX
            )));
        }
        if (w as u64) * (h as u64) > MAX_CANVAS_PIXELS {
            return Err(RemnantError::configuration(format!(
                "scaled canvas {w}x{h} exceeds {MAX_CANVAS_PIXELS} pixels"
            )));
        }
        Ok(Canvas {
            width: w as u32,
            height: h as u32,
        })
    }
}

fn deserialize_refresh<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Toggle(bool),
        Fps(u32),
    }

    match <Option<Repr> as serde::Deserialize>::deserialize(deserializer)? {
        None | Some(Repr::Toggle(false)) => Ok(None),
        Some(Repr::Toggle(true)) => Ok(Some(60)),
        Some(Repr::Fps(fps)) => Ok(Some(fps)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;

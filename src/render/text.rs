use std::sync::Arc;

use crate::{
    config::model::{FontSpec, FontStyle},
    foundation::error::{RemnantError, RemnantResult},
};

/// Raw font bytes handed to a surface by the host.
#[derive(Clone, Debug)]
pub struct PreparedFont {
    /// TrueType or OpenType file contents.
    pub bytes: Arc<Vec<u8>>,
}

impl PreparedFont {
    /// Wrap bytes without validating them; surfaces reject bad data on load.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
        }
    }
}

/// Stateful helper for building Parley text layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and remember its family name for every later layout.
    pub(crate) fn new(font: &PreparedFont) -> RemnantResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| RemnantError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RemnantError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape and lay out a single unbroken line of `text`.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        spec: &FontSpec,
    ) -> RemnantResult<parley::Layout<()>> {
        let size_px = spec.size as f32;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(RemnantError::render("font size must be finite and > 0"));
        }
        if !spec.family.eq_ignore_ascii_case(&self.family_name) {
            tracing::debug!(
                requested = %spec.family,
                loaded = %self.family_name,
                "using loaded font family"
            );
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(spec.weight.value()),
        ));
        let style = match spec.style {
            FontStyle::Normal => parley::style::FontStyle::Normal,
            FontStyle::Italic => parley::style::FontStyle::Italic,
            FontStyle::Oblique => parley::style::FontStyle::Oblique(None),
        };
        builder.push_default(parley::style::StyleProperty::FontStyle(style));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

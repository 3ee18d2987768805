use kurbo::{Affine, BezPath, Rect, Size};

use crate::{
    color::model::ColorValue,
    config::model::FontSpec,
    foundation::core::Canvas,
    foundation::error::RemnantResult,
    render::surface::{SketchSurface, StrokeStyle},
};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`SketchSurface::clear`].
    Clear,
    /// [`SketchSurface::set_transform`].
    SetTransform(Affine),
    /// [`SketchSurface::fill_rect`].
    FillRect(Rect, ColorValue),
    /// [`SketchSurface::fill_path`].
    Fill(BezPath, ColorValue),
    /// [`SketchSurface::stroke_path`].
    Stroke(BezPath, ColorValue, StrokeStyle),
    /// [`SketchSurface::clip`].
    Clip(BezPath),
    /// [`SketchSurface::save`].
    Save,
    /// [`SketchSurface::restore`].
    Restore,
    /// [`SketchSurface::fill_text`]: text, origin and paint.
    Text(String, kurbo::Point, ColorValue),
}

/// Surface that draws nothing and logs every call, for inspecting what a pass would paint.
///
/// Text measures as `0.6 * size` per character by `size` tall.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    /// Every call since construction; `clear` is logged, not applied.
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Empty log for a surface of size `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            calls: Vec::new(),
        }
    }

    /// Logged path fills in call order.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, ColorValue)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Fill(p, paint) => Some((p, *paint)),
            _ => None,
        })
    }

    /// Logged path strokes in call order.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, ColorValue, &StrokeStyle)> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Stroke(p, paint, style) => Some((p, *paint, style)),
            _ => None,
        })
    }
}

impl SketchSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.calls.push(DrawCall::SetTransform(transform));
    }

    fn fill_rect(&mut self, rect: Rect, paint: ColorValue) {
        self.calls.push(DrawCall::FillRect(rect, paint));
    }

    fn fill_path(&mut self, path: &BezPath, paint: ColorValue) {
        self.calls.push(DrawCall::Fill(path.clone(), paint));
    }

    fn stroke_path(&mut self, path: &BezPath, paint: ColorValue, style: &StrokeStyle) {
        self.calls
            .push(DrawCall::Stroke(path.clone(), paint, style.clone()));
    }

    fn clip(&mut self, path: &BezPath) {
        self.calls.push(DrawCall::Clip(path.clone()));
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> RemnantResult<Size> {
        let n = text.chars().count() as f64;
        Ok(Size::new(n * font.size * 0.6, font.size))
    }

    fn fill_text(
        &mut self,
        text: &str,
        _font: &FontSpec,
        origin: kurbo::Point,
        paint: ColorValue,
    ) -> RemnantResult<()> {
        self.calls
            .push(DrawCall::Text(text.to_owned(), origin, paint));
        Ok(())
    }
}

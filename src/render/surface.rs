use kurbo::{Affine, BezPath, Rect, Size};

use crate::{
    color::model::ColorValue,
    config::model::{FontSpec, LineCap, LineJoin},
    foundation::core::Canvas,
    foundation::error::RemnantResult,
};

/// Stroke parameters of the plain circuits.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in user units.
    pub width: f64,
    /// Corner style.
    pub join: LineJoin,
    /// End style.
    pub cap: LineCap,
    /// Even-length dash pattern; empty for solid lines.
    pub dash: Vec<f64>,
}

/// Immediate-mode 2D drawing target with canvas-like state semantics.
///
/// `clip` intersects with the active clip. `save` snapshots the transform and clip, `restore`
/// brings both back and drops every clip added since. Painting with
/// [`ColorValue::Transparent`] leaves the surface unchanged.
pub trait SketchSurface {
    /// Pixel size of the target.
    fn canvas(&self) -> Canvas;

    /// Reset to transparent pixels, identity transform, no clip and an empty state stack.
    fn clear(&mut self);

    /// Replace the user-to-device transform applied to later calls.
    fn set_transform(&mut self, transform: Affine);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, paint: ColorValue);

    /// Fill `path` with the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, paint: ColorValue);

    /// Stroke `path` with `style`.
    fn stroke_path(&mut self, path: &BezPath, paint: ColorValue, style: &StrokeStyle);

    /// Intersect the active clip with `path`.
    fn clip(&mut self, path: &BezPath);

    /// Push the transform and clip.
    fn save(&mut self);

    /// Pop to the last `save`; without one this is a no-op.
    fn restore(&mut self);

    /// Laid-out extent of `text` in pixels.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> RemnantResult<Size>;

    /// Draw `text` with its layout box's top-left corner at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        origin: kurbo::Point,
        paint: ColorValue,
    ) -> RemnantResult<()>;
}

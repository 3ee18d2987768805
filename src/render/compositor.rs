use kurbo::{Circle, Shape};

use crate::{
    color::model::ColorValue,
    config::model::{LineCap, LineJoin, RenderConfig},
    foundation::error::RemnantResult,
    path::command::build_path,
    render::surface::{SketchSurface, StrokeStyle},
    sketch::circuits::DrawablePath,
};

const DEBUG_MARKER_RADIUS: f64 = 2.0;

/// Layer parameters shared by every drawable of a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeSettings {
    /// Lightness delta of the shadow fill.
    pub shadow: f64,
    /// Lightness delta of the highlight fill.
    pub highlight: f64,
    /// Diagonal shift of the two clip regions.
    pub shading_offset: f64,
    /// Style of every stroke, shaded circuit outline included.
    pub stroke: StrokeStyle,
}

impl CompositeSettings {
    /// Fails when `lineDash` does not parse.
    pub fn from_config(config: &RenderConfig) -> RemnantResult<Self> {
        Ok(Self {
            shadow: config.default_shadow,
            highlight: config.default_highlight,
            shading_offset: config.shading_offset,
            stroke: StrokeStyle {
                width: config.thickness,
                join: config.line_join,
                cap: config.line_cap,
                dash: config.line_dash()?,
            },
        })
    }
}

/// Draw `paths` in order: circuit 1 as shaded fills, later circuits as plain strokes.
///
/// Every drawable runs inside its own `save`/`restore`, so no clip or transform leaks into the
/// next one.
#[tracing::instrument(skip_all, fields(paths = paths.len()))]
pub fn composite<S: SketchSurface + ?Sized>(
    surface: &mut S,
    paths: &[DrawablePath],
    settings: &CompositeSettings,
) {
    for path in paths {
        surface.save();
        if path.is_defining() {
            draw_shaded(surface, path, settings);
        } else {
            draw_stroked(surface, path, settings);
        }
        surface.restore();
    }
}

/// Shadow, highlight and true-color layers of one defining path.
///
/// 1. fill the path with the fill darkened by `shadow` (skipped for transparent fills);
/// 2. clip to the path shifted by `-shading_offset`;
/// 3. fill the unshifted path lightened by `highlight`;
/// 4. clip again to the path shifted by `+shading_offset` and fill the unshifted path with
///    the fill itself.
///
/// Offsets move the clip geometry only; the filled geometry is always the jittered path.
fn draw_shaded<S: SketchSurface + ?Sized>(
    surface: &mut S,
    path: &DrawablePath,
    settings: &CompositeSettings,
) {
    let shape = build_path(&path.commands, 0.0);

    if !path.fill.is_transparent() {
        surface.fill_path(&shape, path.fill.with_lightness_offset(settings.shadow));
    }

    surface.clip(&build_path(&path.commands, -settings.shading_offset));
    surface.fill_path(&shape, path.fill.with_lightness_offset(settings.highlight));

    surface.clip(&build_path(&path.commands, settings.shading_offset));
    surface.fill_path(&shape, path.fill);
}

fn draw_stroked<S: SketchSurface + ?Sized>(
    surface: &mut S,
    path: &DrawablePath,
    settings: &CompositeSettings,
) {
    let shape = build_path(&path.commands, 0.0);
    surface.stroke_path(&shape, path.stroke, &settings.stroke);
}

/// Small circles at every endpoint and curve control point of the defining circuit.
pub fn draw_debug_markers<S: SketchSurface + ?Sized>(
    surface: &mut S,
    paths: &[DrawablePath],
    color: ColorValue,
) {
    let style = StrokeStyle {
        width: 1.0,
        join: LineJoin::Miter,
        cap: LineCap::Butt,
        dash: Vec::new(),
    };
    for path in paths.iter().filter(|p| p.is_defining()) {
        for cmd in &path.commands {
            let mut markers = kurbo::BezPath::new();
            for p in cmd.points() {
                markers.extend(Circle::new(p.to_kurbo(), DEBUG_MARKER_RADIUS).path_elements(0.1));
            }
            surface.stroke_path(&markers, color, &style);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

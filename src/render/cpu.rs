use kurbo::{Affine, BezPath, Rect, Size};

use crate::{
    color::model::ColorValue,
    config::model::{FontSpec, LineCap, LineJoin, MAX_CANVAS_PIXELS, MIN_DASH_PERIOD},
    foundation::core::{Canvas, FrameRGBA},
    foundation::error::{RemnantError, RemnantResult},
    render::{
        surface::{SketchSurface, StrokeStyle},
        text::{PreparedFont, TextLayoutEngine},
    },
};

/// Raster surface backed by `vello_cpu`.
///
/// Clips are pushed as clip layers; `restore` pops every layer opened since the matching
/// `save`. Call [`CpuSurface::finish`] to flush and read the pixels back.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    transform: Affine,
    open_layers: usize,
    saved: Vec<SavedState>,
    font: Option<LoadedFont>,
}

#[derive(Clone, Copy, Debug)]
struct SavedState {
    transform: Affine,
    open_layers: usize,
}

struct LoadedFont {
    engine: TextLayoutEngine,
    data: vello_cpu::peniko::FontData,
}

impl CpuSurface {
    /// Fails for empty canvases, sides above `u16::MAX` and more than [`MAX_CANVAS_PIXELS`].
    pub fn new(canvas: Canvas) -> RemnantResult<Self> {
        let width = u16::try_from(canvas.width)
            .map_err(|_| RemnantError::render("surface width exceeds u16"))?;
        let height = u16::try_from(canvas.height)
            .map_err(|_| RemnantError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(RemnantError::render("surface size must be non-zero"));
        }
        if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
            return Err(RemnantError::render(format!(
                "surface {width}x{height} exceeds {MAX_CANVAS_PIXELS} pixels"
            )));
        }

        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            transform: Affine::IDENTITY,
            open_layers: 0,
            saved: Vec::new(),
            font: None,
        })
    }

    /// Load the font used by every later text call.
    pub fn set_font(&mut self, font: PreparedFont) -> RemnantResult<()> {
        let engine = TextLayoutEngine::new(&font)?;
        tracing::debug!(family = engine.family_name(), "font loaded");
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.to_vec()),
            0,
        );
        self.font = Some(LoadedFont { engine, data });
        Ok(())
    }

    /// `true` once [`CpuSurface::set_font`] succeeded.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Close every open clip layer, rasterize and return premultiplied RGBA8 pixels.
    pub fn finish(&mut self) -> RemnantResult<FrameRGBA> {
        self.pop_layers(0);
        self.saved.clear();
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let data = self.pixmap.data_as_u8_slice().to_vec();
        let expected = (self.canvas.width as usize) * (self.canvas.height as usize) * 4;
        if data.len() != expected {
            return Err(RemnantError::render(format!(
                "pixmap holds {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: true,
        })
    }

    fn pop_layers(&mut self, keep: usize) {
        while self.open_layers > keep {
            self.ctx.pop_layer();
            self.open_layers -= 1;
        }
    }

    fn set_paint(&mut self, paint: ColorValue) -> bool {
        let Some(hsl) = paint.hsl() else {
            return false;
        };
        let [r, g, b, a] = hsl.to_rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        true
    }

    fn font_mut(&mut self) -> RemnantResult<&mut LoadedFont> {
        self.font
            .as_mut()
            .ok_or_else(|| RemnantError::render("no font loaded on surface"))
    }
}

impl SketchSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.pop_layers(0);
        self.saved.clear();
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.transform = Affine::IDENTITY;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    fn fill_rect(&mut self, rect: Rect, paint: ColorValue) {
        if self.set_paint(paint) {
            self.ctx.fill_rect(&rect_to_cpu(rect));
        }
    }

    fn fill_path(&mut self, path: &BezPath, paint: ColorValue) {
        if self.set_paint(paint) {
            self.ctx.fill_path(&bezpath_to_cpu(path));
        }
    }

    fn stroke_path(&mut self, path: &BezPath, paint: ColorValue, style: &StrokeStyle) {
        if !self.set_paint(paint) {
            return;
        }
        let device_scale = self.transform.determinant().abs().sqrt();
        self.ctx.set_stroke(stroke_to_cpu(style, device_scale));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn clip(&mut self, path: &BezPath) {
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.open_layers += 1;
    }

    fn save(&mut self) {
        self.saved.push(SavedState {
            transform: self.transform,
            open_layers: self.open_layers,
        });
    }

    fn restore(&mut self) {
        let Some(state) = self.saved.pop() else {
            tracing::debug!("restore without matching save");
            return;
        };
        self.pop_layers(state.open_layers);
        self.set_transform(state.transform);
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> RemnantResult<Size> {
        let layout = self.font_mut()?.engine.layout_line(text, font)?;
        Ok(Size::new(
            f64::from(layout.width()),
            f64::from(layout.height()),
        ))
    }

    fn fill_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        origin: kurbo::Point,
        paint: ColorValue,
    ) -> RemnantResult<()> {
        let Some(hsl) = paint.hsl() else {
            return Ok(());
        };
        let [r, g, b, a] = hsl.to_rgba8();
        let transform = self.transform * Affine::translate(origin.to_vec2());

        let loaded = self
            .font
            .as_mut()
            .ok_or_else(|| RemnantError::render("no font loaded on surface"))?;
        let layout = loaded.engine.layout_line(text, font)?;

        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&loaded.data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        Ok(())
    }
}

/// Dash patterns whose period falls under [`MIN_DASH_PERIOD`] device pixels stroke solid.
fn stroke_to_cpu(style: &StrokeStyle, device_scale: f64) -> vello_cpu::kurbo::Stroke {
    let join = match style.join {
        LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
        LineJoin::Miter | LineJoin::MiterClip => vello_cpu::kurbo::Join::Miter,
        LineJoin::Round | LineJoin::Arcs => vello_cpu::kurbo::Join::Round,
    };
    let cap = match style.cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
        LineCap::Square => vello_cpu::kurbo::Cap::Square,
    };
    let stroke = vello_cpu::kurbo::Stroke::new(style.width)
        .with_join(join)
        .with_caps(cap);
    let period: f64 = style.dash.iter().sum::<f64>() * device_scale;
    if style.dash.is_empty() {
        stroke
    } else if period.is_nan() || period < MIN_DASH_PERIOD {
        tracing::debug!(period, "dash period too short; stroking solid");
        stroke
    } else {
        stroke.with_dashes(0.0, style.dash.iter().copied())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

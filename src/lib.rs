//! Remnant re-renders vector outlines as hand-sketched drawings.
//!
//! Every outline is parsed into absolute drawing commands, displaced at random a number of
//! times ("circuits") and drawn onto a raster: the first circuit as a filled shape with an
//! offset-and-clip shadow and highlight, the following ones as plain strokes.
//!
//! # Pipeline overview
//!
//! 1. **Source**: an [`OutlineSource`] (JSON manifest, SVG document or in-memory list) yields
//!    [`SourceOutline`]s
//! 2. **Parse**: [`parse_outline`] turns a path-command string into a [`PathOutline`]
//! 3. **Sketch**: [`generate_circuits`] jitters every outline once per circuit and resolves
//!    its colors from the [`Palette`]
//! 4. **Composite**: [`composite`] draws the circuits onto a [`SketchSurface`]
//! 5. **Export**: [`encode_frame`] / [`SurfaceSink`] write JPEG or PNG
//!
//! [`render_once`] runs steps 2 to 4 for one pass; [`render_to_frame`] does the same on a
//! fresh [`CpuSurface`] and returns premultiplied RGBA8 pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod config;
mod export;
mod foundation;
mod path;
mod render;
mod sketch;
mod source;

pub use color::model::{ColorValue, Hsl, normalize};
pub use color::names::{name_to_hex, named_color_count};
pub use color::palette::{ColorAttributes, Palette, PaletteEntry, PaletteKey};
pub use config::model::{
    FontSpec, FontStyle, FontVariant, FontWeight, LineCap, LineJoin, MAX_CANVAS_PIXELS,
    MIN_DASH_PERIOD, RenderConfig, Viewport,
};
pub use export::encode::{ImageFormatChoice, encode_frame};
pub use export::sink::{FileSink, MemorySink, SurfaceSink, sequence_frame_name};
pub use foundation::core::{Affine, BezPath, Canvas, FrameRGBA, Point, Rect, Vec2};
pub use foundation::error::{RemnantError, RemnantResult};
pub use path::command::{Command, PathOutline, build_path};
pub use path::parser::parse_outline;
pub use render::compositor::{CompositeSettings, composite, draw_debug_markers};
pub use render::cpu::CpuSurface;
pub use render::pipeline::{RenderStats, pass_rng, render_once, render_to_frame};
pub use render::recording::{DrawCall, RecordingSurface};
pub use render::surface::{SketchSurface, StrokeStyle};
pub use render::text::PreparedFont;
pub use sketch::circuits::{CircuitSettings, DrawablePath, ParsedOutline, generate_circuits};
pub use sketch::jitter::{jitter, jitter_all};
pub use source::provider::{OutlineManifest, OutlineSource, SourceOutline, StaticOutlines};
pub use source::svg::SvgOutlines;

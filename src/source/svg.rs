use std::{fmt::Write as _, path::Path};

use anyhow::Context;
use usvg::tiny_skia_path::PathSegment;

use crate::{
    foundation::error::{RemnantError, RemnantResult},
    source::provider::{OutlineSource, SourceOutline},
};

/// Outlines pulled out of an SVG document.
///
/// Every visible path is flattened into absolute `M`/`L`/`C`/`Z` commands with its
/// absolute transform applied. Solid fill and stroke colors travel along as attributes.
#[derive(Clone, Debug)]
pub struct SvgOutlines {
    outlines: Vec<SourceOutline>,
    size: (f64, f64),
}

impl SvgOutlines {
    /// Parse an SVG document held in memory.
    pub fn from_data(bytes: &[u8]) -> RemnantResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

        let mut outlines = Vec::new();
        collect_group(tree.root(), &mut outlines);
        let size = tree.size();
        tracing::debug!(
            outlines = outlines.len(),
            width = size.width(),
            height = size.height(),
            "svg outlines extracted"
        );
        Ok(Self {
            outlines,
            size: (f64::from(size.width()), f64::from(size.height())),
        })
    }

    /// Read and parse an SVG file.
    pub fn from_path(path: &Path) -> RemnantResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read svg {}", path.display()))?;
        Self::from_data(&bytes)
    }

    /// Extracted outlines, possibly empty.
    pub fn outlines(&self) -> &[SourceOutline] {
        &self.outlines
    }

    /// Document width and height.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }
}

impl OutlineSource for SvgOutlines {
    fn list_outlines(&self) -> RemnantResult<Vec<SourceOutline>> {
        if self.outlines.is_empty() {
            return Err(RemnantError::configuration("svg document has no paths"));
        }
        Ok(self.outlines.clone())
    }

    fn source_size(&self) -> Option<(f64, f64)> {
        Some(self.size)
    }
}

fn collect_group(group: &usvg::Group, out: &mut Vec<SourceOutline>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_group(g.as_ref(), out),
            usvg::Node::Path(p) => {
                if let Some(outline) = path_outline(p.as_ref()) {
                    out.push(outline);
                }
            }
            usvg::Node::Text(t) => collect_group(t.flattened(), out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn path_outline(path: &usvg::Path) -> Option<SourceOutline> {
    if !path.is_visible() {
        return None;
    }
    let data = path.data().clone().transform(path.abs_transform())?;
    let d = commands_from_segments(data.segments());
    if d.is_empty() {
        return None;
    }
    Some(SourceOutline {
        d,
        fill: path.fill().and_then(|f| paint_hex(f.paint())),
        stroke: path.stroke().and_then(|s| paint_hex(s.paint())),
    })
}

fn paint_hex(paint: &usvg::Paint) -> Option<String> {
    match paint {
        usvg::Paint::Color(c) => Some(format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)),
        _ => None,
    }
}

/// Re-express segments with the command letters the parser accepts. Quadratic segments are
/// elevated to cubics.
fn commands_from_segments(segments: impl Iterator<Item = PathSegment>) -> String {
    let mut d = String::new();
    let mut current = (0.0f32, 0.0f32);
    let mut start = current;

    for seg in segments {
        match seg {
            PathSegment::MoveTo(p) => {
                push_cmd(&mut d, 'M', &[(p.x, p.y)]);
                current = (p.x, p.y);
                start = current;
            }
            PathSegment::LineTo(p) => {
                push_cmd(&mut d, 'L', &[(p.x, p.y)]);
                current = (p.x, p.y);
            }
            PathSegment::QuadTo(c, p) => {
                let (c1, c2) = elevate_quad(current, (c.x, c.y), (p.x, p.y));
                push_cmd(&mut d, 'C', &[c1, c2, (p.x, p.y)]);
                current = (p.x, p.y);
            }
            PathSegment::CubicTo(c1, c2, p) => {
                push_cmd(&mut d, 'C', &[(c1.x, c1.y), (c2.x, c2.y), (p.x, p.y)]);
                current = (p.x, p.y);
            }
            PathSegment::Close => {
                if !d.is_empty() {
                    d.push('Z');
                }
                current = start;
            }
        }
    }
    d
}

fn elevate_quad(
    p0: (f32, f32),
    c: (f32, f32),
    p: (f32, f32),
) -> ((f32, f32), (f32, f32)) {
    let k = 2.0 / 3.0;
    (
        (p0.0 + k * (c.0 - p0.0), p0.1 + k * (c.1 - p0.1)),
        (p.0 + k * (c.0 - p.0), p.1 + k * (c.1 - p.1)),
    )
}

fn push_cmd(d: &mut String, code: char, points: &[(f32, f32)]) {
    if !d.is_empty() {
        d.push(' ');
    }
    d.push(code);
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{},{}", trim_number(*x), trim_number(*y));
    }
}

fn trim_number(v: f32) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/svg.rs"]
mod tests;

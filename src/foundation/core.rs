pub use kurbo::{Affine, BezPath, Rect, Vec2};

/// Integer outline coordinate. Parsed coordinates are truncated and jittered ones rounded,
/// so every point the pipeline produces sits on the pixel grid of the source space.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, growing downward.
    pub y: i32,
}

impl Point {
    /// Point at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floating-point copy for geometry calls.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Same point shifted by `offset` on both axes.
    pub fn shifted(self, offset: f64) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x) + offset, f64::from(self.y) + offset)
    }

    /// Euclidean distance.
    pub fn distance(self, other: Self) -> f64 {
        self.to_kurbo().distance(other.to_kurbo())
    }
}

/// Pixel size of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Whole canvas as a rectangle at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Midpoint of the canvas.
    pub fn center(self) -> kurbo::Point {
        self.rect().center()
    }
}

/// Read-back pixels of a finished surface.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha RGBA8 pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        let px = [px[0], px[1], px[2], px[3]];
        Some(if self.premultiplied {
            unpremultiply(px)
        } else {
            px
        })
    }

    /// Copy of the pixel data in straight (non-premultiplied) RGBA8.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let p = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        out
    }
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return [r, g, b, a];
    }
    let a16 = u16::from(a);
    let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a16 / 2) / a16).min(255) as u8 };
    [un(r), un(g), un(b), a]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use kurbo::BezPath;

use crate::foundation::core::Point;

/// One drawing command with absolute coordinates.
///
/// There is no close variant: `Z` is emitted as a [`Command::Line`] back to the subpath start,
/// so consumers never special-case closing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Command {
    /// Start a new subpath.
    Move {
        /// Subpath start.
        d: Point,
    },
    /// Straight segment.
    Line {
        /// Segment end.
        d: Point,
    },
    /// Horizontal segment; `d.y` is the current y.
    HLine {
        /// Segment end.
        d: Point,
    },
    /// Vertical segment; `d.x` is the current x.
    VLine {
        /// Segment end.
        d: Point,
    },
    /// Cubic Bezier segment.
    Curve {
        /// First control point.
        d1: Point,
        /// Second control point.
        d2: Point,
        /// Segment end.
        d: Point,
    },
}

impl Command {
    /// Uppercase command letter.
    pub fn code(&self) -> char {
        match self {
            Self::Move { .. } => 'M',
            Self::Line { .. } => 'L',
            Self::HLine { .. } => 'H',
            Self::VLine { .. } => 'V',
            Self::Curve { .. } => 'C',
        }
    }

    /// `true` for [`Command::Curve`].
    pub fn is_curve(&self) -> bool {
        matches!(self, Self::Curve { .. })
    }

    /// Point the pen ends on.
    pub fn destination(&self) -> Point {
        match *self {
            Self::Move { d }
            | Self::Line { d }
            | Self::HLine { d }
            | Self::VLine { d }
            | Self::Curve { d, .. } => d,
        }
    }

    /// Move the end point, leaving curve controls in place.
    pub fn set_destination(&mut self, p: Point) {
        match self {
            Self::Move { d }
            | Self::Line { d }
            | Self::HLine { d }
            | Self::VLine { d }
            | Self::Curve { d, .. } => *d = p,
        }
    }

    /// Apply `f` to every coordinate independently, curve controls included.
    pub fn map_points(self, mut f: impl FnMut(Point) -> Point) -> Self {
        match self {
            Self::Move { d } => Self::Move { d: f(d) },
            Self::Line { d } => Self::Line { d: f(d) },
            Self::HLine { d } => Self::HLine { d: f(d) },
            Self::VLine { d } => Self::VLine { d: f(d) },
            Self::Curve { d1, d2, d } => Self::Curve {
                d1: f(d1),
                d2: f(d2),
                d: f(d),
            },
        }
    }

    /// Every point carried by the command in draw order (`d1`, `d2`, `d` for curves).
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (a, b, c) = match *self {
            Self::Curve { d1, d2, d } => (Some(d1), Some(d2), d),
            Self::Move { d }
            | Self::Line { d }
            | Self::HLine { d }
            | Self::VLine { d } => (None, None, d),
        };
        a.into_iter().chain(b).chain(std::iter::once(c))
    }
}

/// Parsed command sequence for one source outline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PathOutline {
    /// Absolute commands in source order.
    pub commands: Vec<Command>,
    /// True when the first and last raw coordinate pairs coincide.
    pub is_closed: bool,
}

/// Build a drawable path from `commands`, every coordinate shifted by `offset` on both axes.
///
/// Fills close the figure implicitly, so no explicit close element is emitted. A sequence that
/// does not start with a move begins its subpath at the first point it reaches.
pub fn build_path(commands: &[Command], offset: f64) -> BezPath {
    let mut path = BezPath::new();
    let mut started = false;
    for cmd in commands {
        match *cmd {
            Command::Move { d } => path.move_to(d.shifted(offset)),
            Command::Line { d } | Command::HLine { d } | Command::VLine { d } => {
                if started {
                    path.line_to(d.shifted(offset));
                } else {
                    path.move_to(d.shifted(offset));
                }
            }
            Command::Curve { d1, d2, d } => {
                if !started {
                    path.move_to(d1.shifted(offset));
                }
                path.curve_to(d1.shifted(offset), d2.shifted(offset), d.shifted(offset));
            }
        }
        started = true;
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/path/command.rs"]
mod tests;

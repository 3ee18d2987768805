use std::f64::consts::TAU;

use rand::Rng;

use crate::{foundation::core::Point, path::command::Command};

/// Displace `point` by `radius / 2` in a uniformly random direction, rounded to the grid.
///
/// `radius` is the drift diameter, so the displacement never exceeds half of it (before
/// rounding).
pub fn jitter<R: Rng + ?Sized>(point: Point, radius: f64, rng: &mut R) -> Point {
    let angle = rng.gen_range(0.0..TAU);
    let dx = angle.cos() * radius / 2.0;
    let dy = angle.sin() * radius / 2.0;
    Point::new(
        round_coord(f64::from(point.x) + dx),
        round_coord(f64::from(point.y) + dy),
    )
}

/// Jitter every coordinate of every command independently.
///
/// When `closed` is set and the sequence ends in a curve, that curve's destination is pinned to
/// the jittered start so the figure still meets itself. A curve followed by line segments
/// (for example a `Z` closure) is left alone, as are sequences without a curve.
pub fn jitter_all<R: Rng + ?Sized>(
    commands: &[Command],
    radius: f64,
    closed: bool,
    rng: &mut R,
) -> Vec<Command> {
    let mut out: Vec<Command> = commands
        .iter()
        .map(|cmd| cmd.map_points(|p| jitter(p, radius, rng)))
        .collect();

    if closed {
        enforce_closure(&mut out);
    }
    out
}

fn enforce_closure(commands: &mut [Command]) {
    let Some(start) = commands.first().map(Command::destination) else {
        return;
    };
    if let Some(last) = commands.last_mut().filter(|c| c.is_curve()) {
        last.set_destination(start);
    }
}

fn round_coord(v: f64) -> i32 {
    // Half-way values round toward positive infinity.
    (v + 0.5).floor() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/jitter.rs"]
mod tests;

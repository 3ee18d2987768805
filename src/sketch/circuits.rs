use rand::Rng;

use crate::{
    color::{
        model::ColorValue,
        palette::{ColorAttributes, Palette, PaletteKey},
    },
    foundation::error::{RemnantError, RemnantResult},
    path::command::{Command, PathOutline},
    sketch::jitter::jitter_all,
};

/// A parsed outline together with the attributes its colors fall back to.
pub struct ParsedOutline<'a> {
    /// Position of the outline in the source list.
    pub index: usize,
    /// Parsed commands.
    pub outline: PathOutline,
    /// Fallback colors for empty palette lists.
    pub attributes: &'a dyn ColorAttributes,
}

/// One circuit of one outline, ready to draw.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawablePath {
    /// 1-based circuit number. Circuit 1 is the shaded, filled pass.
    pub circuit: u32,
    /// Index of the source outline.
    pub outline_index: usize,
    /// Jittered commands.
    pub commands: Vec<Command>,
    /// Copied from the parsed outline.
    pub is_closed: bool,
    /// Resolved fill color.
    pub fill: ColorValue,
    /// Resolved stroke color.
    pub stroke: ColorValue,
}

impl DrawablePath {
    /// `true` for circuit 1.
    pub fn is_defining(&self) -> bool {
        self.circuit == 1
    }
}

/// Inputs of circuit generation.
#[derive(Clone, Copy, Debug)]
pub struct CircuitSettings<'a> {
    /// Number of circuits, at least 1.
    pub circuits: u32,
    /// Jitter diameter.
    pub drift: f64,
    /// Source of fill and stroke colors.
    pub palette: &'a Palette,
}

/// Produce every drawable for one pass.
///
/// All outlines of circuit `c` come before any outline of circuit `c + 1`, which is also the
/// draw order. Colors are resolved once per drawable.
#[tracing::instrument(skip_all, fields(outlines = outlines.len(), circuits = settings.circuits))]
pub fn generate_circuits<R: Rng + ?Sized>(
    outlines: &[ParsedOutline<'_>],
    settings: &CircuitSettings<'_>,
    rng: &mut R,
) -> RemnantResult<Vec<DrawablePath>> {
    if settings.circuits == 0 {
        return Err(RemnantError::configuration("circuits must be >= 1"));
    }
    if !settings.drift.is_finite() || settings.drift < 0.0 {
        return Err(RemnantError::configuration(
            "drift must be finite and >= 0",
        ));
    }

    let mut out = Vec::with_capacity(outlines.len() * settings.circuits as usize);
    for circuit in 1..=settings.circuits {
        for parsed in outlines {
            let commands = jitter_all(
                &parsed.outline.commands,
                settings.drift,
                parsed.outline.is_closed,
                rng,
            );
            let fill = settings
                .palette
                .resolve(PaletteKey::Fill, parsed.attributes, rng);
            let stroke = settings
                .palette
                .resolve(PaletteKey::Stroke, parsed.attributes, rng);
            out.push(DrawablePath {
                circuit,
                outline_index: parsed.index,
                commands,
                is_closed: parsed.outline.is_closed,
                fill,
                stroke,
            });
        }
    }
    tracing::debug!(drawables = out.len(), "generated circuits");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/sketch/circuits.rs"]
mod tests;

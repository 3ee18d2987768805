use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{
    color::palette::PaletteKey,
    config::model::{RenderConfig, Viewport},
    foundation::{
        core::{Affine, FrameRGBA},
        error::{RemnantError, RemnantResult},
    },
    path::parser::parse_outline,
    render::{
        compositor::{CompositeSettings, composite, draw_debug_markers},
        cpu::CpuSurface,
        surface::SketchSurface,
        text::PreparedFont,
    },
    sketch::circuits::{CircuitSettings, ParsedOutline, generate_circuits},
    source::provider::SourceOutline,
};

/// Counters of one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Outlines handed to the pass.
    pub outlines: usize,
    /// Outlines dropped because their path commands did not parse.
    pub skipped: usize,
    /// Drawables composited, across all circuits.
    pub drawables: usize,
}

/// Random source of one pass: seeded when `seed` is set, from entropy otherwise.
pub fn pass_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_entropy(),
    }
}

/// Run one complete pass onto `surface`.
///
/// Pipeline:
/// 1. [`RenderConfig::validate`]
/// 2. [`parse_outline`] for every outline; unparsable outlines are logged and skipped
/// 3. [`generate_circuits`]
/// 4. background fill with the identity transform, then the viewport transform
/// 5. [`composite`], plus [`draw_debug_markers`] when `debug` is set
/// 6. the optional word, centered on the canvas with the identity transform
///
/// Text failures (for example no font on the surface) skip the word with a warning.
#[tracing::instrument(skip_all, fields(outlines = outlines.len()))]
pub fn render_once<S, R>(
    config: &RenderConfig,
    viewport: &Viewport,
    outlines: &[SourceOutline],
    surface: &mut S,
    rng: &mut R,
) -> RemnantResult<RenderStats>
where
    S: SketchSurface + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let canvas = surface.canvas();
    if canvas != viewport.canvas {
        return Err(RemnantError::render(format!(
            "surface is {}x{} but the viewport expects {}x{}",
            canvas.width, canvas.height, viewport.canvas.width, viewport.canvas.height
        )));
    }

    let mut parsed = Vec::with_capacity(outlines.len());
    let mut skipped = 0;
    for (index, source) in outlines.iter().enumerate() {
        match parse_outline(&source.d) {
            Ok(outline) => parsed.push(ParsedOutline {
                index,
                outline,
                attributes: source,
            }),
            Err(err @ RemnantError::PathSyntax { .. }) => {
                tracing::warn!(index, error = %err, "skipping outline");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    let settings = CircuitSettings {
        circuits: config.circuits,
        drift: config.drift,
        palette: &config.palette,
    };
    let drawables = generate_circuits(&parsed, &settings, rng)?;
    let composite_settings = CompositeSettings::from_config(config)?;

    surface.clear();
    surface.set_transform(Affine::IDENTITY);
    let background = config
        .palette
        .resolve(PaletteKey::Background, &(), rng);
    surface.fill_rect(canvas.rect(), background);

    surface.set_transform(viewport.transform());
    composite(surface, &drawables, &composite_settings);

    if config.debug {
        let color = config.palette.resolve(PaletteKey::Debug, &(), rng);
        draw_debug_markers(surface, &drawables, color);
    }

    if let Some(word) = config.word.as_deref().filter(|w| !w.is_empty()) {
        surface.set_transform(Affine::IDENTITY);
        let color = config.palette.resolve(PaletteKey::Text, &(), rng);
        match surface.measure_text(word, &config.font) {
            Ok(size) => {
                let center = canvas.center();
                let origin =
                    kurbo::Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
                if let Err(err) = surface.fill_text(word, &config.font, origin, color) {
                    tracing::warn!(error = %err, "word overlay failed");
                }
            }
            Err(err) => tracing::warn!(error = %err, "skipping word overlay"),
        }
    }

    let stats = RenderStats {
        outlines: outlines.len(),
        skipped,
        drawables: drawables.len(),
    };
    tracing::debug!(?stats, "pass finished");
    Ok(stats)
}

/// Render one pass on a fresh [`CpuSurface`] and read the pixels back.
///
/// The random source follows `config.seed`.
pub fn render_to_frame(
    config: &RenderConfig,
    viewport: &Viewport,
    outlines: &[SourceOutline],
    font: Option<&PreparedFont>,
) -> RemnantResult<(FrameRGBA, RenderStats)> {
    let mut surface = CpuSurface::new(viewport.canvas)?;
    if let Some(font) = font {
        surface.set_font(font.clone())?;
    }
    let mut rng = pass_rng(config.seed);
    let stats = render_once(config, viewport, outlines, &mut surface, &mut rng)?;
    let frame = surface.finish()?;
    Ok((frame, stats))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

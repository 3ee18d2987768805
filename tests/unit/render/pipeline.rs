use super::*;
use crate::{
    color::{model::normalize, palette::PaletteEntry},
    foundation::core::Canvas,
    render::recording::{DrawCall, RecordingSurface},
};

fn config() -> RenderConfig {
    RenderConfig {
        width: 100,
        height: 80,
        drift: 0.0,
        word: None,
        seed: Some(7),
        ..RenderConfig::default()
    }
}

fn square() -> SourceOutline {
    SourceOutline::new("M10,10 L50,10 L50,50 L10,50 Z")
}

fn run(config: &RenderConfig, outlines: &[SourceOutline]) -> (RecordingSurface, RenderStats) {
    let viewport = config.viewport().unwrap();
    let mut surface = RecordingSurface::new(viewport.canvas);
    let mut rng = pass_rng(config.seed);
    let stats = render_once(config, &viewport, outlines, &mut surface, &mut rng).unwrap();
    (surface, stats)
}

#[test]
fn background_then_viewport_then_layers() {
    let config = RenderConfig {
        start_from_x: 5.0,
        start_from_y: 6.0,
        ..config()
    };
    let (s, stats) = run(&config, &[square()]);
    assert_eq!(
        stats,
        RenderStats {
            outlines: 1,
            skipped: 0,
            drawables: 2,
        }
    );

    assert_eq!(s.calls[0], DrawCall::Clear);
    assert_eq!(s.calls[1], DrawCall::SetTransform(Affine::IDENTITY));
    assert_eq!(
        s.calls[2],
        DrawCall::FillRect(
            Canvas {
                width: 100,
                height: 80
            }
            .rect(),
            normalize("#ffffff").unwrap()
        )
    );
    assert_eq!(
        s.calls[3],
        DrawCall::SetTransform(Affine::translate((5.0, 6.0)))
    );
    // Circuit 1 is three fills and two clips, circuit 2 one stroke.
    assert_eq!(s.fills().count(), 3);
    assert_eq!(s.strokes().count(), 1);
}

#[test]
fn malformed_outlines_are_skipped() {
    let outlines = [
        SourceOutline::new("M10,10 Q1,1 2,2"),
        square(),
        SourceOutline::new(""),
    ];
    let (s, stats) = run(&config(), &outlines);
    assert_eq!(stats.outlines, 3);
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.drawables, 2);
    assert_eq!(s.strokes().count(), 1);
}

#[test]
fn outline_fill_attribute_is_used_for_empty_palette_lists() {
    let mut config = config();
    config.palette.fill = PaletteEntry::Many(Vec::new());
    let outline = square().with_fill("#ff0000");
    let (s, _) = run(&config, &[outline]);

    let red = normalize("#ff0000").unwrap();
    assert_eq!(s.fills().last().map(|(_, c)| c), Some(red));
}

#[test]
fn invalid_config_is_rejected_before_drawing() {
    let config = RenderConfig {
        circuits: 0,
        ..config()
    };
    let viewport = RenderConfig::default().viewport().unwrap();
    let mut surface = RecordingSurface::new(viewport.canvas);
    let err = render_once(&config, &viewport, &[square()], &mut surface, &mut pass_rng(Some(1)))
        .unwrap_err();
    assert!(matches!(err, RemnantError::Configuration(_)));
    assert!(surface.calls.is_empty());
}

#[test]
fn viewport_must_match_surface() {
    let config = config();
    let viewport = config.viewport().unwrap();
    let mut surface = RecordingSurface::new(Canvas {
        width: 10,
        height: 10,
    });
    let err = render_once(&config, &viewport, &[square()], &mut surface, &mut pass_rng(Some(1)))
        .unwrap_err();
    assert!(matches!(err, RemnantError::Render(_)));
}

#[test]
fn word_is_centered_with_identity_transform() {
    let config = RenderConfig {
        word: Some("hey".to_owned()),
        ..config()
    };
    let (s, _) = run(&config, &[square()]);

    let n = s.calls.len();
    assert_eq!(s.calls[n - 2], DrawCall::SetTransform(Affine::IDENTITY));
    // Recording text is 0.6 * 42 px per char by 42 px.
    let width = 3.0 * 42.0 * 0.6;
    assert_eq!(
        s.calls[n - 1],
        DrawCall::Text(
            "hey".to_owned(),
            kurbo::Point::new(50.0 - width / 2.0, 40.0 - 21.0),
            normalize("#000000").unwrap()
        )
    );
}

#[test]
fn empty_word_draws_nothing() {
    let config = RenderConfig {
        word: Some(String::new()),
        ..config()
    };
    let (s, _) = run(&config, &[square()]);
    assert!(!s.calls.iter().any(|c| matches!(c, DrawCall::Text(..))));
}

#[test]
fn debug_markers_follow_the_layers() {
    let config = RenderConfig {
        debug: true,
        ..config()
    };
    let (s, _) = run(&config, &[square()]);
    let blue = normalize("blue").unwrap();
    // Five commands on the square: M, three L and the closing L.
    assert_eq!(s.strokes().filter(|(_, c, _)| *c == blue).count(), 5);
}

#[test]
fn seeded_passes_are_reproducible() {
    let config = RenderConfig {
        drift: 14.0,
        ..config()
    };
    let (a, _) = run(&config, &[square()]);
    let (b, _) = run(&config, &[square()]);
    assert_eq!(a.calls, b.calls);
}

#[test]
fn cpu_frame_has_canvas_size_and_background() {
    let config = config();
    let viewport = config.viewport().unwrap();
    let (frame, stats) = render_to_frame(&config, &viewport, &[square()], None).unwrap();
    assert_eq!((frame.width, frame.height), (100, 80));
    assert_eq!(stats.drawables, 2);
    assert_eq!(frame.pixel(90, 70), Some([255, 255, 255, 255]));
}

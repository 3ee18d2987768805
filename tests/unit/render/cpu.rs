use super::*;
use crate::color::model::normalize;

fn surface(w: u32, h: u32) -> CpuSurface {
    let mut s = CpuSurface::new(Canvas {
        width: w,
        height: h,
    })
    .unwrap();
    s.clear();
    s
}

fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x0, y0));
    p.line_to((x1, y0));
    p.line_to((x1, y1));
    p.line_to((x0, y1));
    p.close_path();
    p
}

fn paint(s: &str) -> ColorValue {
    normalize(s).unwrap()
}

#[test]
fn rejects_oversized_and_empty_canvas() {
    assert!(
        CpuSurface::new(Canvas {
            width: 70_000,
            height: 10
        })
        .is_err()
    );
    assert!(
        CpuSurface::new(Canvas {
            width: 0,
            height: 10
        })
        .is_err()
    );
}

#[test]
fn fill_rect_paints_background() {
    let mut s = surface(8, 8);
    s.fill_rect(s.canvas().rect(), paint("#ff0000"));
    let frame = s.finish().unwrap();
    assert_eq!(frame.data.len(), 8 * 8 * 4);
    assert_eq!(frame.pixel(4, 4), Some([255, 0, 0, 255]));
}

#[test]
fn transparent_paint_is_a_no_op() {
    let mut s = surface(8, 8);
    s.fill_rect(s.canvas().rect(), ColorValue::Transparent);
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 0, 0]));
}

#[test]
fn clip_limits_fills_until_restore() {
    let mut s = surface(20, 20);
    s.save();
    s.clip(&rect_path(0.0, 0.0, 10.0, 20.0));
    s.fill_path(&rect_path(0.0, 0.0, 20.0, 20.0), paint("#0000ff"));
    s.restore();
    s.fill_path(&rect_path(0.0, 15.0, 20.0, 20.0), paint("#00ff00"));
    let frame = s.finish().unwrap();

    assert_eq!(frame.pixel(5, 5), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(15, 5), Some([0, 0, 0, 0]));
    // The second fill sits outside the popped clip.
    assert_eq!(frame.pixel(15, 17), Some([0, 255, 0, 255]));
}

#[test]
fn nested_clips_intersect() {
    let mut s = surface(20, 20);
    s.clip(&rect_path(0.0, 0.0, 12.0, 20.0));
    s.clip(&rect_path(8.0, 0.0, 20.0, 20.0));
    s.fill_path(&rect_path(0.0, 0.0, 20.0, 20.0), paint("#ff0000"));
    let frame = s.finish().unwrap();

    assert_eq!(frame.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(4, 10), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(16, 10), Some([0, 0, 0, 0]));
}

#[test]
fn restore_brings_back_transform() {
    let mut s = surface(20, 20);
    s.save();
    s.set_transform(Affine::translate((10.0, 10.0)));
    s.restore();
    s.fill_path(&rect_path(0.0, 0.0, 5.0, 5.0), paint("#ff0000"));
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(2, 2), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(12, 12), Some([0, 0, 0, 0]));
}

#[test]
fn stroke_covers_the_outline_not_the_interior() {
    let mut s = surface(40, 40);
    let style = StrokeStyle {
        width: 4.0,
        join: LineJoin::Miter,
        cap: LineCap::Butt,
        dash: Vec::new(),
    };
    s.stroke_path(&rect_path(10.0, 10.0, 30.0, 30.0), paint("#000000"), &style);
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(10, 20), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(20, 20), Some([0, 0, 0, 0]));
}

#[test]
fn clear_discards_previous_drawing() {
    let mut s = surface(8, 8);
    s.fill_rect(s.canvas().rect(), paint("#ff0000"));
    s.clear();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 0, 0]));
}

#[test]
fn text_without_font_is_an_error() {
    let mut s = surface(8, 8);
    assert!(!s.has_font());
    let spec = FontSpec::default();
    assert!(s.measure_text("hi", &spec).is_err());
    assert!(
        s.fill_text("hi", &spec, kurbo::Point::ZERO, paint("black"))
            .is_err()
    );
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let mut s = surface(8, 8);
    assert!(s.set_font(PreparedFont::new(b"not a font".to_vec())).is_err());
    assert!(!s.has_font());
}

#[test]
fn dash_pattern_is_forwarded() {
    let style = StrokeStyle {
        width: 2.0,
        join: LineJoin::Arcs,
        cap: LineCap::Round,
        dash: vec![6.0, 2.0],
    };
    let stroke = stroke_to_cpu(&style, 1.0);
    assert_eq!(stroke.width, 2.0);
    assert_eq!(stroke.join, vello_cpu::kurbo::Join::Round);
    assert_eq!(stroke.start_cap, vello_cpu::kurbo::Cap::Round);
    assert_eq!(stroke.dash_pattern.as_slice(), &[6.0, 2.0]);
}

#[test]
fn sub_pixel_dash_periods_stroke_solid() {
    let style = StrokeStyle {
        width: 2.0,
        join: LineJoin::Miter,
        cap: LineCap::Butt,
        dash: vec![1e-4, 1e-4],
    };
    assert!(stroke_to_cpu(&style, 1.0).dash_pattern.is_empty());
    // The same pattern is long enough once the transform magnifies it.
    assert!(!stroke_to_cpu(&style, 1e4).dash_pattern.is_empty());

    let mut s = surface(40, 40);
    s.stroke_path(&rect_path(10.0, 10.0, 30.0, 30.0), paint("#000000"), &style);
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(10, 20), Some([0, 0, 0, 255]));
}

#[test]
fn oversized_pixel_count_is_rejected() {
    assert!(matches!(
        CpuSurface::new(Canvas {
            width: 65_535,
            height: 65_535
        }),
        Err(RemnantError::Render(_))
    ));
}

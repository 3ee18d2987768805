use super::*;

fn hsl(text: &str) -> Hsl {
    normalize(text).unwrap().hsl().unwrap()
}

#[test]
fn red_has_one_canonical_form() {
    let red = hsl("#ff0000");
    assert_eq!(red, Hsl::new(0.0, 100.0, 50.0));
    assert_eq!(hsl("red"), red);
    assert_eq!(hsl("rgb(255,0,0)"), red);
    assert_eq!(hsl("rgb(100%, 0%, 0%)"), red);
    assert_eq!(hsl("#F00"), red);
}

#[test]
fn serialized_form_normalizes_to_itself() {
    let red = hsl("#ff0000");
    assert_eq!(red.to_string(), "hsl(0,100%,50%)");
    assert_eq!(hsl(&red.to_string()), red);

    let teal = hsl("teal");
    assert_eq!(hsl(&teal.to_string()), teal);
}

#[test]
fn hue_branches_cover_each_channel() {
    assert_eq!(hsl("#00ff00").h, 120.0);
    assert_eq!(hsl("#0000ff").h, 240.0);
    assert_eq!(hsl("#ff00ff").h, 300.0);
    // Red max with blue above green wraps into the upper range.
    assert_eq!(hsl("#ff0080").h, 330.0);
}

#[test]
fn grays_have_zero_saturation_and_rounded_lightness() {
    let c = hsl("#808080");
    assert_eq!(c.h, 0.0);
    assert_eq!(c.s, 0.0);
    assert_eq!(c.l, 50.2);
    assert_eq!(hsl("white"), Hsl::new(0.0, 0.0, 100.0));
    assert_eq!(hsl("black"), Hsl::BLACK);
}

#[test]
fn transparent_passes_through() {
    assert_eq!(normalize("transparent").unwrap(), ColorValue::Transparent);
    assert_eq!(
        ColorValue::Transparent.with_lightness_offset(-15.0),
        ColorValue::Transparent
    );
    assert_eq!(ColorValue::Transparent.to_string(), "transparent");
}

#[test]
fn unrecognized_text_is_a_color_error() {
    for bad in ["", "nope", "#12", "#gggggg", "rgb(1,2)", "rgb(300,0,0)", "hsl(a,b,c)"] {
        assert!(
            matches!(normalize(bad), Err(RemnantError::ColorResolution(_))),
            "{bad:?} should not resolve"
        );
    }
}

#[test]
fn lightness_offset_is_clamped() {
    let c = Hsl::new(210.0, 40.0, 90.0);
    assert_eq!(c.with_lightness_offset(15.0).l, 100.0);
    assert_eq!(c.with_lightness_offset(-15.0).l, 75.0);
    assert_eq!(Hsl::new(0.0, 0.0, 5.0).with_lightness_offset(-15.0).l, 0.0);
    assert_eq!(c.with_lightness_offset(-15.0).h, 210.0);
    assert_eq!(c.with_lightness_offset(-15.0).s, 40.0);
}

#[test]
fn rgba8_conversion_inverts_from_rgb8() {
    for (r, g, b) in [(255, 0, 0), (0, 128, 255), (250, 235, 215), (0, 0, 0)] {
        let [r2, g2, b2, a] = Hsl::from_rgb8(r, g, b).to_rgba8();
        assert_eq!(a, 255);
        assert!((i32::from(r) - i32::from(r2)).abs() <= 3);
        assert!((i32::from(g) - i32::from(g2)).abs() <= 3);
        assert!((i32::from(b) - i32::from(b2)).abs() <= 3);
    }
}

#[test]
fn hsl_saturation_and_lightness_must_be_percentages() {
    for bad in ["hsl(0,50%,150%)", "hsl(0,-20%,-5%)", "hsl(120, 101%, 50%)"] {
        assert!(
            matches!(normalize(bad), Err(RemnantError::ColorResolution(_))),
            "{bad:?} should not resolve"
        );
    }
    assert_eq!(hsl("hsl(0,0%,100%)"), Hsl::new(0.0, 0.0, 100.0));
    assert_eq!(hsl("hsl(400deg,100%,0%)"), Hsl::new(40.0, 100.0, 0.0));
}

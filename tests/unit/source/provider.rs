use super::*;

#[test]
fn outline_attributes_feed_fill_and_stroke_only() {
    let o = SourceOutline::new("M0,0 L1,1")
        .with_fill("#ff0000")
        .with_stroke("navy");
    assert_eq!(o.color_attribute(PaletteKey::Fill), Some("#ff0000"));
    assert_eq!(o.color_attribute(PaletteKey::Stroke), Some("navy"));
    assert_eq!(o.color_attribute(PaletteKey::Background), None);
    assert_eq!(o.color_attribute(PaletteKey::Text), None);
}

#[test]
fn static_outlines_keep_order() {
    let src = StaticOutlines::new(vec![SourceOutline::new("M1,1"), SourceOutline::new("M2,2")]);
    let listed = src.list_outlines().unwrap();
    assert_eq!(listed[0].d, "M1,1");
    assert_eq!(listed[1].d, "M2,2");
    assert_eq!(src.source_size(), None);
}

#[test]
fn manifest_parses_optional_fields() {
    let m = OutlineManifest::from_json(
        r#"{
            "width": 200,
            "height": 100,
            "outlines": [
                { "d": "M0,0 L10,0 L10,10 Z", "fill": "red" },
                { "d": "M5,5 H20" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(m.source_size(), Some((200.0, 100.0)));
    let outlines = m.list_outlines().unwrap();
    assert_eq!(outlines.len(), 2);
    assert_eq!(outlines[0].fill.as_deref(), Some("red"));
    assert_eq!(outlines[1].fill, None);
    assert_eq!(outlines[1].stroke, None);
}

#[test]
fn manifest_without_size_has_no_source_size() {
    let m = OutlineManifest::from_json(r#"{ "outlines": [] }"#).unwrap();
    assert_eq!(m.source_size(), None);
}

#[test]
fn manifest_requires_outlines() {
    let err = OutlineManifest::from_json(r#"{ "width": 10 }"#).unwrap_err();
    assert!(matches!(err, RemnantError::Serde(_)));
}

#[test]
fn manifest_round_trips_through_pretty_json() {
    let m = OutlineManifest {
        width: Some(10.0),
        height: Some(20.0),
        outlines: vec![SourceOutline::new("M0,0 L1,1").with_stroke("blue")],
    };
    let text = m.to_json_pretty().unwrap();
    assert!(!text.contains("\"fill\""));
    assert_eq!(OutlineManifest::from_json(&text).unwrap(), m);
}

#[test]
fn missing_manifest_file_is_wrapped() {
    let err = OutlineManifest::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, RemnantError::Other(_)));
    assert!(format!("{err:#}").contains("read outline manifest"));
}

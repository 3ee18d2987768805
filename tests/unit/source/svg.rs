use super::*;
use crate::path::parser::parse_outline;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
  <path d="M10 10 L60 10 L60 60 L10 60 Z" fill="#ff0000" stroke="navy"/>
</svg>"##;

#[test]
fn extracts_path_with_colors_and_size() {
    let svg = SvgOutlines::from_data(SQUARE.as_bytes()).unwrap();
    assert_eq!(svg.size(), (200.0, 100.0));
    assert_eq!(svg.source_size(), Some((200.0, 100.0)));

    let outlines = svg.list_outlines().unwrap();
    assert_eq!(outlines.len(), 1);
    assert_eq!(outlines[0].fill.as_deref(), Some("#ff0000"));
    assert_eq!(outlines[0].stroke.as_deref(), Some("#000080"));
    assert!(outlines[0].d.starts_with("M10,10"));
    assert!(outlines[0].d.ends_with('Z'));
}

#[test]
fn extracted_commands_parse_and_close() {
    let svg = SvgOutlines::from_data(SQUARE.as_bytes()).unwrap();
    let outline = parse_outline(&svg.outlines()[0].d).unwrap();
    assert!(outline.is_closed);
    assert_eq!(outline.commands[0].code(), 'M');
}

#[test]
fn group_transforms_are_applied() {
    let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
      <g transform="translate(5 7)">
        <path d="M0 0 L10 0 L10 10" stroke="black" fill="none"/>
      </g>
    </svg>"#;
    let svg = SvgOutlines::from_data(doc.as_bytes()).unwrap();
    assert_eq!(svg.outlines()[0].d, "M5,7 L15,7 L15,17");
    assert_eq!(svg.outlines()[0].fill, None);
}

#[test]
fn quadratic_segments_become_cubics() {
    let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
      <path d="M0 0 Q30 30 60 0" stroke="black" fill="none"/>
    </svg>"#;
    let svg = SvgOutlines::from_data(doc.as_bytes()).unwrap();
    let d = &svg.outlines()[0].d;
    assert!(d.contains('C'), "{d}");
    assert!(!d.contains('Q'), "{d}");
    assert_eq!(d, "M0,0 C20,20 40,20 60,0");
}

#[test]
fn documents_without_paths_are_rejected() {
    let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#;
    let svg = SvgOutlines::from_data(doc.as_bytes()).unwrap();
    assert!(svg.outlines().is_empty());
    assert!(matches!(
        svg.list_outlines(),
        Err(RemnantError::Configuration(_))
    ));
}

#[test]
fn malformed_documents_fail_to_parse() {
    assert!(matches!(
        SvgOutlines::from_data(b"not svg"),
        Err(RemnantError::Other(_))
    ));
}

#[test]
fn numbers_are_trimmed() {
    assert_eq!(trim_number(1.5), "1.5");
    assert_eq!(trim_number(2.0), "2");
    assert_eq!(trim_number(-0.0001), "0");
    assert_eq!(trim_number(-3.25), "-3.25");
}

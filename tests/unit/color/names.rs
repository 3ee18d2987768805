use super::*;

#[test]
fn table_is_sorted_and_unique() {
    for pair in NAMED_COLORS.windows(2) {
        assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
    }
    assert!(named_color_count() >= 140);
}

#[test]
fn lookup_is_case_insensitive() {
    assert_eq!(name_to_hex("red"), Some("#ff0000"));
    assert_eq!(name_to_hex("CornflowerBlue"), Some("#6495ed"));
    assert_eq!(name_to_hex(" indianred "), Some("#cd5c5c"));
    assert_eq!(name_to_hex("grey"), name_to_hex("gray"));
    assert_eq!(name_to_hex("notacolor"), None);
}

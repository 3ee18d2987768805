use super::*;

fn values(seq: &Sequence) -> Vec<f64> {
    seq.numbers.iter().map(|n| n.value).collect()
}

#[test]
fn splits_commands_and_numbers() {
    let seqs = lex("M0,0 l 10 20 C1,2,3,4,5,6 z").unwrap();
    let codes: Vec<char> = seqs.iter().map(|s| s.code).collect();
    assert_eq!(codes, vec!['M', 'L', 'C', 'Z']);
    assert_eq!(values(&seqs[1]), vec![10.0, 20.0]);
    assert_eq!(values(&seqs[2]), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert!(seqs[3].numbers.is_empty());
    assert_eq!(seqs[1].offset, 5);
}

#[test]
fn signs_and_dots_start_new_numbers() {
    let seqs = lex("M10-5L1.5.5").unwrap();
    assert_eq!(values(&seqs[0]), vec![10.0, -5.0]);
    assert_eq!(values(&seqs[1]), vec![1.5, 0.5]);
}

#[test]
fn exponents_are_part_of_the_number() {
    let seqs = lex("M1e2,-2.5E-1").unwrap();
    assert_eq!(values(&seqs[0]), vec![100.0, -0.25]);
}

#[test]
fn reports_offsets_for_bad_input() {
    match lex("M0,0 Q1,1,2,2") {
        Err(RemnantError::PathSyntax { offset, .. }) => assert_eq!(offset, 5),
        other => panic!("expected syntax error, got {other:?}"),
    }
    assert!(matches!(
        lex("10,10 L0,0"),
        Err(RemnantError::PathSyntax { offset: 0, .. })
    ));
    assert!(matches!(
        lex("M1e,2"),
        Err(RemnantError::PathSyntax { offset: 2, .. })
    ));
    assert!(matches!(
        lex("M0;0"),
        Err(RemnantError::PathSyntax { offset: 2, .. })
    ));
    assert!(matches!(lex("M-,0"), Err(RemnantError::PathSyntax { .. })));
}

use super::*;

#[test]
fn first_matching_term_wins() {
    assert!(hint_for_line("6 sc in MR").unwrap().starts_with("MR"));
    assert!(hint_for_line("[sc, inc] x6").unwrap().starts_with("inc"));
    assert!(hint_for_line("sc, dec").unwrap().starts_with("dec"));
    assert!(hint_for_line("SC around").unwrap().starts_with("sc"));
    assert!(hint_for_line("dc around").unwrap().starts_with("dc"));
}

#[test]
fn unknown_lines_have_no_hint() {
    assert_eq!(hint_for_line("ch 1, turn"), None);
    assert_eq!(hint_for_line(""), None);
}

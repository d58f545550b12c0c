use proptest::prelude::*;
use rdclean::normalize;

const NONE: [&str; 0] = [];

#[test]
fn folding_strips_case_space_and_punctuation() {
    assert_eq!(normalize("  ACME Corp!! ", true, &NONE).unwrap(), "acmecorp");
}

#[test]
fn default_vendor_patterns_remove_commas_and_periods() {
    let out = normalize("Acme, Inc.", false, &[",", r"\."]).unwrap();
    assert!(!out.contains(','));
    assert!(!out.contains('.'));
}

proptest! {
    #[test]
    fn folding_is_idempotent(s in "[ -~À-ÿ]{0,40}") {
        let once = normalize(&s, true, &NONE).unwrap();
        let twice = normalize(&once, true, &NONE).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn ignored_punctuation_never_survives(s in "[A-Za-z ,.]{0,40}") {
        let out = normalize(&s, false, &[",", r"\."]).unwrap();
        prop_assert!(!out.contains(',') && !out.contains('.'));
    }
}

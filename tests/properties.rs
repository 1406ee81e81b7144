//! Property-based tests for the metrics.
//!
//! Blank input (empty or all whitespace) takes a shortcut in
//! Damerau-Levenshtein, so generators that check identity and symmetry keep
//! at least one non-whitespace character.

use proptest::prelude::*;
use textmetrics::{
    damerau_levenshtein_distance, damerau_levenshtein_similarity, jaro_winkler_distance,
    jaro_winkler_distance_with, try_damerau_levenshtein_distance,
    try_damerau_levenshtein_similarity, try_jaro_winkler_distance, JaroWinklerConfig,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn dl_identity(s in "[a-z]{1,24}") {
        prop_assert_eq!(damerau_levenshtein_distance(&s, &s), 0);
    }

    #[test]
    fn dl_symmetric(s in "[a-d]{1,12}", t in "[a-d]{1,12}") {
        prop_assert_eq!(
            damerau_levenshtein_distance(&s, &t),
            damerau_levenshtein_distance(&t, &s)
        );
    }

    #[test]
    fn dl_empty_side_is_length(s in "\\PC{0,32}") {
        let units = s.encode_utf16().count();
        prop_assert_eq!(damerau_levenshtein_distance("", &s), units);

        let blank = s.chars().all(char::is_whitespace);
        let expected = if blank { 0 } else { units };
        prop_assert_eq!(damerau_levenshtein_distance(&s, ""), expected);
    }

    #[test]
    fn dl_bounded_by_longer_length(s in "[a-z]{1,16}", t in "[a-z]{1,16}") {
        let d = damerau_levenshtein_distance(&s, &t);
        prop_assert!(d <= s.len().max(t.len()));
        prop_assert!(d >= s.len().abs_diff(t.len()));

        let sim = damerau_levenshtein_similarity(&s, &t);
        prop_assert!((0.0..=1.0).contains(&sim));
    }

    #[test]
    fn dl_adjacent_swap_costs_one(s in "[a-z]{2,16}", pos in 0usize..15) {
        let mut chars: Vec<char> = s.chars().collect();
        let i = pos % (chars.len() - 1);
        prop_assume!(chars[i] != chars[i + 1]);
        chars.swap(i, i + 1);
        let swapped: String = chars.into_iter().collect();
        prop_assert_eq!(damerau_levenshtein_distance(&s, &swapped), 1);
    }

    #[test]
    fn jw_identity(s in "\\PC{1,32}") {
        prop_assert_eq!(jaro_winkler_distance(&s, &s), 0.0);
    }

    #[test]
    fn jw_symmetric(s in "[a-c]{0,8}", t in "[a-c]{0,8}") {
        prop_assert_eq!(jaro_winkler_distance(&s, &t), jaro_winkler_distance(&t, &s));
    }

    #[test]
    fn jw_in_unit_interval(
        s in "[a-f]{0,16}",
        t in "[a-f]{0,16}",
        prefix_size in 0usize..64,
        weight_threshold in 0.0f64..=1.0,
    ) {
        let config = JaroWinklerConfig::new(prefix_size, weight_threshold);
        let d = jaro_winkler_distance_with(&s, &t, &config);
        prop_assert!((0.0..=1.0).contains(&d), "distance {} out of range", d);
    }

    #[test]
    fn jw_boost_never_increases_distance(prefix in "[a-z]{1,6}", s in "[a-z]{0,10}", t in "[a-z]{0,10}") {
        let a = format!("{prefix}{s}");
        let b = format!("{prefix}{t}");
        let unboosted = jaro_winkler_distance_with(&a, &b, &JaroWinklerConfig::new(64, 1.0));
        prop_assert!(unboosted >= jaro_winkler_distance(&a, &b));
    }

    #[test]
    fn jw_symmetric_non_ascii(
        s in "[a\u{e9}\u{1F600} ]{0,8}",
        t in "[a\u{e9}\u{1F600} ]{0,8}",
    ) {
        prop_assert_eq!(jaro_winkler_distance(&s, &t), jaro_winkler_distance(&t, &s));
    }

    #[test]
    fn checked_variants_agree(s in "[a-c ]{0,8}", t in "[a-c ]{0,8}") {
        let config = JaroWinklerConfig::default();
        prop_assert_eq!(
            try_jaro_winkler_distance(Some(s.as_str()), Some(t.as_str()), &config),
            Ok(jaro_winkler_distance(&s, &t))
        );
        prop_assert_eq!(
            try_damerau_levenshtein_distance(Some(s.as_str()), Some(t.as_str())),
            Ok(damerau_levenshtein_distance(&s, &t))
        );
        prop_assert_eq!(
            try_damerau_levenshtein_similarity(Some(s.as_str()), Some(t.as_str())),
            Ok(damerau_levenshtein_similarity(&s, &t))
        );
    }

    #[test]
    fn deterministic(s in "[a-c\u{e9}]{0,10}", t in "[a-c\u{e9}]{0,10}") {
        prop_assert_eq!(jaro_winkler_distance(&s, &t), jaro_winkler_distance(&s, &t));
        prop_assert_eq!(damerau_levenshtein_distance(&s, &t), damerau_levenshtein_distance(&s, &t));
    }
}

//! Property-based tests for classification, fixing, and report ordering.
//!
//! These tests verify that:
//! - Classification only ever looks at the first `SAMPLE_CAP` bytes
//! - Printable bytes plus tab/LF/CR are always accepted
//! - A null byte wins over any other control byte
//! - Fixing reaches a clean fixed point and is idempotent
//! - The built-in rules reach that fixed point in one pass
//! - Aggregated issue order does not depend on input order

use prosefmt::aggregate::aggregate;
use prosefmt::classify::{classify_sample, Classification, RejectReason, SAMPLE_CAP};
use prosefmt::content::FileContent;
use prosefmt::format::Fixer;
use prosefmt::lint::RuleSet;
use prosefmt::models::Issue;
use proptest::prelude::*;
use std::borrow::Cow;

/// Bytes a text file may contain.
fn arb_text_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(b'\t'),
        Just(b'\n'),
        Just(b'\r'),
        0x20u8..=0x7E,
        0x80u8..=0xFF,
    ]
}

/// Text with a bias towards whitespace and line breaks.
fn arb_prose() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(b' '),
            2 => Just(b'\t'),
            3 => Just(b'\n'),
            1 => Just(b'\r'),
            4 => b'a'..=b'z',
        ],
        0..64,
    )
}

fn arb_issue() -> impl Strategy<Value = Issue> {
    (
        prop::sample::select(vec!["a.txt", "b.txt", "docs/c.txt"]),
        1usize..6,
        1usize..4,
        prop::sample::select(vec!["TL001", "TL010"]),
    )
        .prop_map(|(file, line, column, rule)| Issue {
            file: file.to_string(),
            line,
            column,
            rule: rule.to_string(),
            message: format!("{rule} message"),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Bytes past the sample cap never change the verdict.
    #[test]
    fn classification_ignores_bytes_past_cap(
        head in prop::collection::vec(any::<u8>(), 0..256),
        tail in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut sample = head;
        sample.resize(SAMPLE_CAP, b'a');
        let verdict = classify_sample(&sample);
        sample.extend_from_slice(&tail);
        prop_assert_eq!(classify_sample(&sample), verdict);
    }

    /// Printable bytes, high bytes, tab, LF, and CR are always text.
    #[test]
    fn text_bytes_are_accepted(bytes in prop::collection::vec(arb_text_byte(), 0..512)) {
        prop_assert_eq!(classify_sample(&bytes), Classification::Accepted);
    }

    /// A null byte inside the sample is reported even next to other controls.
    #[test]
    fn null_byte_takes_precedence(
        bytes in prop::collection::vec(any::<u8>(), 0..512),
        at in any::<prop::sample::Index>(),
    ) {
        let mut bytes = bytes;
        let pos = at.index(bytes.len() + 1);
        bytes.insert(pos, 0);
        prop_assert_eq!(
            classify_sample(&bytes),
            Classification::Rejected(RejectReason::NullByte)
        );
    }

    /// Fixed content has no issues and fixing it again changes nothing.
    #[test]
    fn fix_is_clean_and_idempotent(bytes in arb_prose()) {
        let rules = RuleSet::builtin();
        let fixer = Fixer::new(&rules);
        let fixed = fixer.resolve(&bytes).unwrap().into_owned();
        prop_assert!(rules.scan("p", FileContent::new(&fixed)).is_empty());
        let again = fixer.resolve(&fixed).unwrap();
        prop_assert!(matches!(again, Cow::Borrowed(_)));
    }

    /// The built-in catalog needs a single pass.
    #[test]
    fn builtin_rules_converge_in_one_pass(bytes in arb_prose()) {
        let rules = RuleSet::builtin();
        prop_assert!(Fixer::new(&rules).with_max_passes(1).resolve(&bytes).is_ok());
    }

    /// Clean input comes back untouched.
    #[test]
    fn clean_input_is_unchanged(bytes in arb_prose()) {
        let rules = RuleSet::builtin();
        if rules.is_clean(FileContent::new(&bytes)) {
            let out = Fixer::new(&rules).resolve(&bytes).unwrap();
            prop_assert_eq!(&*out, bytes.as_slice());
        }
    }

    /// Splitting and shuffling the per-file batches yields the same report.
    #[test]
    fn aggregation_is_order_independent(
        issues in prop::collection::vec(arb_issue(), 0..24),
        split in any::<prop::sample::Index>(),
        shuffled in any::<u64>(),
    ) {
        let baseline = aggregate(vec![issues.clone()]);

        let mut reordered = issues;
        if !reordered.is_empty() {
            let k = (shuffled as usize) % reordered.len();
            reordered.rotate_left(k);
            reordered.reverse();
        }
        let cut = split.index(reordered.len() + 1);
        let (left, right) = reordered.split_at(cut);
        let batched = aggregate(vec![right.to_vec(), left.to_vec()]);

        prop_assert_eq!(batched, baseline);
    }
}

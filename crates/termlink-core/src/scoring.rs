/// Number of letters `a` and `b` have in common, counting a repeated letter
/// at most as many times as it appears in `a`.
pub fn common_letters(a: &str, b: &str) -> usize {
    let mut counts = [0usize; 256];
    for byte in a.bytes() {
        counts[byte as usize] += 1;
    }

    let mut common = 0;
    for byte in b.bytes() {
        let slot = &mut counts[byte as usize];
        if *slot > 0 {
            *slot -= 1;
            common += 1;
        }
    }
    common
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::subsequence;

    #[test]
    fn test_common_letters_basic() {
        assert_eq!(common_letters("CAT", "COT"), 2);
        assert_eq!(common_letters("CAT", "DOG"), 0);
        assert_eq!(common_letters("CAT", "CAT"), 3);
    }

    #[test]
    fn test_repeats_limited_by_first_word() {
        assert_eq!(common_letters("LEVEL", "EERIE"), 2);
        assert_eq!(common_letters("ABC", "AAA"), 1);
        assert_eq!(common_letters("AAA", "ABC"), 1);
    }

    #[test]
    fn test_empty_words() {
        assert_eq!(common_letters("", "WORD"), 0);
        assert_eq!(common_letters("WORD", ""), 0);
    }

    fn distinct_letters(len: usize) -> impl Strategy<Value = String> {
        let alphabet: Vec<char> = ('A'..='Z').collect();
        subsequence(alphabet, len)
            .prop_shuffle()
            .prop_map(|letters| letters.into_iter().collect())
    }

    proptest! {
        #[test]
        fn symmetric_for_words_without_repeats(
            (a, b) in (1usize..=12).prop_flat_map(|len| (distinct_letters(len), distinct_letters(len)))
        ) {
            prop_assert_eq!(common_letters(&a, &b), common_letters(&b, &a));
        }

        #[test]
        fn never_exceeds_shorter_word(a in "[A-Z]{0,10}", b in "[A-Z]{0,10}") {
            let score = common_letters(&a, &b);
            prop_assert!(score <= a.len().min(b.len()));
        }
    }
}

//! Column letter arithmetic.
//!
//! Columns are ranked with bijective base-26 counting: `A` = 1, `Z` = 26,
//! `AA` = 27, `AZ` = 52, `BA` = 53 and so on. There is no column zero.

/// Return the 1-based rank of a column label (case-insensitive).
///
/// Returns `None` for an empty label, a label containing anything other than
/// ASCII letters, or a label too long to rank in a `u64`.
pub fn column_rank(letters: &str) -> Option<u64> {
    if letters.is_empty() {
        return None;
    }

    let mut rank = 0u64;
    for c in letters.bytes() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = u64::from(c.to_ascii_uppercase() - b'A') + 1;
        rank = rank.checked_mul(26)?.checked_add(digit)?;
    }
    Some(rank)
}

/// Convert a 1-based rank back to its upper-case column label (1 -> A, 27 -> AA).
pub fn column_letters(rank: u64) -> Option<String> {
    if rank == 0 {
        return None;
    }

    let mut result = Vec::new();
    let mut n = rank;
    while n > 0 {
        n -= 1;
        result.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    result.reverse();
    String::from_utf8(result).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rank_single_letters() {
        assert_eq!(column_rank("A"), Some(1));
        assert_eq!(column_rank("B"), Some(2));
        assert_eq!(column_rank("Z"), Some(26));
        assert_eq!(column_rank("z"), Some(26));
    }

    #[test]
    fn test_rank_multi_letters() {
        assert_eq!(column_rank("AA"), Some(27));
        assert_eq!(column_rank("AB"), Some(28));
        assert_eq!(column_rank("AZ"), Some(52));
        assert_eq!(column_rank("BA"), Some(53));
        assert_eq!(column_rank("ZZ"), Some(702));
        assert_eq!(column_rank("AAA"), Some(703));
        assert_eq!(column_rank("XFD"), Some(16_384));
    }

    #[test]
    fn test_rank_rejects_non_letters() {
        assert_eq!(column_rank(""), None);
        assert_eq!(column_rank("A1"), None);
        assert_eq!(column_rank("$A"), None);
        assert_eq!(column_rank("Ä"), None);
    }

    #[test]
    fn test_rank_overflow_returns_none() {
        assert_eq!(column_rank(&"Z".repeat(40)), None);
    }

    #[test]
    fn test_letters_examples() {
        assert_eq!(column_letters(0), None);
        assert_eq!(column_letters(1).as_deref(), Some("A"));
        assert_eq!(column_letters(26).as_deref(), Some("Z"));
        assert_eq!(column_letters(27).as_deref(), Some("AA"));
        assert_eq!(column_letters(52).as_deref(), Some("AZ"));
        assert_eq!(column_letters(53).as_deref(), Some("BA"));
        assert_eq!(column_letters(16_384).as_deref(), Some("XFD"));
    }

    #[test]
    fn test_letters_handles_max_u64() {
        let letters = column_letters(u64::MAX).unwrap();
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(column_rank(&letters), Some(u64::MAX));
    }

    proptest! {
        #[test]
        fn rank_is_monotonic(rank in 1u64..10_000_000) {
            let here = column_letters(rank).unwrap();
            let next = column_letters(rank + 1).unwrap();
            prop_assert!(column_rank(&here).unwrap() < column_rank(&next).unwrap());
        }

        #[test]
        fn letters_invert_rank(rank in 1u64..u64::MAX) {
            let letters = column_letters(rank).unwrap();
            prop_assert_eq!(column_rank(&letters), Some(rank));
        }
    }
}

//! Confirmation number generation
//!
//! Format: `<PREFIX>-<epoch millis>-<8 uppercase alphanumerics>`, e.g.
//! `LS-1735689600000-7K2QX9ZD`. The millis part keeps numbers roughly
//! time-ordered; the suffix carries ~41 bits of randomness. Uniqueness is
//! finally enforced by the `confirmation_number UNIQUE` constraint.

use rand::Rng;
use rand::distributions::Alphanumeric;

const SUFFIX_LEN: usize = 8;

pub fn generate(prefix: &str, now_millis: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{prefix}-{now_millis}-{suffix}")
}

/// Check the `<PREFIX>-<digits>-<8 alphanumerics>` shape.
///
/// Any non-empty prefix is accepted, so numbers issued under an earlier
/// `CONFIRMATION_PREFIX` stay valid.
pub fn is_well_formed(value: &str) -> bool {
    let mut parts = value.rsplitn(3, '-');
    let (Some(suffix), Some(digits), Some(prefix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    !prefix.is_empty()
        && !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_format() {
        let number = generate("LS", 1_735_689_600_000);
        assert!(number.starts_with("LS-1735689600000-"));
        assert!(is_well_formed(&number), "{number}");
    }

    #[test]
    fn test_custom_prefix() {
        let number = generate("PINK-STAND", 42);
        assert!(number.starts_with("PINK-STAND-42-"));
        assert!(is_well_formed(&number));
    }

    #[test]
    fn test_well_formed_rejects() {
        assert!(!is_well_formed("LS-123-abcdefgh"));
        assert!(!is_well_formed("LS-123-ABCDEFG"));
        assert!(!is_well_formed("LS--ABCDEFGH"));
        assert!(!is_well_formed("LS-12a-ABCDEFGH"));
        assert!(!is_well_formed("LS123ABCDEFGH"));
        assert!(!is_well_formed("-123-ABCDEFGH"));
        assert!(!is_well_formed("../etc/passwd"));
    }

    #[test]
    fn test_same_millis_still_distinct() {
        let numbers: HashSet<_> = (0..1000).map(|_| generate("LS", 1)).collect();
        assert_eq!(numbers.len(), 1000);
    }
}

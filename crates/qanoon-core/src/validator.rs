//! Question text checks, run before any provider is contacted.

use crate::error::ValidationError;

pub const MIN_QUESTION_CHARS: usize = 3;
pub const MAX_QUESTION_CHARS: usize = 1000;

/// Checks the trimmed question against the length bounds. Lengths are counted in
/// `char`s so Urdu text is measured the same way as Latin text.
///
/// Rules are applied in order and the first failure wins: empty, too long, too short.
pub fn validate(question: &str) -> Result<(), ValidationError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    let len = trimmed.chars().count();
    if len > MAX_QUESTION_CHARS {
        return Err(ValidationError::TooLong {
            max: MAX_QUESTION_CHARS,
        });
    }
    if len < MIN_QUESTION_CHARS {
        return Err(ValidationError::TooShort {
            min: MIN_QUESTION_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_empty() {
        assert_eq!(validate(""), Err(ValidationError::EmptyQuestion));
        assert_eq!(validate("   \n\t "), Err(ValidationError::EmptyQuestion));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(validate("abc"), Ok(()));
        assert_eq!(validate(&"a".repeat(1000)), Ok(()));
        assert_eq!(
            validate("ab"),
            Err(ValidationError::TooShort { min: 3 })
        );
        assert_eq!(
            validate(&"a".repeat(1001)),
            Err(ValidationError::TooLong { max: 1000 })
        );
    }

    #[test]
    fn length_is_measured_after_trimming() {
        assert_eq!(
            validate("   ab   "),
            Err(ValidationError::TooShort { min: 3 })
        );
        let padded = format!("  {}  ", "x".repeat(1000));
        assert_eq!(validate(&padded), Ok(()));
    }

    #[test]
    fn urdu_counts_characters_not_bytes() {
        // Three Urdu letters are six bytes in UTF-8.
        assert_eq!(validate("کیا"), Ok(()));
        assert_eq!(validate(&"ق".repeat(1000)), Ok(()));
    }
}

use crate::domain::{error::DomainError, value_objects::ValidatedName};

/// Centralized name validation.
///
/// All name rules live here, not scattered across callers.
pub struct NameValidator;

impl NameValidator {
    pub const MIN_LENGTH: usize = 1;
    pub const MAX_LENGTH: usize = 100;

    /// Validate a raw name.
    ///
    /// Checks run in a fixed order (blank, length, characters) so exactly one
    /// error kind is reported for any input.
    pub fn validate(raw: &str) -> Result<ValidatedName, DomainError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::BlankName);
        }

        let length = trimmed.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(DomainError::LengthOutOfRange {
                length,
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        if !trimmed.chars().all(is_allowed) {
            return Err(DomainError::InvalidCharacters {
                value: trimmed.to_owned(),
            });
        }

        Ok(ValidatedName::new_unchecked(trimmed.to_owned()))
    }

    /// Validate an optional name, falling back to `ValidatedName::anonymous`
    /// when it is absent or blank. Every other failure propagates.
    pub fn validate_or_anonymous(raw: Option<&str>) -> Result<ValidatedName, DomainError> {
        match raw {
            None => Ok(ValidatedName::anonymous()),
            Some(value) if value.trim().is_empty() => Ok(ValidatedName::anonymous()),
            Some(value) => Self::validate(value),
        }
    }
}

/// `[A-Za-z\s\-']`
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_ascii_whitespace() || c == '-' || c == '\''
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_name() {
        let name = NameValidator::validate("Alice").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let name = NameValidator::validate("  Mary Jane \t").unwrap();
        assert_eq!(name.as_str(), "Mary Jane");
    }

    #[test]
    fn accepts_hyphens_and_apostrophes() {
        assert!(NameValidator::validate("Jean-Luc").is_ok());
        assert!(NameValidator::validate("O'Brien").is_ok());
        assert!(NameValidator::validate("-").is_ok());
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(NameValidator::validate(""), Err(DomainError::BlankName));
        assert_eq!(NameValidator::validate("   "), Err(DomainError::BlankName));
    }

    #[test]
    fn accepts_exactly_max_length() {
        let raw = "a".repeat(100);
        assert_eq!(NameValidator::validate(&raw).unwrap().char_len(), 100);
    }

    #[test]
    fn rejects_over_max_length() {
        let raw = "a".repeat(101);
        assert_eq!(
            NameValidator::validate(&raw),
            Err(DomainError::LengthOutOfRange {
                length: 101,
                min: 1,
                max: 100
            })
        );
    }

    #[test]
    fn length_is_checked_before_characters() {
        let raw = "1".repeat(150);
        assert!(matches!(
            NameValidator::validate(&raw),
            Err(DomainError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_digits_and_symbols() {
        for raw in ["Alice1", "Bob!", "user@example", "Zoë", "a_b"] {
            assert!(
                matches!(
                    NameValidator::validate(raw),
                    Err(DomainError::InvalidCharacters { .. })
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_ascii_whitespace_inside_name() {
        for name in ["Ann\u{2003}Lee", "Ann\u{00A0}Lee", "Ann\u{3000}Lee"] {
            assert!(
                matches!(
                    NameValidator::validate(name),
                    Err(DomainError::InvalidCharacters { .. })
                ),
                "{name:?}"
            );
        }
    }

    #[test]
    fn invalid_characters_reports_trimmed_value() {
        let err = NameValidator::validate("  R2D2 ").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidCharacters {
                value: "R2D2".into()
            }
        );
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn missing_or_blank_falls_back_to_anonymous() {
        assert_eq!(
            NameValidator::validate_or_anonymous(None).unwrap(),
            ValidatedName::anonymous()
        );
        assert_eq!(
            NameValidator::validate_or_anonymous(Some("  ")).unwrap(),
            ValidatedName::anonymous()
        );
    }

    #[test]
    fn optional_invalid_name_still_fails() {
        assert!(NameValidator::validate_or_anonymous(Some("B0b")).is_err());
    }
}

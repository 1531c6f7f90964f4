//! Declarative validation schema.
//!
//! Each field maps to an ordered list of pure checks. Checks run in order and
//! the first failure becomes the field's error, so the message a user sees is
//! always the one for the earliest broken constraint.
//!
//! The password rules declare a 6 character minimum while the strength
//! pattern itself needs 8. Both are kept: a 6 or 7 character password passes
//! the length check and fails on the pattern.
//!
//! Lengths are measured in UTF-16 code units, the unit a browser form counts
//! in. Hangul syllables count as one, characters outside the BMP (emoji) as
//! two.

use std::sync::LazyLock;

use regex::Regex;

use super::field::{self, FieldName};
use crate::error::ValidationError;

/// Values accepted by the role select.
pub const ROLE_OPTIONS: [&str; 2] = ["관리자", "일반사용자"];

pub const USERNAME_MIN: usize = 2;
pub const USERNAME_MAX: usize = 50;
pub const PHONE_LEN: usize = 11;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 100;

const MSG_USERNAME_SHORT: &str = "이름은 2글자 이상이어야 합니다.";
const MSG_USERNAME_LONG: &str = "이름은 50글자 이하이어야 합니다.";
const MSG_EMAIL: &str = "올바른 이메일을 입력해주세요.";
const MSG_PHONE_LEN: &str = "연락처는 11자리여야 합니다.";
const MSG_PHONE_FORMAT: &str = "010으로 시작하는 11자리 숫자를 입력해주세요";
const MSG_ROLE_UNSET: &str = "역할을 선택해주세요.";
const MSG_ROLE_UNKNOWN: &str = "올바른 역할을 선택해주세요.";
const MSG_PASSWORD_SHORT: &str = "비밀번호는 최소 6자리 이상이어야 합니다.";
const MSG_PASSWORD_LONG: &str = "비밀번호는 100자리 이하이어야 합니다.";
const MSG_PASSWORD_FORMAT: &str =
    "비밀번호는 최소 6자리 이상, 영문, 숫자, 특수문자를 포함해야 합니다.";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^010[0-9]{8}$").expect("phone pattern compiles"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

static PASSWORD_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("password charset pattern compiles")
});
static HAS_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("letter pattern compiles"));
static HAS_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("digit pattern compiles"));
static HAS_SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@$!%*?&]").expect("special pattern compiles"));

static SCHEMA: LazyLock<[FieldRule; 6]> = LazyLock::new(|| {
    [
        FieldRule::new(
            FieldName::Username,
            vec![
                Check::MinLen { min: USERNAME_MIN, message: MSG_USERNAME_SHORT },
                Check::MaxLen { max: USERNAME_MAX, message: MSG_USERNAME_LONG },
            ],
        ),
        FieldRule::new(
            FieldName::Email,
            vec![Check::Format { test: is_email, message: MSG_EMAIL }],
        ),
        FieldRule::new(
            FieldName::Phone,
            vec![
                Check::MinLen { min: PHONE_LEN, message: MSG_PHONE_LEN },
                Check::MaxLen { max: PHONE_LEN, message: MSG_PHONE_LEN },
                Check::Format { test: is_phone, message: MSG_PHONE_FORMAT },
            ],
        ),
        FieldRule::new(
            FieldName::Role,
            vec![
                Check::Required { message: MSG_ROLE_UNSET },
                Check::OneOf { options: &ROLE_OPTIONS, message: MSG_ROLE_UNKNOWN },
            ],
        ),
        FieldRule::new(FieldName::Password, password_checks()),
        FieldRule::new(FieldName::ConfirmPassword, password_checks()),
    ]
});

fn password_checks() -> Vec<Check> {
    vec![
        Check::MinLen { min: PASSWORD_MIN, message: MSG_PASSWORD_SHORT },
        Check::MaxLen { max: PASSWORD_MAX, message: MSG_PASSWORD_LONG },
        Check::Format { test: is_strong_password, message: MSG_PASSWORD_FORMAT },
    ]
}

/// A single constraint and the message shown when it fails.
#[derive(Debug, Clone)]
pub enum Check {
    /// Minimum length in UTF-16 code units.
    MinLen { min: usize, message: &'static str },
    /// Maximum length in UTF-16 code units.
    MaxLen { max: usize, message: &'static str },
    /// Value must be non-empty.
    Required { message: &'static str },
    /// Value must be one of a fixed set.
    OneOf { options: &'static [&'static str], message: &'static str },
    /// Value must satisfy a format predicate.
    Format { test: fn(&str) -> bool, message: &'static str },
}

impl Check {
    pub fn apply(&self, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::MinLen { min, message } => {
                if utf16_len(value) < *min {
                    return Err(ValidationError::TooShort {
                        min: *min,
                        message: message.to_string(),
                    });
                }
            }
            Self::MaxLen { max, message } => {
                if utf16_len(value) > *max {
                    return Err(ValidationError::TooLong {
                        max: *max,
                        message: message.to_string(),
                    });
                }
            }
            Self::Required { message } => {
                if value.is_empty() {
                    return Err(ValidationError::Unset {
                        message: message.to_string(),
                    });
                }
            }
            Self::OneOf { options, message } => {
                if !options.iter().any(|option| *option == value) {
                    return Err(ValidationError::WrongFormat {
                        message: message.to_string(),
                    });
                }
            }
            Self::Format { test, message } => {
                if !test(value) {
                    return Err(ValidationError::WrongFormat {
                        message: message.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The ordered checks for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FieldName,
    pub checks: Vec<Check>,
}

impl FieldRule {
    fn new(field: FieldName, checks: Vec<Check>) -> Self {
        Self { field, checks }
    }

    /// Run the checks in order and stop at the first failure.
    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self.checks.iter().try_for_each(|check| check.apply(value))
    }
}

/// The rule bound to a field.
pub fn rule_for(name: FieldName) -> &'static FieldRule {
    &SCHEMA[field::slot(name)]
}

/// Validate a value against a field's rule without touching any form state.
pub fn validate(name: FieldName, value: &str) -> Result<(), ValidationError> {
    rule_for(name).validate(value)
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

fn is_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Letter, digit and special character present, 8+ characters from the
/// allowed set.
fn is_strong_password(value: &str) -> bool {
    PASSWORD_CHARSET_RE.is_match(value)
        && HAS_LETTER_RE.is_match(value)
        && HAS_DIGIT_RE.is_match(value)
        && HAS_SPECIAL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(name: FieldName, value: &str) -> bool {
        validate(name, value).is_ok()
    }

    #[test]
    fn username_length_bounds() {
        assert!(!is_valid(FieldName::Username, ""));
        assert!(!is_valid(FieldName::Username, "a"));
        assert!(is_valid(FieldName::Username, "ab"));
        assert!(is_valid(FieldName::Username, "홍길동"));
        assert!(is_valid(FieldName::Username, &"a".repeat(50)));
        assert!(!is_valid(FieldName::Username, &"a".repeat(51)));
    }

    #[test]
    fn username_counts_characters_not_bytes() {
        // Two Hangul syllables are six UTF-8 bytes.
        assert!(is_valid(FieldName::Username, "길동"));
        assert!(is_valid(FieldName::Username, &"가".repeat(50)));
        assert!(!is_valid(FieldName::Username, &"가".repeat(51)));
    }

    #[test]
    fn username_counts_utf16_units() {
        // One emoji is a surrogate pair: two units, so it meets the minimum.
        assert!(is_valid(FieldName::Username, "😀"));
        assert!(is_valid(FieldName::Username, &"😀".repeat(25)));
        assert!(!is_valid(FieldName::Username, &"😀".repeat(26)));
    }

    #[test]
    fn username_errors_carry_bounds_and_messages() {
        let short = validate(FieldName::Username, "a").unwrap_err();
        assert_eq!(
            short,
            ValidationError::TooShort {
                min: 2,
                message: MSG_USERNAME_SHORT.to_string()
            }
        );
        let long = validate(FieldName::Username, &"a".repeat(51)).unwrap_err();
        assert!(matches!(long, ValidationError::TooLong { max: 50, .. }));
        assert_eq!(long.message(), "이름은 50글자 이하이어야 합니다.");
    }

    #[test]
    fn email_grammar() {
        for ok in [
            "hello@sparta-devcamp.com",
            "first.last@example.co.kr",
            "user+tag@sub.domain.org",
            "o'brien@example.ie",
            "UPPER@EXAMPLE.COM",
        ] {
            assert!(is_valid(FieldName::Email, ok), "{ok} should be valid");
        }
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            ".user@example.com",
            "us..er@example.com",
            "user.@example.com",
            "user@-example.com",
            "user@example..com",
            "user name@example.com",
            "사용자@example.com",
        ] {
            assert!(!is_valid(FieldName::Email, bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn phone_requires_eleven_digits_with_010_prefix() {
        assert!(is_valid(FieldName::Phone, "01012345678"));
        assert!(!is_valid(FieldName::Phone, "02012345678"));
        assert!(!is_valid(FieldName::Phone, "0101234567"));
        assert!(!is_valid(FieldName::Phone, "010123456789"));
        assert!(!is_valid(FieldName::Phone, "010-1234-56"));
        assert!(!is_valid(FieldName::Phone, "0101234567a"));
    }

    #[test]
    fn phone_reports_length_before_format() {
        let err = validate(FieldName::Phone, "0101234567").unwrap_err();
        assert!(matches!(err, ValidationError::TooShort { min: 11, .. }));
        assert_eq!(err.message(), MSG_PHONE_LEN);

        let err = validate(FieldName::Phone, "010123456789").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 11, .. }));

        let err = validate(FieldName::Phone, "02012345678").unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongFormat {
                message: MSG_PHONE_FORMAT.to_string()
            }
        );
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode \d but not accepted here.
        assert!(!is_valid(FieldName::Phone, "010١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn role_must_be_one_of_the_options() {
        assert!(is_valid(FieldName::Role, "관리자"));
        assert!(is_valid(FieldName::Role, "일반사용자"));
        assert!(matches!(
            validate(FieldName::Role, "").unwrap_err(),
            ValidationError::Unset { .. }
        ));
        assert!(matches!(
            validate(FieldName::Role, "admin").unwrap_err(),
            ValidationError::WrongFormat { .. }
        ));
    }

    #[test]
    fn password_strength_examples() {
        // 7 characters: within the declared bound, below the pattern minimum.
        let err = validate(FieldName::Password, "abc123!").unwrap_err();
        assert_eq!(err.message(), MSG_PASSWORD_FORMAT);
        assert!(is_valid(FieldName::Password, "abcd123!"));
        assert!(is_valid(FieldName::Password, "Abcdef1!"));
    }

    #[test]
    fn password_needs_letter_digit_and_special() {
        assert!(!is_valid(FieldName::Password, "abcdefgh!"));
        assert!(!is_valid(FieldName::Password, "12345678!"));
        assert!(!is_valid(FieldName::Password, "abcd1234"));
        assert!(!is_valid(FieldName::Password, "abcd 123!"));
        assert!(!is_valid(FieldName::Password, "abcd123#"));
    }

    #[test]
    fn password_length_bounds() {
        let err = validate(FieldName::Password, "a1!").unwrap_err();
        assert!(matches!(err, ValidationError::TooShort { min: 6, .. }));

        let at_max = format!("a1!{}", "b".repeat(97));
        assert_eq!(at_max.len(), 100);
        assert!(is_valid(FieldName::Password, &at_max));

        let over = format!("a1!{}", "b".repeat(98));
        let err = validate(FieldName::Password, &over).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 100, .. }));
    }

    #[test]
    fn confirm_password_shares_the_password_rule() {
        for value in ["", "abc123!", "abcd123!", "Abcdef2!", "abcdefgh"] {
            assert_eq!(
                validate(FieldName::Password, value),
                validate(FieldName::ConfirmPassword, value),
                "rules diverge for {value:?}"
            );
        }
    }

    #[test]
    fn every_field_has_its_own_rule() {
        for name in FieldName::ALL {
            assert_eq!(rule_for(name).field, name);
            assert!(!rule_for(name).checks.is_empty());
        }
    }

    #[test]
    fn empty_values_fail_every_rule() {
        for name in FieldName::ALL {
            assert!(!is_valid(name, ""), "{name} accepted an empty value");
        }
    }
}

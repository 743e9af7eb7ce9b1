//! Local input validation — runs before any remote call.

use std::sync::LazyLock;

use regex::Regex;

/// Conservative mailbox shape: local part, `@`, host label, dot segment.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$")
        .expect("email pattern is valid")
});

/// Special characters accepted by the password policy.
pub const PASSWORD_SPECIAL_CHARS: &str = "@#$%^&+=!";

type Predicate = fn(&str) -> bool;

/// The five password requirements, in display order. Both strength checks
/// below derive from this table so they cannot drift apart.
const PASSWORD_REQUIREMENTS: [(Predicate, &str); 5] = [
    (min_length, "At least 8 characters"),
    (has_digit, "At least one number"),
    (has_lowercase, "At least one lowercase letter"),
    (has_uppercase, "At least one uppercase letter"),
    (
        has_special,
        "At least one special character (@#$%^&+=!)",
    ),
];

fn min_length(password: &str) -> bool {
    password.chars().count() >= 8
}

fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

fn has_lowercase(password: &str) -> bool {
    password.chars().any(char::is_lowercase)
}

fn has_uppercase(password: &str) -> bool {
    password.chars().any(char::is_uppercase)
}

fn has_special(password: &str) -> bool {
    password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c))
}

/// True if the address has a plausible mailbox shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// True for exactly ten decimal digits.
pub fn validate_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// True when every password requirement is met.
pub fn validate_password_strength(password: &str) -> bool {
    PASSWORD_REQUIREMENTS
        .iter()
        .all(|(check, _)| check(password))
}

/// Number of requirements met plus the descriptions of the unmet ones, for
/// progress display and error text.
pub fn password_requirements(password: &str) -> (usize, Vec<&'static str>) {
    let met = PASSWORD_REQUIREMENTS
        .iter()
        .filter(|(check, _)| check(password))
        .count();
    let unmet = PASSWORD_REQUIREMENTS
        .iter()
        .filter(|(check, _)| !check(password))
        .map(|(_, text)| *text)
        .collect();
    (met, unmet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_meets_everything() {
        assert!(validate_password_strength("Str0ng@pw"));
        let (met, unmet) = password_requirements("Str0ng@pw");
        assert_eq!(met, 5);
        assert!(unmet.is_empty());
    }

    #[test]
    fn test_weak_password_reports_exact_complement() {
        // Meets length + lowercase only.
        let (met, unmet) = password_requirements("abcdefgh");
        assert_eq!(met, 2);
        assert_eq!(
            unmet,
            vec![
                "At least one number",
                "At least one uppercase letter",
                "At least one special character (@#$%^&+=!)",
            ]
        );
        assert!(!validate_password_strength("abcdefgh"));
    }

    #[test]
    fn test_strength_and_requirements_agree() {
        let samples = [
            "",
            "a",
            "Ab1@",
            "abcdefgh",
            "ABCDEFG1",
            "Passw0rd",
            "Passw0rd!",
            "sh0rT@!a",
        ];
        for password in samples {
            let (met, unmet) = password_requirements(password);
            assert_eq!(met + unmet.len(), 5, "{password:?}");
            assert_eq!(
                validate_password_strength(password),
                unmet.is_empty(),
                "{password:?}"
            );
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("first.last+tag@mail-host.co.in"));
        assert!(!validate_email("userexample.com"));
        assert!(!validate_email("user@example"));
        assert!(!validate_email("user name@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210"));
        assert!(!validate_phone("98765"));
        assert!(!validate_phone("98765432101"));
        assert!(!validate_phone("98765-3210"));
        assert!(!validate_phone(""));
    }
}

use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

use shared::{RegistrationError, RegistrationRequest, RegistrationValidationResult};

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 6;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Checks the sign-up form. Nothing is stored; every failing rule is reported.
#[derive(Clone, Default)]
pub struct RegistrationService;

impl RegistrationService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, request: &RegistrationRequest) -> RegistrationValidationResult {
        let mut errors = Vec::new();

        if request.username.trim().chars().count() < MIN_USERNAME_CHARS {
            errors.push(RegistrationError::UsernameTooShort);
        }
        if !email_pattern().is_match(request.email.trim()) {
            errors.push(RegistrationError::InvalidEmail);
        }
        if request.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(RegistrationError::PasswordTooShort);
        }
        if request.password != request.confirm_password {
            errors.push(RegistrationError::PasswordMismatch);
        }

        info!("Registration validation finished with {} errors", errors.len());

        RegistrationValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str, confirm: &str) -> RegistrationRequest {
        RegistrationRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let service = RegistrationService::new();

        let result = service.validate(&request("alex", "alex@example.com", "secret1", "secret1"));

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_all_errors_accumulate() {
        let service = RegistrationService::new();

        let result = service.validate(&request(" al ", "not-an-email", "abc", "abd"));

        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                RegistrationError::UsernameTooShort,
                RegistrationError::InvalidEmail,
                RegistrationError::PasswordTooShort,
                RegistrationError::PasswordMismatch,
            ]
        );
    }

    #[test]
    fn test_email_rules() {
        let service = RegistrationService::new();
        let errors_for = |email: &str| service.validate(&request("alex", email, "secret1", "secret1")).errors;

        assert!(errors_for("  alex@example.com ").is_empty());
        assert_eq!(errors_for("alex@example"), vec![RegistrationError::InvalidEmail]);
        assert_eq!(errors_for("al ex@example.com"), vec![RegistrationError::InvalidEmail]);
        assert_eq!(errors_for("alex@@example.com"), vec![RegistrationError::InvalidEmail]);
    }

    #[test]
    fn test_password_mismatch_only() {
        let service = RegistrationService::new();

        let result = service.validate(&request("alex", "alex@example.com", "secret1", "secret2"));

        assert_eq!(result.errors, vec![RegistrationError::PasswordMismatch]);
    }
}

//! Raw form input and the pure validation that turns it into API requests.

use crate::domain::model::{LoginRequest, RegistrationRequest};
use crate::utils::error::{AuthError, Result};

pub const ROLE_REQUIRED: &str = "Please select a role";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Splits on the first whitespace: first token and the remainder, kept verbatim.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

impl RegistrationForm {
    /// 檢查順序: 角色 → 密碼確認
    pub fn to_request(&self) -> Result<RegistrationRequest> {
        let role = self
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AuthError::validation(ROLE_REQUIRED))?;

        if self.password != self.confirm_password {
            return Err(AuthError::validation(PASSWORD_MISMATCH));
        }

        let (first_name, last_name) = split_full_name(&self.full_name);

        Ok(RegistrationRequest {
            first_name,
            last_name,
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: role.to_string(),
        })
    }
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(role: Option<&str>, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            full_name: "  Jane Mary Doe ".to_string(),
            email: " jane@example.com ".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("Jane Mary Doe"),
            ("Jane".to_string(), "Mary Doe".to_string())
        );
        assert_eq!(split_full_name("Jane"), ("Jane".to_string(), String::new()));
        assert_eq!(
            split_full_name("Jane  Doe"),
            ("Jane".to_string(), " Doe".to_string())
        );
        assert_eq!(split_full_name(""), (String::new(), String::new()));
    }

    #[test]
    fn test_registration_request_built_from_form() {
        let request = form(Some("freelancer"), "s3cret", "s3cret")
            .to_request()
            .unwrap();

        assert_eq!(request.first_name, "Jane");
        assert_eq!(request.last_name, "Mary Doe");
        assert_eq!(request.email, "jane@example.com");
        assert_eq!(request.password, "s3cret");
        assert_eq!(request.role, "freelancer");
    }

    #[test]
    fn test_missing_role_rejected() {
        for role in [None, Some(""), Some("   ")] {
            let err = form(role, "a", "a").to_request().unwrap_err();
            assert!(matches!(err, AuthError::ValidationError { ref message } if message == ROLE_REQUIRED));
        }
    }

    #[test]
    fn test_role_checked_before_password_match() {
        let err = form(None, "a", "b").to_request().unwrap_err();
        assert_eq!(err.user_friendly_message(), ROLE_REQUIRED);
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let err = form(Some("client"), "secret", "Secret").to_request().unwrap_err();
        assert_eq!(err.user_friendly_message(), PASSWORD_MISMATCH);
    }

    #[test]
    fn test_login_form_trims_email_only() {
        let request = LoginForm {
            email: "  jane@example.com\n".to_string(),
            password: " pass word ".to_string(),
        }
        .to_request();

        assert_eq!(request.email, "jane@example.com");
        assert_eq!(request.password, " pass word ");
    }
}

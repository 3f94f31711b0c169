//! Shape checks on submitted credentials.

use gatehouse_core::error::AppError;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_CHARS: usize = 64;

/// Longest accepted password, in bytes. Bounds the work a caller can force
/// onto the hasher.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Validates that a username/password pair is present and well-formed.
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    max_username_chars: usize,
    max_password_bytes: usize,
}

impl CredentialPolicy {
    /// Creates a policy with the default limits.
    pub fn new() -> Self {
        Self {
            max_username_chars: MAX_USERNAME_CHARS,
            max_password_bytes: MAX_PASSWORD_BYTES,
        }
    }

    /// Returns `Ok(())` if both fields are acceptable, or a validation error
    /// describing the first violation found.
    pub fn validate(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }

        if username.chars().count() > self.max_username_chars {
            return Err(AppError::validation(format!(
                "Username must be at most {} characters",
                self.max_username_chars
            )));
        }

        if username.chars().any(char::is_control) {
            return Err(AppError::validation(
                "Username must not contain control characters",
            ));
        }

        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        if password.len() > self.max_password_bytes {
            return Err(AppError::validation(format!(
                "Password must be at most {} bytes",
                self.max_password_bytes
            )));
        }

        Ok(())
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_credentials() {
        assert!(CredentialPolicy::new().validate("alice", "s3cret").is_ok());
    }

    #[test]
    fn test_rejects_missing_fields() {
        let policy = CredentialPolicy::new();
        assert!(policy.validate("", "pw").is_err());
        assert!(policy.validate("   ", "pw").is_err());
        assert!(policy.validate("alice", "").is_err());
    }

    #[test]
    fn test_rejects_oversized_fields() {
        let policy = CredentialPolicy::new();
        let long_name = "a".repeat(MAX_USERNAME_CHARS + 1);
        assert!(policy.validate(&long_name, "pw").is_err());

        let long_password = "p".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(policy.validate("alice", &long_password).is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(CredentialPolicy::new().validate("ali\nce", "pw").is_err());
    }

    #[test]
    fn test_whitespace_password_allowed() {
        assert!(CredentialPolicy::new().validate("alice", "   ").is_ok());
    }
}

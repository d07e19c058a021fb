use std::fmt;

/// Login credentials, held only in form state until submission.
///
/// The `Debug` implementation redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration input.
///
/// `confirm_password` exists only client-side and is never transmitted to
/// the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// The credential pair that actually goes to the backend.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// Opaque bearer credential issued by the backend on successful login.
///
/// Presence of a token implies "authenticated" for client-side purposes;
/// there is no local expiry tracking. The value is never logged and the
/// `Debug` implementation redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };

        let debug = format!("{:?}", credentials);
        assert!(debug.contains("a@b.com"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret1"));
    }

    #[test]
    fn test_registration_debug_redacts_passwords() {
        let registration = Registration {
            email: "a@b.com".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };

        let debug = format!("{:?}", registration);
        assert!(!debug.contains("abcdef"));
    }

    #[test]
    fn test_registration_credentials_drops_confirmation() {
        let registration = Registration {
            email: "a@b.com".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };

        let credentials = registration.credentials();
        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.password, "abcdef");
    }

    #[test]
    fn test_session_token_debug_redacts_value() {
        let token = SessionToken::new("t1");
        let debug = format!("{:?}", token);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("t1"));
    }

    #[test]
    fn test_session_token_accessors() {
        let token = SessionToken::new("t1");
        assert_eq!(token.as_str(), "t1");
        assert_eq!(token.into_string(), "t1");
    }
}

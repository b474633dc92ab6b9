use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt;

/// Username/password pair for the data store, supplied by host configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `base64(username:password)`, the Basic scheme token.
    pub fn basic_token(&self) -> String {
        BASE64.encode(format!("{}:{}", self.username, self.password))
    }

    /// Full `Authorization` header value.
    pub fn basic_authorization(&self) -> String {
        format!("Basic {}", self.basic_token())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_token() {
        let creds = Credentials::new("Administrator", "password");
        assert_eq!(creds.basic_token(), "QWRtaW5pc3RyYXRvcjpwYXNzd29yZA==");
        assert_eq!(
            creds.basic_authorization(),
            "Basic QWRtaW5pc3RyYXRvcjpwYXNzd29yZA=="
        );
    }

    #[test]
    fn test_colon_in_password_is_kept() {
        let creds = Credentials::new("user", "pa:ss");
        let decoded = BASE64.decode(creds.basic_token()).unwrap();
        assert_eq!(decoded, b"user:pa:ss");
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("user", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("user"));
        assert!(!printed.contains("hunter2"));
    }
}

use crate::utils::{is_empty_or_whitespace, is_too_long};
use validator::ValidateEmail;

/// A syntactically valid email address requesting early access.
#[derive(Debug, Clone)]
pub struct WaitlistEmail(String);

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl WaitlistEmail {
    pub fn parse(s: String) -> Result<WaitlistEmail, String> {
        if is_empty_or_whitespace(&s) || is_too_long(&s, 254) || !s.validate_email() {
            Err(format!("{} is not a valid email address.", s))
        } else {
            Ok(Self(s))
        }
    }
}
